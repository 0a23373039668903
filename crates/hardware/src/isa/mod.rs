//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the LS-8 opcode bytes, the closed `Opcode` enumeration, the
//! table-driven decoder and the disassembler used for tracing.

/// Instruction decoding (opcode lookup table and operand fetch).
pub mod decode;

/// Instruction disassembler for debug tracing and listings.
pub mod disasm;

/// Opcode enumeration and decoded instruction structure.
pub mod instruction;

/// Raw opcode byte values.
pub mod opcodes;

pub use decode::decode;
pub use instruction::{Instruction, Opcode};
