//! LS-8 emulator library.
//!
//! This crate implements the LS-8, an 8-bit teaching computer, with the following:
//! 1. **Core:** A 256-byte flat memory, seven data registers, a stack pointer and a
//!    single-threaded fetch-decode-execute loop.
//! 2. **ISA:** Nine fixed instructions decoded through a static opcode table.
//! 3. **Loader:** Parsing of the line-oriented binary program image format.
//! 4. **Configuration and statistics:** JSON config and per-opcode execution counts.
//!
//! # Example
//!
//! ```
//! use ls8_core::config::Config;
//! use ls8_core::isa::opcodes::{ADD, HALT, LDI, PRN};
//! use ls8_core::{Machine, State};
//!
//! let program = [LDI, 0, 8, LDI, 1, 9, ADD, 0, 1, PRN, 0, HALT];
//! let mut machine = Machine::with_output(&Config::default(), Vec::new());
//! machine.load(&program).unwrap();
//! machine.run().unwrap();
//!
//! assert_eq!(machine.state(), &State::Halted);
//! assert_eq!(machine.output(), b"17\n");
//! ```

/// Common types and constants (geometry, faults, registers).
pub mod common;
/// Emulator configuration (defaults and JSON loading).
pub mod config;
/// Machine core (state, memory, stack, execution, ALU).
pub mod core;
/// Instruction set (opcodes, decode, disassembly).
pub mod isa;
/// Program image loading.
pub mod sim;
/// Execution statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Machine faults and loader errors.
pub use crate::common::{Fault, LoadError};
/// The emulated machine and its execution state.
pub use crate::core::{Machine, State};
