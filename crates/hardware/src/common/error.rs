//! Fault and Error definitions.
//!
//! This module defines everything that can stop the emulator. It provides:
//! 1. **Machine Faults:** Unrecoverable conditions raised while loading or executing a program.
//! 2. **Load Errors:** Problems reading or parsing a program image before it reaches the machine.
//! 3. **Config Errors:** Problems reading or validating a JSON configuration file.
//!
//! None of these types format user-facing reports or choose exit codes; that is
//! left to the caller.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Unrecoverable machine faults.
///
/// Every variant that can occur during execution carries the program counter
/// and opcode byte of the instruction that raised it. The faulting instruction
/// has no architectural effect; the machine moves to `Faulted` and no further
/// instructions execute.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The program image does not fit into memory.
    #[error("program image is {len} bytes but memory holds only {capacity}")]
    ProgramTooLarge {
        /// Length of the rejected image.
        len: usize,
        /// Memory capacity in bytes.
        capacity: usize,
    },

    /// The byte at `pc` is not a known opcode.
    #[error("illegal instruction {opcode:#010b} at pc {pc:#04x}")]
    IllegalInstruction {
        /// Address of the offending byte.
        pc: u8,
        /// The byte that failed to decode.
        opcode: u8,
    },

    /// An instruction fetch, operand fetch, PC advance or explicit access
    /// fell outside `0x00..=0xFF`.
    #[error("out-of-range access to address {addr:#x} by opcode {opcode:#010b} at pc {pc:#04x}")]
    OutOfRangeAccess {
        /// Program counter when the access was attempted.
        pc: u8,
        /// The byte at `pc`, or zero when `pc` itself could not be read.
        opcode: u8,
        /// The address that was out of range.
        addr: usize,
    },

    /// A register operand named the stack pointer slot or a slot past the register file.
    #[error("invalid register operand R{index} for opcode {opcode:#010b} at pc {pc:#04x}")]
    InvalidRegister {
        /// Address of the instruction.
        pc: u8,
        /// Opcode of the instruction.
        opcode: u8,
        /// The rejected register index.
        index: u8,
    },

    /// A push would move SP below address 0 or into the loaded program.
    #[error("stack overflow: push with sp {sp:#04x} by opcode {opcode:#010b} at pc {pc:#04x}")]
    StackOverflow {
        /// Address of the pushing instruction.
        pc: u8,
        /// The pushing opcode (PUSH or CALL).
        opcode: u8,
        /// Stack pointer before the push.
        sp: u8,
    },

    /// A pop was attempted with SP already at the top of the stack.
    #[error("stack underflow: pop with sp {sp:#04x} by opcode {opcode:#010b} at pc {pc:#04x}")]
    StackUnderflow {
        /// Address of the popping instruction.
        pc: u8,
        /// The popping opcode (POP or RET).
        opcode: u8,
        /// Stack pointer before the pop.
        sp: u8,
    },

    /// The output sink rejected a PRN write.
    #[error("output sink failed at pc {pc:#04x}: {reason}")]
    Output {
        /// Address of the PRN instruction.
        pc: u8,
        /// The underlying I/O error, rendered.
        reason: String,
    },
}

impl Fault {
    /// Program counter at which the fault was raised.
    ///
    /// # Returns
    ///
    /// `None` for faults raised outside execution (an oversized image).
    pub const fn pc(&self) -> Option<u8> {
        match self {
            Self::ProgramTooLarge { .. } => None,
            Self::IllegalInstruction { pc, .. }
            | Self::OutOfRangeAccess { pc, .. }
            | Self::InvalidRegister { pc, .. }
            | Self::StackOverflow { pc, .. }
            | Self::StackUnderflow { pc, .. }
            | Self::Output { pc, .. } => Some(*pc),
        }
    }

    /// Opcode byte of the instruction that raised the fault.
    ///
    /// # Returns
    ///
    /// `None` for an oversized image. PRN is the only instruction that can
    /// raise [`Fault::Output`].
    pub const fn opcode(&self) -> Option<u8> {
        match self {
            Self::ProgramTooLarge { .. } => None,
            Self::Output { .. } => Some(crate::isa::opcodes::PRN),
            Self::IllegalInstruction { opcode, .. }
            | Self::OutOfRangeAccess { opcode, .. }
            | Self::InvalidRegister { opcode, .. }
            | Self::StackOverflow { opcode, .. }
            | Self::StackUnderflow { opcode, .. } => Some(*opcode),
        }
    }
}

/// Errors produced while turning a program file into bytes.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file does not exist.
    #[error("program file not found: {}", .path.display())]
    FileNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The program file exists but could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A line holds something other than a binary byte literal.
    #[error("line {line}: `{content}` is not an 8-bit binary literal")]
    InvalidImageFormat {
        /// One-based line number.
        line: usize,
        /// The offending text, with comments and whitespace stripped.
        content: String,
    },
}

/// Errors produced while loading a JSON configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration is not valid JSON or has unknown keys.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A step budget of zero would never execute anything.
    #[error("run.max_steps must be greater than zero")]
    ZeroStepBudget,
}
