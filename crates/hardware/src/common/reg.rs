//! Register File.
//!
//! This module provides the `RegisterFile` struct and the `Reg` operand type.
//! It provides:
//! 1. **Storage:** Seven general-purpose 8-bit registers (`R0`-`R6`).
//! 2. **Invariant Enforcement:** Slot 7 is the stack pointer, kept as a named field
//!    that no data instruction can address.
//! 3. **Observability:** A compact rendering of the full register state for tracing.

use std::fmt;

use super::constants::GENERAL_REGISTER_COUNT;

/// A validated general-purpose register index (`R0`-`R6`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Reg(u8);

impl Reg {
    /// Validates a register operand.
    ///
    /// # Arguments
    ///
    /// * `index` - Raw operand byte.
    ///
    /// # Returns
    ///
    /// `None` for the stack pointer slot and for anything past the register file.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < GENERAL_REGISTER_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Register index as a slot number.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// LS-8 register file.
///
/// Data registers wrap modulo 256 because they are stored as `u8`; arithmetic
/// on them goes through the ALU's wrapping operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: [u8; GENERAL_REGISTER_COUNT],
    sp: u8,
}

impl RegisterFile {
    /// Creates a register file with all data registers zeroed.
    ///
    /// # Arguments
    ///
    /// * `stack_top` - Initial stack pointer value.
    pub const fn new(stack_top: u8) -> Self {
        Self {
            gpr: [0; GENERAL_REGISTER_COUNT],
            sp: stack_top,
        }
    }

    /// Reads a data register.
    pub const fn read(&self, reg: Reg) -> u8 {
        self.gpr[reg.index()]
    }

    /// Writes a data register.
    pub const fn write(&mut self, reg: Reg, val: u8) {
        self.gpr[reg.index()] = val;
    }

    /// Reads a slot by raw index, `None` for the stack pointer slot or past the file.
    pub fn get(&self, idx: usize) -> Option<u8> {
        self.gpr.get(idx).copied()
    }

    /// Current stack pointer.
    pub const fn sp(&self) -> u8 {
        self.sp
    }

    /// Replaces the stack pointer.
    pub const fn set_sp(&mut self, sp: u8) {
        self.sp = sp;
    }
}

impl fmt::Display for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, val) in self.gpr.iter().enumerate() {
            write!(f, "R{i}={val:02X} ")?;
        }
        write!(f, "SP={:02X}", self.sp)
    }
}
