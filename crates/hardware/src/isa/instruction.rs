//! Opcode enumeration and decoded instruction structure.
//!
//! Provides the closed set of LS-8 opcodes along with their fixed arity,
//! and the transient `Instruction` produced by the decoder for each step.

use std::fmt;

use super::{decode, disasm, opcodes};
use crate::common::constants::MAX_OPERANDS;

/// Every instruction the LS-8 understands.
///
/// Discriminants are the encoded opcode bytes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Load immediate into a register.
    Ldi = opcodes::LDI,
    /// Wrapping register addition.
    Add = opcodes::ADD,
    /// Wrapping register multiplication.
    Mul = opcodes::MUL,
    /// Print a register to the output sink.
    Prn = opcodes::PRN,
    /// Push a register.
    Push = opcodes::PUSH,
    /// Pop into a register.
    Pop = opcodes::POP,
    /// Push the return address and jump to a register's value.
    Call = opcodes::CALL,
    /// Pop the return address into the PC.
    Ret = opcodes::RET,
    /// Stop the machine.
    Halt = opcodes::HALT,
}

impl Opcode {
    /// All opcodes, in the order used for statistics.
    pub const ALL: [Self; 9] = [
        Self::Ldi,
        Self::Add,
        Self::Mul,
        Self::Prn,
        Self::Push,
        Self::Pop,
        Self::Call,
        Self::Ret,
        Self::Halt,
    ];

    /// Number of opcodes.
    pub const COUNT: usize = Self::ALL.len();

    /// The encoded opcode byte.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Number of operand bytes that follow the opcode, read from its two high bits.
    pub const fn operand_count(self) -> usize {
        (self.byte() >> opcodes::OPERAND_COUNT_SHIFT) as usize
    }

    /// Whether the instruction needs a valid address after it: false for
    /// HALT, which stops, and RET, which takes its target from the stack.
    /// CALL has one because it pushes it as the return address.
    pub const fn has_successor(self) -> bool {
        !matches!(self, Self::Ret | Self::Halt)
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Ldi => "LDI",
            Self::Add => "ADD",
            Self::Mul => "MUL",
            Self::Prn => "PRN",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Call => "CALL",
            Self::Ret => "RET",
            Self::Halt => "HALT",
        }
    }

    /// Position in [`Opcode::ALL`].
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Ldi => 0,
            Self::Add => 1,
            Self::Mul => 2,
            Self::Prn => 3,
            Self::Push => 4,
            Self::Pop => 5,
            Self::Call => 6,
            Self::Ret => 7,
            Self::Halt => 8,
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    /// Looks the byte up in the decode table, handing the byte back if unknown.
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        decode::lookup(byte).ok_or(byte)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// A decoded instruction: opcode plus its operand bytes.
///
/// Operand slots past the opcode's arity are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The decoded opcode.
    pub opcode: Opcode,
    operands: [u8; MAX_OPERANDS],
}

impl Instruction {
    /// Builds an instruction, zeroing operand slots the opcode does not use.
    pub fn new(opcode: Opcode, operands: [u8; MAX_OPERANDS]) -> Self {
        let mut used = [0; MAX_OPERANDS];
        let count = opcode.operand_count();
        used[..count].copy_from_slice(&operands[..count]);
        Self {
            opcode,
            operands: used,
        }
    }

    /// First operand byte.
    pub const fn a(&self) -> u8 {
        self.operands[0]
    }

    /// Second operand byte.
    pub const fn b(&self) -> u8 {
        self.operands[1]
    }

    /// The operand bytes actually encoded.
    pub fn operands(&self) -> &[u8] {
        &self.operands[..self.opcode.operand_count()]
    }

    /// Encoded size in bytes: the opcode plus its operands.
    pub const fn encoded_len(&self) -> usize {
        1 + self.opcode.operand_count()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&disasm::disassemble(self))
    }
}
