//! LS-8 Opcodes.
//!
//! Raw opcode bytes. The two high bits of each byte give the operand count.

/// Load immediate: `LDI reg, value`.
pub const LDI: u8 = 0b10000010;

/// Add two registers, result in the first: `ADD regA, regB`.
pub const ADD: u8 = 0b10100000;

/// Multiply two registers, result in the first: `MUL regA, regB`.
pub const MUL: u8 = 0b10100010;

/// Print a register as decimal: `PRN reg`.
pub const PRN: u8 = 0b01000111;

/// Push a register onto the stack: `PUSH reg`.
pub const PUSH: u8 = 0b01000101;

/// Pop the top of the stack into a register: `POP reg`.
pub const POP: u8 = 0b01000110;

/// Call the subroutine whose address is held in a register: `CALL reg`.
pub const CALL: u8 = 0b01010000;

/// Return from a subroutine.
pub const RET: u8 = 0b00010001;

/// Halt the machine.
pub const HALT: u8 = 0b00000001;

/// Shift that moves the operand-count field down to bit 0.
pub const OPERAND_COUNT_SHIFT: u32 = 6;
