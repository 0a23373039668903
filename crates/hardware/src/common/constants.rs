//! Global Machine Constants.
//!
//! This module defines the fixed geometry of the LS-8. It includes:
//! 1. **Memory Constants:** Size of the flat address space.
//! 2. **Register Constants:** The slot reserved for the stack pointer and the data registers below it.
//! 3. **Stack Constants:** Conventional top of the downward-growing stack.

/// Number of addressable byte cells in memory (addresses `0x00..=0xFF`).
pub const MEMORY_SIZE: usize = 256;

/// Register slot that holds the stack pointer; the register file has one more slot than this.
pub const SP_INDEX: usize = 7;

/// Number of registers usable as data operands (`R0`-`R6`).
pub const GENERAL_REGISTER_COUNT: usize = SP_INDEX;

/// Initial stack pointer value.
///
/// Addresses `0xF4..=0xFF` are reserved by the LS-8 memory map, so the stack
/// starts just below them and grows towards the loaded program.
pub const DEFAULT_STACK_TOP: u8 = 0xF4;

/// Maximum number of operand bytes that can follow an opcode.
pub const MAX_OPERANDS: usize = 2;
