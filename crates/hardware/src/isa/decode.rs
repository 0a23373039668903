//! LS-8 Instruction Decoder.
//!
//! Maps opcode bytes to [`Opcode`] through a 256-entry table built at compile
//! time, then fetches the opcode's fixed number of operand bytes.

use super::instruction::{Instruction, Opcode};
use crate::common::Fault;
use crate::common::constants::{MAX_OPERANDS, MEMORY_SIZE};

/// Opcode lookup indexed by byte value; `None` marks an illegal opcode.
static DECODE_TABLE: [Option<Opcode>; MEMORY_SIZE] = build_table();

const fn build_table() -> [Option<Opcode>; MEMORY_SIZE] {
    let mut table = [None; MEMORY_SIZE];
    let mut i = 0;
    while i < Opcode::COUNT {
        let op = Opcode::ALL[i];
        table[op.byte() as usize] = Some(op);
        i += 1;
    }
    table
}

/// Looks up an opcode byte.
///
/// # Returns
///
/// `None` if the byte is not part of the instruction set.
#[inline]
pub fn lookup(byte: u8) -> Option<Opcode> {
    DECODE_TABLE[byte as usize]
}

/// Decodes the instruction at `pc`.
///
/// # Arguments
///
/// * `memory` - The address space to fetch from.
/// * `pc` - Address of the opcode byte.
///
/// # Errors
///
/// * [`Fault::IllegalInstruction`] if the opcode byte is not in the table.
///   No operand bytes are read in that case.
/// * [`Fault::OutOfRangeAccess`] if an operand would lie past the end of memory.
pub fn decode(memory: &[u8], pc: u8) -> Result<Instruction, Fault> {
    let fetch = |addr: usize, opcode: u8| {
        memory
            .get(addr)
            .copied()
            .ok_or(Fault::OutOfRangeAccess { pc, opcode, addr })
    };

    let byte = fetch(pc as usize, 0)?;
    let opcode = lookup(byte).ok_or(Fault::IllegalInstruction { pc, opcode: byte })?;

    let mut operands = [0; MAX_OPERANDS];
    for (slot, operand) in operands
        .iter_mut()
        .take(opcode.operand_count())
        .enumerate()
    {
        *operand = fetch(pc as usize + 1 + slot, byte)?;
    }

    Ok(Instruction::new(opcode, operands))
}
