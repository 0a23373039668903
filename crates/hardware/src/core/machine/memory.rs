//! Memory access and program loading.
//!
//! All accesses are bounds-checked against the 256-byte address space; an
//! address outside it is a fault, never a wraparound.

use std::io::Write;

use tracing::debug;

use super::Machine;
use crate::common::Fault;
use crate::common::constants::MEMORY_SIZE;

impl<W: Write> Machine<W> {
    /// Reads one byte of memory.
    ///
    /// # Errors
    ///
    /// [`Fault::OutOfRangeAccess`] if `addr` is past the end of memory.
    pub fn read(&self, addr: usize) -> Result<u8, Fault> {
        self.memory
            .get(addr)
            .copied()
            .ok_or(Fault::OutOfRangeAccess {
                pc: self.pc,
                opcode: self.opcode_at_pc(),
                addr,
            })
    }

    /// Writes one byte of memory.
    ///
    /// # Errors
    ///
    /// [`Fault::OutOfRangeAccess`] if `addr` is past the end of memory.
    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Fault> {
        let (pc, opcode) = (self.pc, self.opcode_at_pc());
        let cell = self
            .memory
            .get_mut(addr)
            .ok_or(Fault::OutOfRangeAccess { pc, opcode, addr })?;
        *cell = value;
        Ok(())
    }

    /// The whole address space.
    pub const fn memory(&self) -> &[u8] {
        &self.memory
    }

    /// Copies a program image into memory starting at address 0.
    ///
    /// Bytes past the end of the image keep whatever they held before, so
    /// loading a second, shorter program leaves the tail of the first one in
    /// place. Build a fresh machine when runs need to be independent.
    ///
    /// # Arguments
    ///
    /// * `program` - Encoded instructions and operands.
    ///
    /// # Errors
    ///
    /// [`Fault::ProgramTooLarge`] if the image exceeds memory. Memory is left
    /// untouched and the machine moves to `Faulted`.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Fault> {
        if program.len() > MEMORY_SIZE {
            return Err(self.fault(Fault::ProgramTooLarge {
                len: program.len(),
                capacity: MEMORY_SIZE,
            }));
        }

        self.memory[..program.len()].copy_from_slice(program);
        self.program_len = program.len();
        debug!(bytes = program.len(), "program loaded");
        Ok(())
    }
}
