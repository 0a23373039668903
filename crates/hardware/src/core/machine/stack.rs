//! Stack push/pop.
//!
//! The stack grows downward from the configured stack top. SP points at the
//! most recently pushed byte; SP equal to the stack top means the stack is empty.

use std::io::Write;

use super::Machine;
use crate::common::Fault;

impl<W: Write> Machine<W> {
    /// Pushes a byte: `SP -= 1; memory[SP] = value`.
    ///
    /// # Errors
    ///
    /// [`Fault::StackOverflow`] if SP is already 0 or the new slot would land
    /// inside the loaded program. SP and memory are unchanged on error.
    pub(crate) fn push(&mut self, value: u8) -> Result<(), Fault> {
        let sp = self.regs.sp();
        let next = sp
            .checked_sub(1)
            .filter(|&next| next as usize >= self.program_len)
            .ok_or(Fault::StackOverflow {
                pc: self.pc,
                opcode: self.opcode_at_pc(),
                sp,
            })?;

        self.write(next as usize, value)?;
        self.regs.set_sp(next);
        Ok(())
    }

    /// Pops a byte: `value = memory[SP]; SP += 1`.
    ///
    /// # Errors
    ///
    /// [`Fault::StackUnderflow`] if the stack is empty.
    pub(crate) fn pop(&mut self) -> Result<u8, Fault> {
        let sp = self.regs.sp();
        if sp >= self.stack_top {
            return Err(Fault::StackUnderflow {
                pc: self.pc,
                opcode: self.opcode_at_pc(),
                sp,
            });
        }

        let value = self.read(sp as usize)?;
        self.regs.set_sp(sp + 1);
        Ok(value)
    }
}
