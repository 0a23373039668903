//! Main Execution Loop.
//!
//! This module implements the fetch-decode-execute cycle. It performs the following:
//! 1. **Fetch/Decode:** Table-driven decode of the instruction at PC.
//! 2. **Dispatch:** An exhaustive `match` over [`Opcode`] selects the instruction semantics.
//! 3. **PC Control:** Falls through by the instruction length, or jumps for CALL/RET.
//! 4. **State Transitions:** `Running` to `Halted` on HALT, to `Faulted` on any fault.
//! 5. **Observability:** Per-instruction trace events and execution statistics.

use std::io::Write;

use tracing::{debug, trace};

use super::{Machine, State};
use crate::common::{Fault, Reg};
use crate::core::units::alu::{Alu, AluOp};
use crate::isa::{Instruction, Opcode, decode};

/// Where the PC goes after an instruction.
enum Flow {
    /// Fall through to the next instruction.
    Next,
    /// Jump to an absolute address.
    Jump(u8),
    /// Stop executing.
    Halt,
}

impl<W: Write> Machine<W> {
    /// Executes a single instruction.
    ///
    /// On a halted machine this does nothing and returns `Halted`. On a
    /// faulted machine it returns the recorded fault again without executing.
    ///
    /// # Returns
    ///
    /// The state after the instruction: `Running` or `Halted`.
    ///
    /// # Errors
    ///
    /// Any [`Fault`] raised by the instruction. The machine is left in
    /// `Faulted` and will not execute again.
    pub fn step(&mut self) -> Result<State, Fault> {
        match &self.state {
            State::Running => {}
            State::Halted => return Ok(State::Halted),
            State::Faulted(fault) => return Err(fault.clone()),
        }

        match self.execute_next() {
            Ok(()) => Ok(self.state.clone()),
            Err(fault) => Err(self.fault(fault)),
        }
    }

    /// Runs until the machine halts or faults.
    ///
    /// Programs that never halt make this loop forever; use [`Machine::run_for`]
    /// to bound the number of steps.
    ///
    /// # Errors
    ///
    /// The fault that stopped execution.
    pub fn run(&mut self) -> Result<(), Fault> {
        while self.step()?.is_running() {}
        Ok(())
    }

    /// Runs for at most `max_steps` instructions.
    ///
    /// # Returns
    ///
    /// `Halted` if the program halted within the budget, `Running` if the
    /// budget ran out first.
    ///
    /// # Errors
    ///
    /// The fault that stopped execution.
    pub fn run_for(&mut self, max_steps: u64) -> Result<State, Fault> {
        if let State::Faulted(fault) = &self.state {
            return Err(fault.clone());
        }

        for _ in 0..max_steps {
            if !self.step()?.is_running() {
                break;
            }
        }
        Ok(self.state.clone())
    }

    /// One fetch-decode-execute cycle.
    ///
    /// Every check runs before the instruction's first effect, so on error
    /// registers, SP, memory, PC and output are as they were before the cycle.
    /// Does not touch `state` on error.
    fn execute_next(&mut self) -> Result<(), Fault> {
        let pc = self.pc;
        let inst = decode(&self.memory, pc)?;

        trace!("{pc:02X} | {inst:<10} | {}", self.regs);

        // HALT and RET never read `next`.
        let next = if inst.opcode.has_successor() {
            self.fall_through(&inst)?
        } else {
            pc
        };

        let flow = match inst.opcode {
            Opcode::Ldi => {
                let dst = self.reg_operand(&inst, inst.a())?;
                self.regs.write(dst, inst.b());
                Flow::Next
            }
            Opcode::Add => self.alu(AluOp::Add, &inst)?,
            Opcode::Mul => self.alu(AluOp::Mul, &inst)?,
            Opcode::Prn => {
                let src = self.reg_operand(&inst, inst.a())?;
                writeln!(self.output, "{}", self.regs.read(src)).map_err(|e| Fault::Output {
                    pc,
                    reason: e.to_string(),
                })?;
                Flow::Next
            }
            Opcode::Push => {
                let src = self.reg_operand(&inst, inst.a())?;
                self.push(self.regs.read(src))?;
                Flow::Next
            }
            Opcode::Pop => {
                let dst = self.reg_operand(&inst, inst.a())?;
                let value = self.pop()?;
                self.regs.write(dst, value);
                Flow::Next
            }
            Opcode::Call => {
                let target = self.regs.read(self.reg_operand(&inst, inst.a())?);
                self.push(next)?;
                Flow::Jump(target)
            }
            Opcode::Ret => Flow::Jump(self.pop()?),
            Opcode::Halt => Flow::Halt,
        };

        match flow {
            Flow::Next => self.pc = next,
            Flow::Jump(target) => self.pc = target,
            Flow::Halt => {
                debug!(pc, "halted");
                self.state = State::Halted;
            }
        }

        self.stats.record(inst.opcode);
        Ok(())
    }

    /// `reg[a] = reg[a] <op> reg[b]`, wrapping.
    fn alu(&mut self, op: AluOp, inst: &Instruction) -> Result<Flow, Fault> {
        let dst = self.reg_operand(inst, inst.a())?;
        let src = self.reg_operand(inst, inst.b())?;
        let result = Alu::execute(op, self.regs.read(dst), self.regs.read(src));
        self.regs.write(dst, result);
        Ok(Flow::Next)
    }

    /// Address of the instruction following `inst`.
    ///
    /// # Errors
    ///
    /// [`Fault::OutOfRangeAccess`] if that address is past the end of memory.
    fn fall_through(&self, inst: &Instruction) -> Result<u8, Fault> {
        let next = self.pc as usize + inst.encoded_len();
        u8::try_from(next).map_err(|_| Fault::OutOfRangeAccess {
            pc: self.pc,
            opcode: inst.opcode.byte(),
            addr: next,
        })
    }

    /// Validates a register operand of `inst`.
    fn reg_operand(&self, inst: &Instruction, index: u8) -> Result<Reg, Fault> {
        Reg::new(index).ok_or(Fault::InvalidRegister {
            pc: self.pc,
            opcode: inst.opcode.byte(),
            index,
        })
    }
}
