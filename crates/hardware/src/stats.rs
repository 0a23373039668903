//! Execution statistics.
//!
//! This module tracks what a program did while it ran. It provides:
//! 1. **Retired count:** Number of instructions that completed without faulting.
//! 2. **Instruction mix:** Per-opcode counts, in [`Opcode::ALL`] order.

use std::fmt;

use crate::isa::Opcode;

/// Execution statistics for one machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecStats {
    /// Number of instructions retired.
    pub instructions_retired: u64,
    by_opcode: [u64; Opcode::COUNT],
}

impl ExecStats {
    /// Counts one retired instruction.
    pub const fn record(&mut self, opcode: Opcode) {
        self.instructions_retired += 1;
        self.by_opcode[opcode.index()] += 1;
    }

    /// Number of retired instructions with the given opcode.
    pub const fn count(&self, opcode: Opcode) -> u64 {
        self.by_opcode[opcode.index()]
    }

    /// Opcodes that retired at least once, with their counts.
    pub fn mix(&self) -> impl Iterator<Item = (Opcode, u64)> + '_ {
        Opcode::ALL
            .iter()
            .map(|&op| (op, self.count(op)))
            .filter(|&(_, n)| n > 0)
    }
}

impl fmt::Display for ExecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} instructions retired", self.instructions_retired)?;
        let mut sep = " (";
        for (op, n) in self.mix() {
            write!(f, "{sep}{op} {n}")?;
            sep = ", ";
        }
        if sep == ", " {
            f.write_str(")")?;
        }
        Ok(())
    }
}
