//! LS-8 Machine Definition and Initialization.
//!
//! This module defines the `Machine` structure, the container for the entire
//! emulated computer. It coordinates the following:
//! 1. **State Management:** Memory, register file, program counter and execution state.
//! 2. **Execution:** The fetch-decode-execute loop (see [`execution`]).
//! 3. **Memory Access:** Bounds-checked reads and writes and program loading (see [`memory`]).
//! 4. **Stack:** Push and pop with overflow and underflow detection (see [`stack`]).
//!
//! A `Machine` is single-threaded and owns all of its state; hosts that want
//! several emulated machines create one instance per machine.

/// Fetch-decode-execute loop and instruction semantics.
pub mod execution;

/// Memory access and program loading.
pub mod memory;

/// Stack push/pop.
pub mod stack;

use std::io::{self, Stdout, Write};

use crate::common::constants::MEMORY_SIZE;
use crate::common::{Fault, RegisterFile};
use crate::config::Config;
use crate::stats::ExecStats;

/// Execution state of a [`Machine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum State {
    /// Instructions are being executed.
    Running,
    /// A HALT instruction was executed.
    Halted,
    /// Execution stopped on a fault. There is no way back to `Running`.
    Faulted(Fault),
}

impl State {
    /// Whether the machine will execute another instruction.
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// The LS-8 machine.
///
/// Generic over the sink that receives PRN output; [`Machine::new`] writes to
/// standard output, tests typically use a `Vec<u8>`.
#[derive(Debug)]
pub struct Machine<W = Stdout> {
    memory: [u8; MEMORY_SIZE],
    regs: RegisterFile,
    pc: u8,
    state: State,
    /// Length of the last loaded program; the stack may not grow into it.
    program_len: usize,
    stack_top: u8,
    stats: ExecStats,
    output: W,
}

impl Machine<Stdout> {
    /// Creates a machine with the default configuration, printing to standard output.
    pub fn new() -> Self {
        Self::with_output(&Config::default(), io::stdout())
    }
}

impl Default for Machine<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Machine<W> {
    /// Creates a machine with zeroed memory and registers.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine configuration (stack top).
    /// * `output` - Sink for PRN output.
    pub fn with_output(config: &Config, output: W) -> Self {
        let stack_top = config.machine.stack_top;
        Self {
            memory: [0; MEMORY_SIZE],
            regs: RegisterFile::new(stack_top),
            pc: 0,
            state: State::Running,
            program_len: 0,
            stack_top,
            stats: ExecStats::default(),
            output,
        }
    }

    /// Current execution state.
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Current program counter.
    pub const fn pc(&self) -> u8 {
        self.pc
    }

    /// Current stack pointer.
    pub const fn sp(&self) -> u8 {
        self.regs.sp()
    }

    /// Reads a data register by index, `None` for the stack pointer slot or past the file.
    pub fn register(&self, index: usize) -> Option<u8> {
        self.regs.get(index)
    }

    /// The full register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Execution statistics gathered so far.
    pub const fn stats(&self) -> &ExecStats {
        &self.stats
    }

    /// The output sink.
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the machine and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// The byte at the current PC, i.e. the opcode of the instruction being executed.
    pub(crate) const fn opcode_at_pc(&self) -> u8 {
        self.memory[self.pc as usize]
    }

    /// Records a fault as the terminal state and hands it back for propagation.
    fn fault(&mut self, fault: Fault) -> Fault {
        tracing::warn!(%fault, "machine faulted");
        self.state = State::Faulted(fault.clone());
        fault
    }
}
