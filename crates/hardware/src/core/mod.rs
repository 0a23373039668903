//! Core machine implementation.
//!
//! This module contains the LS-8 machine (state, memory, stack and the
//! fetch-decode-execute loop) and its execution units.

/// The machine: state, memory, stack and execution loop.
pub mod machine;

/// Execution units (ALU).
pub mod units;

pub use self::machine::{Machine, State};
