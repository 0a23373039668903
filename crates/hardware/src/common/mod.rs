//! Common utilities and types used throughout the LS-8 emulator.
//!
//! This module provides the building blocks shared by the machine, the ISA
//! and the loader. It includes:
//! 1. **Constants:** Memory and register file geometry.
//! 2. **Error Handling:** Machine faults and loader/config errors.
//! 3. **Register Management:** The register file with its named stack pointer.

/// Machine-wide constants.
pub mod constants;

/// Fault and error definitions.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{DEFAULT_STACK_TOP, MEMORY_SIZE};
pub use error::{ConfigError, Fault, LoadError};
pub use reg::{Reg, RegisterFile};
