//! # Unit Components
//!
//! Fine-grained tests for each building block of the emulator.






/// Unit tests for execution statistics.
pub mod stats;
