//! Execution units.

/// Arithmetic logic unit (wrapping 8-bit ADD and MUL).
pub mod alu;
