//! Arithmetic Logic Unit (ALU).
//!
//! The LS-8 defines two ALU operations, ADD and MUL, over 8-bit registers.
//! Both wrap modulo 256 exactly as unsigned byte arithmetic does, so the
//! result never depends on the width of a host integer type.

/// ALU operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping multiplication.
    Mul,
}

/// Arithmetic Logic Unit for 8-bit register operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand (also the destination register's value).
    /// * `b`  - Second operand.
    ///
    /// # Returns
    ///
    /// The result truncated to 8 bits.
    ///
    /// # Examples
    ///
    /// ```
    /// use ls8_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 250, 10), 4);
    /// assert_eq!(Alu::execute(AluOp::Mul, 200, 2), 144);
    /// ```
    pub const fn execute(op: AluOp, a: u8, b: u8) -> u8 {
        match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Mul => a.wrapping_mul(b),
        }
    }
}
