//! Program image loading.
//!
//! Turns LS-8 program files into the byte sequences accepted by
//! [`Machine::load`](crate::Machine::load).

pub mod loader;
