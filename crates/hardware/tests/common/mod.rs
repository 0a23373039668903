//! Shared helpers for LS-8 tests.



pub use builder::Program;
pub use harness::TestContext;
