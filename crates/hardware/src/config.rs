//! Configuration system for the LS-8 emulator.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline constants (stack top, tracing off, no step budget).
//! 2. **Structures:** `machine` settings consumed by [`Machine`](crate::Machine)
//!    and `run` settings consumed by whoever drives the run loop.
//! 3. **Loading:** JSON parsing with validation.
//!
//! Every field is optional in JSON; missing fields take their defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    use crate::common::constants::DEFAULT_STACK_TOP;

    /// Initial stack pointer.
    pub const STACK_TOP: u8 = DEFAULT_STACK_TOP;

    /// Instruction tracing is off unless requested.
    pub const TRACE: bool = false;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use ls8_core::config::Config;
///
/// let json = r#"{ "machine": { "stack_top": 200 }, "run": { "max_steps": 1000 } }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.machine.stack_top, 200);
/// assert_eq!(config.run.max_steps, Some(1000));
/// assert!(!config.run.trace);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Machine geometry.
    pub machine: MachineConfig,
    /// Run-loop settings.
    pub run: RunConfig,
}

/// Machine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Initial stack pointer; the stack grows down from here.
    pub stack_top: u8,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            stack_top: defaults::STACK_TOP,
        }
    }
}

/// Run-loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Stop after this many instructions. `None` runs until HALT or a fault.
    pub max_steps: Option<u64>,
    /// Emit a trace event for every executed instruction.
    pub trace: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            trace: defaults::TRACE,
        }
    }
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed JSON or unknown keys, or a
    /// validation error (see [`Config::validate`]).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks settings that parse but cannot be honoured.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroStepBudget`] if `run.max_steps` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.run.max_steps, Some(0)) {
            return Err(ConfigError::ZeroStepBudget);
        }
        Ok(())
    }
}
