//! Configuration and requirement files for vetch
//!
//! This crate loads the layered `Settings` value threaded through every
//! command, and reads and writes requirement and lock files through a
//! pluggable `RequirementFormat`.

pub mod merge;
pub mod requirements;
pub mod settings;

// Re-export main types
pub use merge::{CliOverrides, ConfigLayering, ConfigLoader, ConfigSource};
pub use requirements::{
    format_for, load_requirements_file, load_requirements_files, missing_files, save_lock_file,
    PipFormat, RequirementFormat,
};
pub use settings::{Check, GraphSettings, Settings};

use vetch_core::error::VetchError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, VetchError>;
