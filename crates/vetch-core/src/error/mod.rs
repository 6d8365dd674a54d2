//! Error types and result aliases for vetch operations.
//!
//! Provides a unified error type that covers every failure the analysis
//! pipeline can report, with actionable messages.

use thiserror::Error;

/// Unified error type for all vetch operations
#[derive(Error, Debug)]
pub enum VetchError {
    // Version and requirement errors
    #[error("Invalid requirement: \"{input}\"")]
    InvalidRequirement { input: String },

    #[error("Requirements parsing error in {path} (line {line}): {message}")]
    RequirementsParse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Invalid named version pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // Lookup errors
    #[error("Package \"{key}\" not found")]
    PackageNotFound { key: String },

    #[error("File \"{path}\" not found")]
    FileNotFound { path: String },

    // Config errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Environment errors
    #[error("Failed to read distribution metadata {path}: {message}")]
    Metadata { path: String, message: String },

    // Export errors
    #[error("Graph failed to render: {message}")]
    GraphRender {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for vetch operations
pub type VetchResult<T> = Result<T, VetchError>;

impl VetchError {
    /// Create an invalid requirement error carrying the offending input
    pub fn invalid_requirement(input: impl Into<String>) -> Self {
        Self::InvalidRequirement {
            input: input.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a rendering error from any error type
    pub fn graph_render<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::GraphRender {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if the error stems from user-supplied files or flags
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            VetchError::InvalidRequirement { .. }
                | VetchError::RequirementsParse { .. }
                | VetchError::FileNotFound { .. }
                | VetchError::InvalidPattern { .. }
                | VetchError::ConfigParse { .. }
                | VetchError::ConfigValidation { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            VetchError::InvalidRequirement { .. } | VetchError::RequirementsParse { .. } => {
                Some("Use one requirement per line in the form 'name' or 'name<op>version'")
            },
            VetchError::InvalidPattern { .. } => {
                Some("Check 'named_version_patterns' in your configuration for regex syntax errors")
            },
            VetchError::PackageNotFound { .. } => {
                Some("Run 'vetch list' to see the installed packages")
            },
            VetchError::FileNotFound { .. } => {
                Some("Pass existing files with -r/-l or run with --all to skip the default files")
            },
            VetchError::GraphRender { .. } => {
                Some("Make sure Graphviz is installed and the engine is on your PATH")
            },
            VetchError::Metadata { .. } => {
                Some("Point --site-packages at a healthy environment or reinstall the package")
            },
            _ => None,
        }
    }
}
