//! Core data types for vetch.
//!
//! This module provides the dependency model used throughout vetch:
//! - Version types for installed versions and version constraints
//! - Installed distributions and their declared requirements
//! - Package and Requirement entities keyed by canonical name

pub mod constraint;
pub mod dependency;
pub mod distribution;
pub mod package;
pub mod requirement;
pub mod version;

// Re-export all public types
pub use constraint::{Constraint, ConstraintSet, Op};
pub use dependency::{ignore_list, Dependency, IgnoreList};
pub use distribution::{Distribution, RequirementSpec};
pub use package::Package;
pub use requirement::{ConflictPolicy, Requirement};
pub use version::{
    strip_operators, InstalledVersion, NamedVersions, RequiredVersion, VersionData, ANY_VERSION,
    OPERATORS,
};
