//! # vetch-core
//!
//! Core types shared across all vetch crates.
//!
//! This crate provides:
//! - `InstalledVersion` and `RequiredVersion`, the two faces of the version model
//! - `Package` and `Requirement`, keyed by canonical lowercase name
//! - `PackageCollection` and `RequirementCollection` with set algebra,
//!   transitive flattening and cycle detection
//! - The `Environment` trait describing an installed package set
//! - `VetchError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Version model and dependency entities
//! - `collection`: Ordered, key-deduplicated containers
//! - `environment`: Installed distribution source
//! - `error`: Error types and result aliases
//! - `utils`: Name canonicalisation helpers

pub mod collection;
pub mod environment;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use collection::{PackageCollection, RequirementCollection};
pub use environment::{Environment, StaticEnvironment};
pub use error::{VetchError, VetchResult};
pub use types::{
    ignore_list, ConflictPolicy, ConstraintSet, Dependency, Distribution, IgnoreList,
    InstalledVersion, NamedVersions, Package, RequiredVersion, Requirement, RequirementSpec,
    VersionData, ANY_VERSION,
};
