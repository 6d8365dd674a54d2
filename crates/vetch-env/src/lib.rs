//! # vetch-env
//!
//! Reads the installed distributions of a Python environment.
//!
//! - `discovery`: locating `site-packages` directories
//! - `markers`: environment markers of the target interpreter
//! - `metadata`: parsing `METADATA`, `PKG-INFO` and `requires.txt`
//! - `loader`: scanning directories into a `StaticEnvironment`

pub mod discovery;
pub mod loader;
pub mod markers;
pub mod metadata;

pub use discovery::SiteDiscovery;
pub use loader::{load_environment, SitePackagesLoader};
pub use markers::InterpreterMarkers;
pub use metadata::{parse_metadata, parse_requires_txt, DistributionMetadata};
