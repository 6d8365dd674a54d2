//! Ordered, key-deduplicated containers over packages and requirements.

mod cycles;
pub mod packages;
pub mod requirements;

pub use cycles::MAX_TRAVERSAL_DEPTH;
pub use packages::PackageCollection;
pub use requirements::RequirementCollection;
