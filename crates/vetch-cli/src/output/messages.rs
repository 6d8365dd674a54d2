//! User-facing message text.

pub const PACKAGE: &str = "Package";
pub const REQUIRED: &str = "Required";
pub const LOCKED: &str = "Locked";
pub const REQUIRED_BY: &str = "Required by";
pub const INSTALLED: &str = "Installed";
pub const REQUIREMENTS: &str = "Requirements";
pub const PACKAGES_NOT_FOUND: &str = "No packages found";

pub const CONFLICTS_OK: &str = "No conflicts found";
pub const CONFLICTS_FOUND: &str = "Conflicting packages found";

pub const CYCLIC_OK: &str = "No cyclic dependencies found";
pub const CYCLIC_FOUND: &str = "Cyclic dependencies found";

pub const MISSING_OK: &str = "No missing dependencies found";
pub const MISSING_FOUND: &str = "Missing dependencies found";

pub const PACKAGE_VERSION_MISMATCH_FOUND: &str = "Package version mismatch found";
pub const PACKAGE_VERSION_MISMATCH_OK: &str = "All package versions matching";

pub const REQUIREMENT_VERSION_MISMATCH_FOUND: &str = "Requirement version mismatch found";
pub const REQUIREMENT_VERSION_MISMATCH_OK: &str = "All requirement versions matching";

pub const PACKAGE_NOT_REQUIRED_FOUND: &str = "Non-required packages found";
pub const PACKAGE_NOT_REQUIRED_OK: &str = "No non-required packages found";

pub const LOCK_NOT_REQUIRED_FOUND: &str = "Non-required locks found";
pub const LOCK_NOT_REQUIRED_OK: &str = "No non-required locks found";

pub const UNSET_LOCKS_FOUND: &str = "Unset locks found";
pub const UNSET_LOCKS_OK: &str = "No unset locks found";

pub const UNLOCKED_REQUIREMENTS_FOUND: &str = "Unlocked requirements found";
pub const UNLOCKED_REQUIREMENTS_OK: &str = "All set requirements locked";

pub fn file_not_found(path: &str) -> String {
    format!("File \"{}\" not found", path)
}

pub fn graph_exported(path: &str) -> String {
    format!("Graph exported to \"{}\"", path)
}

pub fn lock_exported(path: &str) -> String {
    format!("Lock file exported to \"{}\"", path)
}
