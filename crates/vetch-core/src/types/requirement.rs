//! Requirements: named version constraints on another package.
//!
//! A requirement is either an edge declared by an installed package or an
//! entry loaded from a requirement or lock file.

use super::dependency::{Dependency, IgnoreList};
use super::distribution::RequirementSpec;
use super::package::Package;
use super::version::{NamedVersions, RequiredVersion, VersionData};
use crate::collection::RequirementCollection;
use crate::environment::Environment;
use crate::error::VetchResult;
use crate::utils::canonical_key;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Settings that decide whether an unsatisfied requirement is a conflict
#[derive(Debug, Clone, Default)]
pub struct ConflictPolicy {
    /// Exempt installed versions matching `named_versions` from conflicts
    pub allow_named_versions: bool,
    pub named_versions: NamedVersions,
}

/// A named version constraint
#[derive(Debug, Clone)]
pub struct Requirement {
    pub key: String,
    pub name: String,
    pub version: RequiredVersion,
    ignore_list: IgnoreList,
}

impl Requirement {
    /// Create a requirement with an empty ignore list
    pub fn new(name: impl Into<String>, version: RequiredVersion) -> Self {
        let name = name.into();
        Self {
            key: canonical_key(&name),
            name,
            version,
            ignore_list: IgnoreList::default(),
        }
    }

    /// Replace the ignore list used when expanding this requirement
    pub fn with_ignore_list(mut self, ignore_list: IgnoreList) -> Self {
        self.ignore_list = ignore_list;
        self
    }

    /// Materialise a parsed requirement spec
    pub fn from_spec(spec: &RequirementSpec, ignore_list: IgnoreList) -> Self {
        Self {
            key: spec.key.clone(),
            name: spec.name.clone(),
            version: spec.version.clone(),
            ignore_list,
        }
    }

    /// Parse a requirement string such as `requests>=2.0`
    pub fn from_requirement_string(input: &str) -> VetchResult<Self> {
        let spec = RequirementSpec::parse(input)?;
        Ok(Self::from_spec(&spec, IgnoreList::default()))
    }

    /// Pin a requirement to the installed version of a package
    pub fn from_package(package: &Package) -> Self {
        Self {
            key: package.key.clone(),
            name: package.name.clone(),
            version: RequiredVersion::from(&package.version),
            ignore_list: package.ignore_list().clone(),
        }
    }

    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore_list
    }

    /// Constraint specifier (`>=1.0`, `==2.0.0`, `Any`)
    pub fn specified_version(&self) -> String {
        self.version.specifier()
    }

    /// Installed package with the same key, if any
    pub fn package(&self, env: &dyn Environment) -> Option<Package> {
        env.distribution(&self.key)
            .map(|source| Package::from_distribution(source, self.ignore_list.clone()))
    }

    /// Requirements of the installed package, empty when not installed
    pub fn requirements(&self, env: &dyn Environment) -> RequirementCollection {
        self.package(env)
            .map(|package| package.requirements())
            .unwrap_or_default()
    }

    /// Installed version identifier, `None` when absent or undetermined
    pub fn version_id(&self, env: &dyn Environment) -> Option<String> {
        self.package(env)
            .and_then(|package| package.version_id().map(str::to_string))
    }

    /// Whether the installed version fails this requirement.
    ///
    /// A requirement conflicts only when its package is installed with a
    /// known version that does not satisfy the constraint, and the version
    /// is not an allowed named version.
    pub fn conflicting(&self, env: &dyn Environment, policy: &ConflictPolicy) -> bool {
        let Some(package) = self.package(env) else {
            return false;
        };
        if package.version.is_any() {
            return false;
        }
        if policy.allow_named_versions && package.version.is_named(&policy.named_versions) {
            return false;
        }

        !self.version.satisfied_by(&package.version)
    }
}

impl Dependency for Requirement {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn specified_version(&self) -> String {
        Requirement::specified_version(self)
    }

    fn requirements(&self, env: &dyn Environment) -> RequirementCollection {
        Requirement::requirements(self, env)
    }

    fn package(&self, env: &dyn Environment) -> Option<Package> {
        Requirement::package(self, env)
    }
}

impl PartialEq for Requirement {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.version == other.version
    }
}

impl Eq for Requirement {}

/// Ordered by key, then by version identifier
impl Ord for Requirement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.version.id().cmp(&other.version.id()))
    }
}

impl PartialOrd for Requirement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Requirement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version.id() {
            Some(spec) => write!(f, "{}{}", self.key, spec),
            None => f.write_str(&self.key),
        }
    }
}
