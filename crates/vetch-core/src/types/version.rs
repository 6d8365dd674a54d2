//! Installed and required version model.
//!
//! An `InstalledVersion` is the concrete version of a distribution found in
//! the environment. A `RequiredVersion` is a constraint placed on it. Both
//! carry the `Any` sentinel: an installed version that could not be
//! determined, or a requirement that does not constrain the version.
//!
//! Construction is explicit: callers pick `from_string`,
//! `from_constraint_set` or `from_native` depending on the shape they hold.

use super::constraint::{is_valid_version_token, ConstraintSet, Op};
use crate::error::{VetchError, VetchResult};
use crate::utils::strip_whitespace;
use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Sentinel for an undetermined or unconstrained version
pub const ANY_VERSION: &str = "Any";

/// Comparison operators removed by [`strip_operators`], in removal order
pub const OPERATORS: [&str; 6] = ["==", "!=", "<=", ">=", "<", ">"];

/// Remove every comparison operator token from a version string
pub fn strip_operators(version: &str) -> String {
    OPERATORS
        .iter()
        .fold(version.to_string(), |acc, op| acc.replace(op, ""))
}

/// Shared interface of installed and required versions
pub trait VersionData {
    /// Canonical identifier, `None` for the `Any` sentinel
    fn id(&self) -> Option<&str>;

    /// Specifier form used in requirement files (`==1.2.3`, `>=1.0`, `Any`)
    fn specifier(&self) -> String;

    /// Whether this is the `Any` sentinel
    fn is_any(&self) -> bool {
        self.id().is_none()
    }

    /// Whether the identifier matches one of the named version patterns
    fn is_named(&self, named_versions: &NamedVersions) -> bool {
        self.id().is_some_and(|id| named_versions.matches(id))
    }
}

/// Compiled named version patterns.
///
/// A pattern matches when it matches at the start of the version
/// identifier, e.g. `^[0-9a-f]{7,40}$` for commit references or `dev`
/// for `dev-branch` builds.
#[derive(Debug, Clone, Default)]
pub struct NamedVersions {
    patterns: Vec<Regex>,
}

impl NamedVersions {
    /// Compile patterns, rejecting the first invalid one
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> VetchResult<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern.as_ref()).map_err(|e| VetchError::InvalidPattern {
                    pattern: pattern.as_ref().to_string(),
                    message: e.to_string(),
                })
            })
            .collect::<VetchResult<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Check a version identifier against every pattern
    pub fn matches(&self, id: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.find(id).is_some_and(|m| m.start() == 0))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Concrete version of an installed distribution
#[derive(Debug, Clone, Default, Hash)]
pub struct InstalledVersion {
    id: Option<String>,
}

/// Version constraint placed on a dependency
#[derive(Debug, Clone, Default, Hash)]
pub struct RequiredVersion {
    id: Option<String>,
    constraints: ConstraintSet,
}

impl InstalledVersion {
    /// Version that could not be determined
    pub fn any() -> Self {
        Self { id: None }
    }

    /// Read a version from a string, stripping any operator prefix.
    ///
    /// PEP 440 versions are normalised (`1.0.0.RC1` becomes `1.0.0rc1`);
    /// anything else is kept verbatim as a named version.
    pub fn from_string(version: &str) -> Self {
        let cleaned = strip_operators(version);
        let cleaned = cleaned.trim();

        if cleaned.is_empty() || cleaned == ANY_VERSION {
            return Self::any();
        }

        let id = match Version::from_str(cleaned) {
            Ok(parsed) => parsed.to_string(),
            Err(_) => cleaned.to_string(),
        };
        Self { id: Some(id) }
    }

    /// Coerce a constraint set into the single version it pins.
    ///
    /// Anything other than exactly one clause is ambiguous and yields `Any`.
    pub fn from_constraint_set(constraints: &ConstraintSet) -> Self {
        match constraints.constraints.as_slice() {
            [constraint] => Self {
                id: Some(constraint.version.clone()),
            },
            _ => Self::any(),
        }
    }

    /// Wrap a parsed PEP 440 version
    pub fn from_native(version: &Version) -> Self {
        Self {
            id: Some(version.to_string()),
        }
    }
}

impl RequiredVersion {
    /// Requirement that does not constrain the version
    pub fn any() -> Self {
        Self {
            id: None,
            constraints: ConstraintSet::default(),
        }
    }

    /// Read a constraint from a string.
    ///
    /// A bare version is an implicit `==` pin. Expressions with operators,
    /// including comma-joined ones, are kept verbatim once every clause has
    /// been validated. Whitespace is ignored.
    pub fn from_string(version: &str) -> VetchResult<Self> {
        let compact = strip_whitespace(version);
        if compact.is_empty() || compact == ANY_VERSION {
            return Ok(Self::any());
        }

        if Op::split(&compact).is_some() || compact.contains(',') {
            let constraints = ConstraintSet::parse(&compact)?;
            return Ok(Self {
                id: Some(compact),
                constraints,
            });
        }

        if !is_valid_version_token(&compact) {
            return Err(VetchError::invalid_requirement(version));
        }

        let pinned = match Version::from_str(&compact) {
            Ok(parsed) => parsed.to_string(),
            Err(_) => compact,
        };
        let id = format!("{}{}", Op::Equal, pinned);
        let constraints = ConstraintSet::parse(&id)?;
        Ok(Self {
            id: Some(id),
            constraints,
        })
    }

    /// Build from an already parsed constraint set, empty meaning `Any`
    pub fn from_constraint_set(constraints: &ConstraintSet) -> Self {
        if constraints.is_empty() {
            return Self::any();
        }

        Self {
            id: Some(constraints.to_string()),
            constraints: constraints.clone(),
        }
    }

    /// Pin exactly to a parsed PEP 440 version
    pub fn from_native(version: &Version) -> Self {
        Self::pinned(&version.to_string())
    }

    fn pinned(version: &str) -> Self {
        let id = format!("{}{}", Op::Equal, version);
        let constraints = ConstraintSet::parse(&id).unwrap_or_default();
        Self {
            id: Some(id),
            constraints,
        }
    }

    /// Parsed clauses of this constraint
    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Check whether an installed version satisfies this constraint.
    ///
    /// Unconstrained requirements and undetermined installed versions are
    /// always satisfied. Versions that are not PEP 440 compliant fall back
    /// to string comparison for `==`, `===` and `!=`; ordering clauses
    /// cannot be decided for them and are treated as satisfied.
    pub fn satisfied_by(&self, installed: &InstalledVersion) -> bool {
        let (Some(required), Some(installed)) = (self.id.as_deref(), installed.id()) else {
            return true;
        };

        if let (Ok(specifiers), Ok(version)) = (
            VersionSpecifiers::from_str(required),
            Version::from_str(installed),
        ) {
            return specifiers.contains(&version);
        }

        self.constraints.iter().all(|constraint| match constraint.op {
            Op::Equal | Op::Arbitrary => matches_literal(&constraint.version, installed),
            Op::NotEqual => !matches_literal(&constraint.version, installed),
            _ => true,
        })
    }
}

fn matches_literal(expected: &str, installed: &str) -> bool {
    match expected.strip_suffix(".*") {
        Some(prefix) => installed.starts_with(prefix),
        None => expected == installed,
    }
}

impl VersionData for InstalledVersion {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn specifier(&self) -> String {
        match &self.id {
            Some(id) => format!("{}{}", Op::Equal, id),
            None => ANY_VERSION.to_string(),
        }
    }
}

impl VersionData for RequiredVersion {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn specifier(&self) -> String {
        self.id.clone().unwrap_or_else(|| ANY_VERSION.to_string())
    }
}

impl From<&InstalledVersion> for RequiredVersion {
    /// Pin a requirement to an installed version
    fn from(installed: &InstalledVersion) -> Self {
        match installed.id() {
            Some(id) => Self::pinned(id),
            None => Self::any(),
        }
    }
}

// Equality never holds when either side is the `Any` sentinel, so these
// relations are not reflexive and there is no `Eq`.

impl PartialEq for InstalledVersion {
    fn eq(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

impl PartialEq<RequiredVersion> for InstalledVersion {
    fn eq(&self, other: &RequiredVersion) -> bool {
        match (&self.id, &other.id) {
            (Some(installed), Some(required)) => *installed == strip_operators(required),
            _ => false,
        }
    }
}

impl PartialEq for RequiredVersion {
    fn eq(&self, other: &Self) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

impl PartialEq<InstalledVersion> for RequiredVersion {
    fn eq(&self, other: &InstalledVersion) -> bool {
        match (&self.id, &other.id) {
            (Some(required), Some(installed)) => *required == format!("{}{}", Op::Equal, installed),
            _ => false,
        }
    }
}

impl fmt::Display for InstalledVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.as_deref().unwrap_or(ANY_VERSION))
    }
}

impl fmt::Display for RequiredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.as_deref().unwrap_or(ANY_VERSION))
    }
}
