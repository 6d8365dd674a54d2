//! Installed distributions and the requirement strings they declare.

use super::version::{InstalledVersion, RequiredVersion};
use crate::error::{VetchError, VetchResult};
use crate::utils::{canonical_key, strip_whitespace};
use pep508_rs::{MarkerEnvironment, MarkerTree, Requirement, VerbatimUrl, VersionOrUrl};
use std::str::FromStr;

/// A `(name, constraint)` pair as written in a requirement file or in
/// distribution metadata
#[derive(Debug, Clone)]
pub struct RequirementSpec {
    pub key: String,
    pub name: String,
    pub version: RequiredVersion,
    /// Environment marker, always true when none was written
    pub marker: MarkerTree,
}

/// An installed distribution with its declared requirements
#[derive(Debug, Clone)]
pub struct Distribution {
    pub key: String,
    pub name: String,
    pub version: InstalledVersion,
    pub requires: Vec<RequirementSpec>,
}

impl RequirementSpec {
    /// Create a spec from a display name and constraint
    pub fn new(name: impl Into<String>, version: RequiredVersion) -> Self {
        let name = name.into();
        Self {
            key: canonical_key(&name),
            name,
            version,
            marker: MarkerTree::default(),
        }
    }

    /// Parse a PEP 508 requirement string.
    ///
    /// Extras are dropped, a direct URL reference is unconstrained and the
    /// environment marker is kept for [`RequirementSpec::applies_to`].
    pub fn parse(input: &str) -> VetchResult<Self> {
        let trimmed = input.trim();
        let requirement = Requirement::<VerbatimUrl>::from_str(trimmed)
            .map_err(|_| VetchError::invalid_requirement(input))?;

        let version = match &requirement.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specifiers)) => {
                RequiredVersion::from_string(&strip_whitespace(&specifiers.to_string()))
                    .map_err(|_| VetchError::invalid_requirement(input))?
            }
            Some(VersionOrUrl::Url(_)) | None => RequiredVersion::any(),
        };

        Ok(Self {
            key: requirement.name.to_string(),
            name: display_name(trimmed).to_string(),
            version,
            marker: requirement.marker,
        })
    }

    /// Whether the marker holds in `env`.
    ///
    /// Extra-only requirements never apply. Without an environment every
    /// other marker is assumed to hold.
    pub fn applies_to(&self, env: Option<&MarkerEnvironment>) -> bool {
        self.marker.evaluate_optional_environment(env, &[])
    }
}

/// Name as written, before extras, constraints or markers
fn display_name(input: &str) -> &str {
    let end = input
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
        .unwrap_or(input.len());
    &input[..end]
}

impl Distribution {
    /// Create a distribution without requirements
    pub fn new(name: impl Into<String>, version: &str) -> Self {
        let name = name.into();
        Self {
            key: canonical_key(&name),
            name,
            version: InstalledVersion::from_string(version),
            requires: Vec::new(),
        }
    }

    /// Add a declared requirement given as a requirement string
    pub fn requiring(mut self, requirement: &str) -> VetchResult<Self> {
        self.requires.push(RequirementSpec::parse(requirement)?);
        Ok(self)
    }

    /// Add an already parsed requirement
    pub fn with_requirement(mut self, requirement: RequirementSpec) -> Self {
        self.requires.push(requirement);
        self
    }
}
