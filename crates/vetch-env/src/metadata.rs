//! Core metadata (`METADATA` / `PKG-INFO`) and `requires.txt` parsing

use pep508_rs::MarkerEnvironment;
use tracing::{debug, warn};
use vetch_core::{Distribution, RequirementSpec, VetchError, VetchResult};

/// Fields read from a distribution's core metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionMetadata {
    pub name: String,
    pub version: Option<String>,
    pub requires_dist: Vec<String>,
}

impl DistributionMetadata {
    /// Build a distribution, skipping requirements whose marker fails in
    /// `markers` or that cannot be parsed.
    ///
    /// Extra-only requirements are always skipped. Without a marker
    /// environment every other marker is assumed to hold.
    pub fn into_distribution(self, markers: Option<&MarkerEnvironment>) -> Distribution {
        let mut distribution = Distribution::new(self.name, self.version.as_deref().unwrap_or(""));

        for requirement in &self.requires_dist {
            match RequirementSpec::parse(requirement) {
                Ok(spec) if spec.applies_to(markers) => {
                    distribution = distribution.with_requirement(spec)
                }
                Ok(spec) => debug!("{}: {} does not apply here", distribution.name, spec.key),
                Err(e) => warn!("{}: skipping requirement: {}", distribution.name, e),
            }
        }

        distribution
    }
}

/// Parse RFC 822 style core metadata headers.
///
/// Reading stops at the first blank line, which separates the headers
/// from the long description.
pub fn parse_metadata(content: &str, origin: &str) -> VetchResult<DistributionMetadata> {
    let mut metadata = DistributionMetadata::default();
    let mut name = None;

    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        // Folded continuation of the previous header
        if line.starts_with([' ', '\t']) {
            continue;
        }

        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match field.trim().to_ascii_lowercase().as_str() {
            "name" => name = Some(value.to_string()),
            "version" if !value.is_empty() => metadata.version = Some(value.to_string()),
            "requires-dist" => metadata.requires_dist.push(value.to_string()),
            _ => {}
        }
    }

    metadata.name = name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| VetchError::Metadata {
            path: origin.to_string(),
            message: "missing Name field".to_string(),
        })?;

    Ok(metadata)
}

/// Requirements of an egg-info `requires.txt`.
///
/// Unconditional lines come first. `[extra]` and `[extra:marker]` sections
/// are skipped while lines of a `[:marker]` section carry that marker.
pub fn parse_requires_txt(content: &str) -> Vec<String> {
    let mut requirements = Vec::new();
    let mut section: Option<Option<&str>> = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            section = Some(header.strip_prefix(':').map(str::trim));
            continue;
        }
        match section {
            None => requirements.push(line.to_string()),
            Some(Some(marker)) => requirements.push(format!("{} ; {}", line, marker)),
            Some(None) => {}
        }
    }

    requirements
}
