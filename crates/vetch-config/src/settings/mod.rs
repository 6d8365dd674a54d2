//! Effective configuration values and their defaults

use crate::ConfigResult;
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vetch_core::error::VetchError;
use vetch_core::{ignore_list, ConflictPolicy, IgnoreList, NamedVersions, ANY_VERSION};

/// A check run by `vetch check`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Check {
    Conflicts,
    Cyclic,
    Missing,
    Validate,
}

/// Complete, effective configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Requirement file format
    pub format: String,

    /// Text shown for undetermined or unconstrained versions
    pub any_version: String,

    /// Checks run by `vetch check`
    pub checks: Vec<Check>,

    /// Package keys excluded from every analysis
    pub ignore_list: Vec<String>,

    /// Exempt named versions from conflict detection
    pub allow_named_versions: bool,

    /// Regular expressions recognising named versions
    pub named_version_patterns: Vec<String>,

    /// Requirement files read when none are given on the command line
    pub requirements_files: Vec<Utf8PathBuf>,

    /// Lock files read when none are given on the command line
    pub lock_files: Vec<Utf8PathBuf>,

    /// Where `vetch lock --save` writes
    pub lock_file_path: Utf8PathBuf,

    /// Graph export defaults
    pub graph: GraphSettings,
}

/// Graph export defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSettings {
    pub name: String,
    pub filename: Option<String>,
    pub format: String,
    pub engine: String,
    pub strict: bool,
    pub attributes: IndexMap<String, String>,
    pub node_attributes: IndexMap<String, String>,
    pub edge_attributes: IndexMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: "pip".to_string(),
            any_version: ANY_VERSION.to_string(),
            checks: vec![Check::Conflicts, Check::Cyclic, Check::Missing, Check::Validate],
            ignore_list: ["vetch", "pip", "setuptools", "wheel"]
                .into_iter()
                .map(String::from)
                .collect(),
            allow_named_versions: false,
            named_version_patterns: Vec::new(),
            requirements_files: vec![Utf8PathBuf::from("requirements.txt")],
            lock_files: vec![Utf8PathBuf::from("requirements.lock")],
            lock_file_path: Utf8PathBuf::from("requirements.lock"),
            graph: GraphSettings::default(),
        }
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            name: "vetch-graph".to_string(),
            filename: None,
            format: "pdf".to_string(),
            engine: "dot".to_string(),
            strict: true,
            attributes: IndexMap::new(),
            node_attributes: IndexMap::from([("shape".to_string(), "box3d".to_string())]),
            edge_attributes: IndexMap::from([("fontsize".to_string(), "10".to_string())]),
        }
    }
}

impl Settings {
    /// Shared ignore list for packages and requirements
    pub fn ignore_list(&self) -> IgnoreList {
        ignore_list(&self.ignore_list)
    }

    /// Compile the named version patterns into a conflict policy
    pub fn conflict_policy(&self) -> ConfigResult<ConflictPolicy> {
        Ok(ConflictPolicy {
            allow_named_versions: self.allow_named_versions,
            named_versions: NamedVersions::compile(&self.named_version_patterns)?,
        })
    }

    /// Text for a version identifier, the `any_version` text when absent
    pub fn display_version<'a>(&'a self, id: Option<&'a str>) -> &'a str {
        id.unwrap_or(&self.any_version)
    }

    /// Text for a constraint specifier, the `any_version` text for an
    /// unconstrained one
    pub fn display_specifier<'a>(&'a self, specifier: &'a str) -> &'a str {
        if specifier == ANY_VERSION {
            &self.any_version
        } else {
            specifier
        }
    }

    /// Check values that cannot be expressed through types
    pub fn validate(&self) -> ConfigResult<()> {
        crate::requirements::format_for(&self.format)?;
        self.conflict_policy()?;

        for (field, value) in [
            ("any_version", &self.any_version),
            ("graph.name", &self.graph.name),
            ("graph.format", &self.graph.format),
            ("graph.engine", &self.graph.engine),
        ] {
            if value.trim().is_empty() {
                return Err(VetchError::ConfigValidation {
                    field: field.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Pretty JSON rendering of the effective settings
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| VetchError::ConfigParse {
            message: e.to_string(),
        })
    }
}

impl Check {
    pub fn as_str(&self) -> &'static str {
        match self {
            Check::Conflicts => "conflicts",
            Check::Cyclic => "cyclic",
            Check::Missing => "missing",
            Check::Validate => "validate",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Check {
    type Err = VetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conflicts" => Ok(Check::Conflicts),
            "cyclic" => Ok(Check::Cyclic),
            "missing" => Ok(Check::Missing),
            "validate" => Ok(Check::Validate),
            other => Err(VetchError::ConfigValidation {
                field: "checks".to_string(),
                reason: format!(
                    "unknown check '{}', expected one of conflicts, cyclic, missing, validate",
                    other
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.format, "pip");
        assert_eq!(settings.any_version, "Any");
        assert_eq!(settings.checks.len(), 4);
        assert!(settings.ignore_list().contains("setuptools"));
        assert!(!settings.allow_named_versions);
        assert_eq!(settings.lock_file_path, Utf8PathBuf::from("requirements.lock"));
        assert_eq!(settings.graph.engine, "dot");
        assert!(settings.graph.strict);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_conflict_policy_compiles_patterns() {
        let settings = Settings {
            allow_named_versions: true,
            named_version_patterns: vec!["^dev".to_string()],
            ..Settings::default()
        };
        let policy = settings.conflict_policy().unwrap();
        assert!(policy.allow_named_versions);
        assert_eq!(policy.named_versions.len(), 1);

        let invalid = Settings {
            named_version_patterns: vec!["[".to_string()],
            ..Settings::default()
        };
        assert!(matches!(
            invalid.validate(),
            Err(VetchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_format() {
        let settings = Settings {
            format: "poetry".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(VetchError::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_display_version() {
        let settings = Settings {
            any_version: "*".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.display_version(Some("1.0")), "1.0");
        assert_eq!(settings.display_version(None), "*");
        assert_eq!(settings.display_specifier(">=1.0"), ">=1.0");
        assert_eq!(settings.display_specifier("Any"), "*");
    }

    #[test]
    fn test_to_json() {
        let json = Settings::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["format"], "pip");
        assert_eq!(value["checks"][0], "conflicts");
        assert_eq!(value["graph"]["node_attributes"]["shape"], "box3d");
        assert!(value["graph"]["filename"].is_null());
    }

    #[test]
    fn test_check_from_str() {
        assert_eq!("Cyclic".parse::<Check>().unwrap(), Check::Cyclic);
        assert!("lint".parse::<Check>().is_err());
    }
}
