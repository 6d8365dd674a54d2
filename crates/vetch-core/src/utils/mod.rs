//! Utility functions and helpers.
//!
//! Common functionality used across multiple vetch crates.

use pep508_rs::PackageName;
use std::str::FromStr;

/// Canonicalise a distribution name into its lookup key.
///
/// Keys follow PEP 503 normalisation, so `Zope.Interface` and
/// `zope_interface` share the key `zope-interface`. Names that are not
/// valid distribution names fall back to their lowercase form.
pub fn canonical_key(name: &str) -> String {
    let name = name.trim();
    PackageName::from_str(name)
        .map(|package| package.to_string())
        .unwrap_or_else(|_| name.to_lowercase())
}

/// Remove every whitespace character from a string
pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("Django"), "django");
        assert_eq!(canonical_key("zope.interface"), "zope-interface");
        assert_eq!(canonical_key("typing__extensions"), "typing-extensions");
        assert_eq!(canonical_key("ruamel.yaml.clib"), "ruamel-yaml-clib");
        assert_eq!(canonical_key("  Flask-SQLAlchemy "), "flask-sqlalchemy");
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" requests >= 2.0 , < 3 "), "requests>=2.0,<3");
        assert_eq!(strip_whitespace(""), "");
    }
}
