//! Version constraint expressions.
//!
//! A constraint set is the comma-joined AND-composition of single clauses
//! such as `>=1.0,<2.0`. Parsing only validates the shape of each clause;
//! evaluation is delegated to PEP 440 semantics by the version model.

use crate::error::{VetchError, VetchResult};
use std::fmt;

/// Comparison operator of a single constraint clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Equal,      // ==1.0
    NotEqual,   // !=1.0
    LessEq,     // <=1.0
    GreaterEq,  // >=1.0
    Less,       // <1.0
    Greater,    // >1.0
    Compatible, // ~=1.0
    Arbitrary,  // ===1.0
}

/// Single `<op><version>` clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub op: Op,
    pub version: String,
}

/// Comma-joined list of constraint clauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConstraintSet {
    pub constraints: Vec<Constraint>,
}

impl Op {
    /// Split a leading operator token off a clause
    pub fn split(clause: &str) -> Option<(Op, &str)> {
        // Longest tokens first so `===` is not read as `==` followed by `=`
        if let Some(rest) = clause.strip_prefix("===") {
            Some((Op::Arbitrary, rest))
        } else if let Some(rest) = clause.strip_prefix("~=") {
            Some((Op::Compatible, rest))
        } else if let Some(rest) = clause.strip_prefix("==") {
            Some((Op::Equal, rest))
        } else if let Some(rest) = clause.strip_prefix("!=") {
            Some((Op::NotEqual, rest))
        } else if let Some(rest) = clause.strip_prefix("<=") {
            Some((Op::LessEq, rest))
        } else if let Some(rest) = clause.strip_prefix(">=") {
            Some((Op::GreaterEq, rest))
        } else if let Some(rest) = clause.strip_prefix('<') {
            Some((Op::Less, rest))
        } else {
            clause.strip_prefix('>').map(|rest| (Op::Greater, rest))
        }
    }

    /// Operator token as written in requirement files
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Equal => "==",
            Op::NotEqual => "!=",
            Op::LessEq => "<=",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::Greater => ">",
            Op::Compatible => "~=",
            Op::Arbitrary => "===",
        }
    }
}

impl Constraint {
    /// Parse a single clause such as `>=1.0` or `==1.4.*`
    pub fn parse(clause: &str) -> Option<Self> {
        let (op, version) = Op::split(clause.trim())?;
        if !is_valid_version_token(version) {
            return None;
        }

        Some(Constraint {
            op,
            version: version.to_string(),
        })
    }
}

impl ConstraintSet {
    /// Parse a comma-joined constraint expression.
    ///
    /// Every clause must carry an operator and a version token. An empty
    /// input yields an empty set (no constraint at all).
    pub fn parse(input: &str) -> VetchResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let constraints = trimmed
            .split(',')
            .map(|clause| {
                Constraint::parse(clause).ok_or_else(|| VetchError::invalid_requirement(input))
            })
            .collect::<VetchResult<Vec<_>>>()?;

        Ok(ConstraintSet { constraints })
    }

    /// Number of clauses
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when no clause constrains the version
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterate over the clauses
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.iter()
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", constraint)?;
        }
        Ok(())
    }
}

/// Check that a string looks like a version number or a named version.
///
/// Accepts PEP 440 versions, local segments, wildcard suffixes (`1.4.*`)
/// and opaque names such as VCS references.
pub fn is_valid_version_token(token: &str) -> bool {
    let body = token.strip_suffix(".*").unwrap_or(token);

    !body.is_empty()
        && body
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '+' | '!'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_split() {
        assert_eq!(Op::split("===1.0"), Some((Op::Arbitrary, "1.0")));
        assert_eq!(Op::split("~=1.0"), Some((Op::Compatible, "1.0")));
        assert_eq!(Op::split("<=1.0"), Some((Op::LessEq, "1.0")));
        assert_eq!(Op::split("<1.0"), Some((Op::Less, "1.0")));
        assert_eq!(Op::split("1.0"), None);
    }

    #[test]
    fn test_parse_multi_clause() {
        let set = ConstraintSet::parse(">=1.0.0,<2.0.0").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.constraints[0].op, Op::GreaterEq);
        assert_eq!(set.constraints[1].version, "2.0.0");
        assert_eq!(set.to_string(), ">=1.0.0,<2.0.0");
    }

    #[test]
    fn test_parse_wildcard_and_local() {
        assert!(ConstraintSet::parse("==1.4.*").is_ok());
        assert!(ConstraintSet::parse("==1.0+local.1").is_ok());
        assert!(ConstraintSet::parse("!=1!2.0").is_ok());
    }

    #[test]
    fn test_parse_empty_is_unconstrained() {
        assert!(ConstraintSet::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        for input in [">=", "1.0", ">=1.0,", "=>1.0", ">=1.0 beta", "==1.0$"] {
            let err = ConstraintSet::parse(input).unwrap_err();
            assert!(
                matches!(err, VetchError::InvalidRequirement { input: ref got } if got == input),
                "unexpected error for {input}: {err:?}"
            );
        }
    }
}
