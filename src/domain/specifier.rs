//! PEP 440 version specifiers
//!
//! Handles specifier sets as they appear in requirement strings:
//! - Single clauses: `==2.0.0`, `>=1.0`, `~=1.4.2`
//! - Conjunctions: `>=1.0,<2.0`, `~=0.2,!=0.2.3`

use crate::error::ParseError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static SPECIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(===|==|!=|<=|>=|~=|<|>)\s*([\w.!+*-]+)\s*$").unwrap());

/// Comparison operator of one specifier clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
    /// `~=` (compatible release)
    Compatible,
}

impl Operator {
    /// All operators a specifier clause may carry
    pub const ALL: [Operator; 7] = [
        Operator::Less,
        Operator::LessOrEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterOrEqual,
        Operator::Greater,
        Operator::Compatible,
    ];

    /// The textual form of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Less => "<",
            Operator::LessOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterOrEqual => ">=",
            Operator::Greater => ">",
            Operator::Compatible => "~=",
        }
    }

    /// Parses an operator token
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "<" => Some(Operator::Less),
            "<=" => Some(Operator::LessOrEqual),
            "==" => Some(Operator::Equal),
            "!=" => Some(Operator::NotEqual),
            ">=" => Some(Operator::GreaterOrEqual),
            ">" => Some(Operator::Greater),
            "~=" => Some(Operator::Compatible),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::parse(s.trim())
            .ok_or_else(|| ParseError::malformed_requirement(s, "unknown operator"))
    }
}

/// One (operator, version) constraint clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    operator: Operator,
    version: String,
}

impl Specifier {
    /// Parses one clause, e.g. `==2.0.0`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let caps = SPECIFIER_RE
            .captures(input)
            .ok_or_else(|| ParseError::malformed_requirement(input, "invalid specifier"))?;
        let operator = Operator::parse(&caps[1])
            .ok_or_else(|| ParseError::malformed_requirement(input, "unknown operator"))?;
        Ok(Self {
            operator,
            version: caps[2].to_string(),
        })
    }

    /// The comparison operator
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The version text of this clause
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a new specifier with the same operator and a new version
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            operator: self.operator,
            version: version.into(),
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.version)
    }
}

/// An ordered conjunction of specifier clauses
///
/// Insertion order and multiplicity are preserved; equality is a
/// multiset comparison that ignores clause ordering.
#[derive(Debug, Clone, Default, Eq)]
pub struct SpecifierSet {
    specifiers: Vec<Specifier>,
}

impl SpecifierSet {
    /// Parses a comma-separated specifier list; empty text yields an empty set
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let specifiers = trimmed
            .split(',')
            .map(Specifier::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { specifiers })
    }

    /// Whether the set has no clauses
    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }

    /// Number of clauses, duplicates included
    pub fn len(&self) -> usize {
        self.specifiers.len()
    }

    /// Iterates clauses in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Specifier> {
        self.specifiers.iter()
    }

    /// Whether any clause uses one of the given operators
    pub fn matches_any_operator(&self, operators: &[Operator]) -> bool {
        self.specifiers
            .iter()
            .any(|s| operators.contains(&s.operator))
    }

    /// Re-points every clause whose operator is in `match_operators` at
    /// `version`; all other clauses pass through untouched.
    ///
    /// The result is rebuilt by joining and reparsing the clause texts,
    /// which normalizes whitespace without changing operators, values,
    /// ordering, or cardinality.
    pub fn pin(&self, version: &str, match_operators: &[Operator]) -> Result<Self, ParseError> {
        let rewritten: Vec<String> = self
            .specifiers
            .iter()
            .map(|s| {
                if match_operators.contains(&s.operator) {
                    s.with_version(version).to_string()
                } else {
                    s.to_string()
                }
            })
            .collect();
        Self::parse(&rewritten.join(","))
    }

    fn sorted_clauses(&self) -> Vec<(&'static str, &str)> {
        let mut clauses: Vec<(&'static str, &str)> = self
            .specifiers
            .iter()
            .map(|s| (s.operator.as_str(), s.version.as_str()))
            .collect();
        clauses.sort_unstable();
        clauses
    }
}

impl PartialEq for SpecifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_clauses() == other.sorted_clauses()
    }
}

impl FromStr for SpecifierSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SpecifierSet::parse(s)
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.specifiers.iter().map(Specifier::to_string).collect();
        write!(f, "{}", clauses.join(","))
    }
}
