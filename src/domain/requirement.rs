//! PEP 508 requirement strings
//!
//! Handles dependency declarations as they appear in
//! `[project.dependencies]`:
//! - Bare names: `requests`
//! - Pinned: `requests==2.28.0`
//! - With extras: `httpx[http2]>=0.24.0`
//! - With markers: `pywin32>=300; sys_platform == 'win32'`

use crate::domain::SpecifierSet;
use crate::error::ParseError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)").unwrap());

/// A single dependency declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Requirement {
    /// Package name
    pub name: String,
    /// Extras, carried through verbatim (content between brackets)
    pub extras: Option<String>,
    /// Version constraints
    pub specifier: SpecifierSet,
    /// Environment marker, carried through verbatim
    pub marker: Option<String>,
}

impl Requirement {
    /// Parses a requirement string
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        // the marker is everything after the first ';'
        let (head, marker) = match input.split_once(';') {
            Some((head, marker)) => (head, Some(marker.trim().to_string())),
            None => (input, None),
        };

        let head = head.trim();
        let caps = NAME_RE
            .captures(head)
            .ok_or_else(|| ParseError::malformed_requirement(input, "missing package name"))?;
        let name = caps[1].to_string();
        let mut rest = head[caps[0].len()..].trim_start();

        let extras = if let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped
                .find(']')
                .ok_or_else(|| ParseError::malformed_requirement(input, "unbalanced brackets"))?;
            let extras = stripped[..end].trim().to_string();
            rest = stripped[end + 1..].trim_start();
            Some(extras)
        } else {
            None
        };

        if rest.contains(['[', ']']) {
            return Err(ParseError::malformed_requirement(
                input,
                "unbalanced brackets",
            ));
        }

        let specifier = SpecifierSet::parse(rest)?;

        Ok(Self {
            name,
            extras,
            specifier,
            marker,
        })
    }

    /// Returns a copy with the specifier set replaced
    pub fn with_specifier(&self, specifier: SpecifierSet) -> Self {
        Self {
            specifier,
            ..self.clone()
        }
    }
}

impl FromStr for Requirement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Requirement::parse(s)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(extras) = &self.extras {
            write!(f, "[{}]", extras)?;
        }
        if !self.specifier.is_empty() {
            write!(f, "{}", self.specifier)?;
        }
        if let Some(marker) = &self.marker {
            write!(f, "; {}", marker)?;
        }
        Ok(())
    }
}
