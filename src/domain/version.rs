//! PEP 440 version parsing and ordering
//!
//! Handles version formats:
//! - Plain releases: `1.2.3`, `2024.1`
//! - Epochs: `1!2.0`
//! - Pre-releases: `1.0a1`, `1.0.b2`, `1.0rc1`, `1.0-pre`
//! - Post-releases: `1.0.post1`, `1.0-1`, `1.0rev2`
//! - Dev releases: `1.0.dev3`, `3.0.0.dev1`
//! - Local segments: `1.0+ubuntu.1`

use crate::error::ParseError;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// PEP 440 grammar, with the separator and spelling variants the
// normalization rules accept (alpha -> a, preview -> rc, rev -> post, ...)
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^\s*v?
        (?:(?P<epoch>\d+)!)?
        (?P<release>\d+(?:\.\d+)*)
        (?:[-_.]?(?P<pre_tag>alpha|beta|preview|pre|rc|a|b|c)[-_.]?(?P<pre_n>\d+)?)?
        (?:-(?P<post_raw>\d+)|[-_.]?(?P<post_tag>post|rev|r)[-_.]?(?P<post_n>\d+)?)?
        (?:[-_.]?(?P<dev_tag>dev)[-_.]?(?P<dev_n>\d+)?)?
        (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
        \s*$",
    )
    .unwrap()
});

/// Pre-release cycle tag, in precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreTag {
    Alpha,
    Beta,
    Rc,
}

impl PreTag {
    fn from_label(label: &str) -> Self {
        match label {
            "a" | "alpha" => PreTag::Alpha,
            "b" | "beta" => PreTag::Beta,
            _ => PreTag::Rc,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            PreTag::Alpha => "a",
            PreTag::Beta => "b",
            PreTag::Rc => "rc",
        }
    }
}

/// An immutable PEP 440 release identifier with a total order
#[derive(Debug, Clone)]
pub struct Version {
    epoch: u64,
    release: Vec<u64>,
    pre: Option<(PreTag, u64)>,
    post: Option<u64>,
    dev: Option<u64>,
    local: Option<String>,
}

// Comparison rank for the optional pre/post/dev segments: a missing
// segment pins the rank to one end of the scale depending on which
// segment it is (dev sorts before everything, post after).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SegmentKey {
    Min,
    Value(u8, u64),
    Max,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LocalPart {
    Alpha(String),
    Num(u64),
}

impl Version {
    /// Parses a PEP 440 version string
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let caps = VERSION_RE
            .captures(input)
            .ok_or_else(|| ParseError::malformed_version(input))?;

        let epoch = match caps.name("epoch") {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| ParseError::malformed_version(input))?,
            None => 0,
        };

        let release = caps["release"]
            .split('.')
            .map(|part| part.parse())
            .collect::<Result<Vec<u64>, _>>()
            .map_err(|_| ParseError::malformed_version(input))?;

        let number = |name: &str| -> Result<u64, ParseError> {
            match caps.name(name) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| ParseError::malformed_version(input)),
                None => Ok(0),
            }
        };

        let pre = match caps.name("pre_tag") {
            Some(tag) => Some((
                PreTag::from_label(&tag.as_str().to_ascii_lowercase()),
                number("pre_n")?,
            )),
            None => None,
        };

        let post = if caps.name("post_raw").is_some() {
            Some(number("post_raw")?)
        } else if caps.name("post_tag").is_some() {
            Some(number("post_n")?)
        } else {
            None
        };

        let dev = if caps.name("dev_tag").is_some() {
            Some(number("dev_n")?)
        } else {
            None
        };

        let local = caps.name("local").map(|m| {
            m.as_str()
                .to_ascii_lowercase()
                .replace(['-', '_'], ".")
        });

        Ok(Self {
            epoch,
            release,
            pre,
            post,
            dev,
            local,
        })
    }

    /// Whether this is a development release (`.devN`)
    pub fn is_devrelease(&self) -> bool {
        self.dev.is_some()
    }

    /// Whether this is a pre-release; dev releases count as pre-releases
    pub fn is_prerelease(&self) -> bool {
        self.dev.is_some() || self.pre.is_some()
    }

    /// Whether this is a post-release (`.postN`)
    pub fn is_postrelease(&self) -> bool {
        self.post.is_some()
    }

    fn pre_key(&self) -> SegmentKey {
        match (&self.pre, self.post, self.dev) {
            // 1.0.dev1 sorts before 1.0a1, which sorts before 1.0
            (None, None, Some(_)) => SegmentKey::Min,
            (None, _, _) => SegmentKey::Max,
            (Some((tag, n)), _, _) => SegmentKey::Value(*tag as u8, *n),
        }
    }

    fn post_key(&self) -> SegmentKey {
        match self.post {
            Some(n) => SegmentKey::Value(0, n),
            None => SegmentKey::Min,
        }
    }

    fn dev_key(&self) -> SegmentKey {
        match self.dev {
            Some(n) => SegmentKey::Value(0, n),
            None => SegmentKey::Max,
        }
    }

    fn local_key(&self) -> Option<Vec<LocalPart>> {
        self.local.as_ref().map(|local| {
            local
                .split('.')
                .map(|part| match part.parse() {
                    Ok(n) => LocalPart::Num(n),
                    Err(_) => LocalPart::Alpha(part.to_string()),
                })
                .collect()
        })
    }
}

fn cmp_release(a: &[u64], b: &[u64]) -> Ordering {
    // shorter release segments compare as if padded with zeros
    let len = a.len().max(b.len());
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| cmp_release(&self.release, &other.release))
            .then_with(|| self.pre_key().cmp(&other.pre_key()))
            .then_with(|| self.post_key().cmp(&other.post_key()))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local_key().cmp(&other.local_key()))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch != 0 {
            write!(f, "{}!", self.epoch)?;
        }
        let release: Vec<String> = self.release.iter().map(u64::to_string).collect();
        write!(f, "{}", release.join("."))?;
        if let Some((tag, n)) = &self.pre {
            write!(f, "{}{}", tag.as_str(), n)?;
        }
        if let Some(n) = self.post {
            write!(f, ".post{}", n)?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{}", n)?;
        }
        if let Some(local) = &self.local {
            write!(f, "+{}", local)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_simple() {
        let version = v("1.2.3");
        assert!(!version.is_devrelease());
        assert!(!version.is_prerelease());
        assert!(!version.is_postrelease());
        assert_eq!(version.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(v("1!2.0").to_string(), "1!2.0");
        assert!(v("1!1.0") > v("999.0"));
    }

    #[test]
    fn test_parse_prerelease_spellings() {
        assert_eq!(v("1.0a1").to_string(), "1.0a1");
        assert_eq!(v("1.0.alpha.1").to_string(), "1.0a1");
        assert_eq!(v("1.0-beta2").to_string(), "1.0b2");
        assert_eq!(v("1.0rc3").to_string(), "1.0rc3");
        assert_eq!(v("1.0.preview1").to_string(), "1.0rc1");
        // implicit number defaults to zero
        assert_eq!(v("0.0.14-pre").to_string(), "0.0.14rc0");
    }

    #[test]
    fn test_parse_postrelease_spellings() {
        assert_eq!(v("1.0.post1").to_string(), "1.0.post1");
        assert_eq!(v("1.0-post").to_string(), "1.0.post0");
        assert_eq!(v("1.0rev2").to_string(), "1.0.post2");
        assert_eq!(v("1.0-1").to_string(), "1.0.post1");
        assert!(v("1.0.post1").is_postrelease());
    }

    #[test]
    fn test_parse_devrelease_spellings() {
        assert_eq!(v("1.0.dev1").to_string(), "1.0.dev1");
        assert_eq!(v("0.0.13-dev").to_string(), "0.0.13.dev0");
        assert!(v("1.0.dev1").is_devrelease());
        assert!(v("1.0.dev1").is_prerelease());
    }

    #[test]
    fn test_parse_local_segment() {
        assert_eq!(v("1.0+ubuntu-1").to_string(), "1.0+ubuntu.1");
        assert!(!v("1.0+a").is_prerelease());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Version::parse("").is_err());
        assert!(Version::parse("not-a-version").is_err());
        assert!(Version::parse("1.0.x").is_err());
        assert!(Version::parse("1..0").is_err());
    }

    #[test]
    fn test_ordering_release_segments() {
        assert!(v("1.9.0") < v("1.10.0"));
        assert!(v("2.0.0") > v("1.99.99"));
        // shorter segments padded with zeros
        assert_eq!(v("1.0"), v("1.0.0"));
        assert!(v("1.0") < v("1.0.1"));
    }

    #[test]
    fn test_ordering_pre_release_cycle() {
        assert!(v("1.0a1") < v("1.0b1"));
        assert!(v("1.0b2") < v("1.0rc1"));
        assert!(v("1.0rc1") < v("1.0"));
        assert!(v("1.0a1") < v("1.0a2"));
    }

    #[test]
    fn test_ordering_dev_pre_final_post() {
        assert!(v("1.0.dev1") < v("1.0a1"));
        assert!(v("1.0a1") < v("1.0"));
        assert!(v("1.0") < v("1.0.post1"));
        assert!(v("1.0.post1") < v("1.0.post2"));
    }

    #[test]
    fn test_ordering_dev_within_pre_and_post() {
        assert!(v("1.0a1.dev1") < v("1.0a1"));
        assert!(v("1.0.post1.dev1") < v("1.0.post1"));
        assert!(v("1.0") < v("1.0.post1.dev1"));
    }

    #[test]
    fn test_ordering_epoch_dominates() {
        assert!(v("1!1.0") > v("2.0"));
        assert!(v("0!2.0") == v("2.0"));
    }

    #[test]
    fn test_ordering_local_segment() {
        assert!(v("1.0") < v("1.0+a"));
        assert!(v("1.0+a") < v("1.0+a.1"));
        // numeric local parts sort above alphabetic ones
        assert!(v("1.0+abc") < v("1.0+1"));
    }

    #[test]
    fn test_canonical_round_trip() {
        for input in ["1.2.3", "1!2.0a1", "1.0.post1", "3.0.0.dev1", "1.0+local.7"] {
            let parsed = v(input);
            let round_tripped = v(&parsed.to_string());
            assert_eq!(parsed, round_tripped);
            assert_eq!(parsed.to_string(), round_tripped.to_string());
        }
    }

    #[test]
    fn test_equality_from_same_canonical_text() {
        assert_eq!(v("1.0.ALPHA1"), v("1.0a1"));
        assert_eq!(v("v1.0"), v("1.0"));
        assert_eq!(v("1.0-post1"), v("1.0.post1"));
    }

    #[test]
    fn test_classification_scenario_strings() {
        assert!(v("0.0.13-dev").is_devrelease());
        assert!(v("0.0.13-dev").is_prerelease());
        assert!(v("0.0.13-post").is_postrelease());
        assert!(v("0.0.14-pre").is_prerelease());
        assert!(!v("0.0.14-pre").is_devrelease());
        assert!(!v("0.0.12").is_prerelease());
    }

    #[test]
    fn test_sorting_newest_first() {
        let mut versions = vec![
            v("0.0.12"),
            v("0.0.13"),
            v("0.0.13-post"),
            v("0.0.13-dev"),
            v("0.0.14-pre"),
        ];
        versions.sort_by(|a, b| b.cmp(a));
        assert_eq!(versions[0].to_string(), "0.0.14rc0");
        assert_eq!(versions[1].to_string(), "0.0.13.post0");
        assert_eq!(versions[2].to_string(), "0.0.13");
        assert_eq!(versions[3].to_string(), "0.0.13.dev0");
        assert_eq!(versions[4].to_string(), "0.0.12");
    }
}
