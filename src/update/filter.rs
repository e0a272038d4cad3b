//! Upgrade filter configuration
//!
//! This module provides the UpdateFilter struct that encapsulates
//! which specifiers may be rewritten and which packages may resolve
//! to dev/pre/post releases.

use crate::domain::{Operator, SpecifierSet};

/// Filter configuration for requirement upgrades
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// Operators whose specifiers are rewritten to the new version
    pub match_operators: Vec<Operator>,
    /// Packages never upgraded
    pub skip: Vec<String>,
    /// Packages permitted to resolve to dev releases ("*" for all)
    pub dev: Vec<String>,
    /// Packages permitted to resolve to pre-releases ("*" for all)
    pub pre: Vec<String>,
    /// Packages permitted to resolve to post-releases ("*" for all)
    pub post: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter with nothing allowed
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operators eligible for rewriting
    pub fn with_match_operators(mut self, operators: Vec<Operator>) -> Self {
        self.match_operators = operators;
        self
    }

    /// Set packages to skip
    pub fn with_skip(mut self, skip: Vec<String>) -> Self {
        self.skip = skip;
        self
    }

    /// Set packages allowed to upgrade to dev releases
    pub fn with_dev(mut self, dev: Vec<String>) -> Self {
        self.dev = dev;
        self
    }

    /// Set packages allowed to upgrade to pre-releases
    pub fn with_pre(mut self, pre: Vec<String>) -> Self {
        self.pre = pre;
        self
    }

    /// Set packages allowed to upgrade to post-releases
    pub fn with_post(mut self, post: Vec<String>) -> Self {
        self.post = post;
        self
    }

    /// Whether a package is on the skip list
    pub fn should_skip(&self, name: &str) -> bool {
        self.skip.iter().any(|p| p == name)
    }

    /// Whether any specifier in the set would be rewritten
    pub fn matches(&self, specifier: &SpecifierSet) -> bool {
        specifier.matches_any_operator(&self.match_operators)
    }

    /// Whether a package may resolve to a dev release
    pub fn allows_dev(&self, name: &str) -> bool {
        granted(&self.dev, name)
    }

    /// Whether a package may resolve to a pre-release
    pub fn allows_pre(&self, name: &str) -> bool {
        granted(&self.pre, name)
    }

    /// Whether a package may resolve to a post-release
    pub fn allows_post(&self, name: &str) -> bool {
        granted(&self.post, name)
    }
}

fn granted(list: &[String], name: &str) -> bool {
    list.iter().any(|entry| entry == "*" || entry == name)
}
