//! pyproject.toml manifests
//!
//! Handles PEP 621 metadata:
//! - project.dependencies
//! - project.optional-dependencies
//!
//! Requirement rewrites go through textual replacement of the quoted
//! string so the file keeps its formatting, comments, and key order.

use crate::error::ManifestError;
use std::path::{Path, PathBuf};
use toml::Value;

/// A loaded pyproject.toml file
#[derive(Debug, Clone)]
pub struct Pyproject {
    path: PathBuf,
    content: String,
    doc: Value,
}

impl Pyproject {
    /// Load a pyproject.toml file from disk
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.is_file() {
            return Err(ManifestError::not_found(path));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::read_error(path, e))?;
        Self::parse(path, content)
    }

    /// Build a manifest from in-memory content
    pub fn from_string(content: impl Into<String>) -> Result<Self, ManifestError> {
        Self::parse(Path::new("pyproject.toml"), content.into())
    }

    fn parse(path: &Path, content: String) -> Result<Self, ManifestError> {
        let doc: Value = toml::from_str(&content)
            .map_err(|e: toml::de::Error| ManifestError::toml_parse_error(path, e.to_string()))?;

        if doc.get("project").and_then(|p| p.as_table()).is_none() {
            return Err(ManifestError::MissingProjectTable {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            content,
            doc,
        })
    }

    /// Path this manifest was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file content, including any applied replacements
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Requirement strings from `[project.dependencies]`
    pub fn dependencies(&self) -> Vec<String> {
        self.doc
            .get("project")
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_array())
            .map(|deps| string_array(deps))
            .unwrap_or_default()
    }

    /// Requirement strings per group from `[project.optional-dependencies]`
    pub fn optional_dependencies(&self) -> Vec<(String, Vec<String>)> {
        let Some(groups) = self
            .doc
            .get("project")
            .and_then(|p| p.get("optional-dependencies"))
            .and_then(|d| d.as_table())
        else {
            return Vec::new();
        };

        groups
            .iter()
            .map(|(group, deps)| {
                let entries = deps
                    .as_array()
                    .map(|deps| string_array(deps))
                    .unwrap_or_default();
                (group.clone(), entries)
            })
            .collect()
    }

    /// Replace the first quoted occurrence of a requirement string.
    ///
    /// Returns false when the exact string is not present in the file.
    pub fn replace_requirement(&mut self, old: &str, new: &str) -> bool {
        for quote in ['"', '\''] {
            let needle = format!("{quote}{old}{quote}");
            if self.content.contains(&needle) {
                let replacement = format!("{quote}{new}{quote}");
                self.content = self.content.replacen(&needle, &replacement, 1);
                return true;
            }
        }
        false
    }

    /// Write the current content to the given path
    pub fn write_to(&self, path: &Path) -> Result<(), ManifestError> {
        std::fs::write(path, &self.content)
            .map_err(|e| ManifestError::write_error(path, e))
    }
}

fn string_array(array: &[Value]) -> Vec<String> {
    array
        .iter()
        .filter_map(|v| v.as_str())
        .map(|s| s.to_string())
        .collect()
}
