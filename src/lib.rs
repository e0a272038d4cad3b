//! uppd - Update Python Project Dependencies
//!
//! This library provides the core functionality for upgrading version
//! pins in pyproject.toml files:
//! - PEP 440 version parsing and ordering
//! - PEP 508 requirement and specifier handling
//! - PyPI Simple API (PEP 691) catalog fetching
//! - Concurrent per-requirement upgrade resolution

pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod progress;
pub mod registry;
pub mod update;
