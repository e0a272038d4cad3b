//! Core domain models for uppd
//!
//! This module contains the fundamental types used throughout the
//! application:
//! - PEP 440 versions with total ordering and release classification
//! - Specifiers and specifier sets for version constraints
//! - Requirement declarations parsed from dependency strings

mod requirement;
mod specifier;
mod version;

pub use requirement::Requirement;
pub use specifier::{Operator, Specifier, SpecifierSet};
pub use version::Version;
