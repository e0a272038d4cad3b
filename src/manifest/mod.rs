//! Manifest file handling

pub mod pyproject;

pub use pyproject::Pyproject;
