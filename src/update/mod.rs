//! Requirement upgrade pipeline

pub mod filter;
pub mod reporter;
pub mod select;
pub mod upgrader;

pub use filter::UpdateFilter;
pub use reporter::{ChangeReporter, ConsoleReporter, NullReporter};
pub use select::{select_latest, ReleaseFlags};
pub use upgrader::{BatchError, BatchOutcome, Upgrader};
