//! Reporting utilities: the latest reading and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the transform code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

mod format;

pub use format::{format_latest, format_summary, latest_reading};
