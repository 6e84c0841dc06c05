//! Bulk ingestion parsing
//!
//! Administrators submit one JSON payload describing a whole week of a
//! lunch offer, or a list of menu items. Parsing is tolerant per
//! sub-entry: a bad day or item is skipped with a recorded reason and the
//! rest of the batch goes through. Only two things abort a payload as a
//! whole: it does not parse as the expected structure, or a required
//! scalar (price, time window) is missing or invalid.

pub mod menu;
pub mod schedule;

pub use menu::{ParsedMenu, ParsedMenuItem, parse_menu};
pub use schedule::{ParsedDay, ParsedSchedule, parse_schedule};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal payload errors. Per-entry problems are not errors; they surface
/// as `skipped` entries in the parse result.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The text does not parse as the expected structure at all
    #[error("Payload is not valid JSON in the expected format: {0}")]
    Syntax(String),

    /// Parsed, but a required scalar field is missing or invalid
    #[error("{0}")]
    Payload(String),
}

/// One sub-entry that was left out of a batch, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub label: String,
    pub reason: String,
}

impl SkippedEntry {
    pub fn new(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
