//! Conversational admin flows
//!
//! Three flows (Add-Venue, Add-Schedule, Add-Menu-Items), each a linear
//! sequence of steps collecting fields into a per-user session. Nothing
//! is written until the final commit step, so a cancellation or a crash
//! before commit leaves no partial records. Commit fan-out inserts one
//! record at a time and reports per-record success and skips; batches are
//! not atomic by design.
//!
//! The engine is transport-agnostic: inputs arrive as [`FlowInput`]
//! values and prompts go back as [`Reply`] values. The chat transport
//! turns them into messages and buttons.

pub mod engine;
pub mod session;

pub use engine::ConversationEngine;
pub use session::{ConversationSession, SessionStore, Step};

use crate::ingest::SkippedEntry;
use serde::{Deserialize, Serialize};

/// Flows an administrator can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    AddPlace,
    AddLunch,
    AddMenu,
}

impl FlowKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AddPlace => "add venue",
            Self::AddLunch => "add business lunch",
            Self::AddMenu => "add menu items",
        }
    }
}

/// One transport-agnostic input into an active flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlowInput {
    /// Free-text reply
    Text { text: String },
    /// Photo attachment (transport file reference)
    Photo { file_id: String },
    /// Button selection, carrying the choice id from the prompt
    Select { id: String },
    /// Page navigation on a selection step; not flow progress
    Page { page: i64 },
}

/// Engine reply, rendered by the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Ask for the next input
    Prompt {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        choices: Vec<Choice>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        page: Option<PageInfo>,
    },
    /// Input did not satisfy the current step; the step re-prompts and
    /// previously collected fields are kept
    Invalid { text: String },
    /// Flow cancelled; nothing was persisted
    Cancelled,
    /// Payload rejected as a whole; the session was reset, resend to retry
    Failed { text: String },
    /// Commit ran; per-record summary
    Committed { report: BatchReport },
    /// No active flow for this user
    NoActiveFlow,
}

/// One selectable option in a prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

/// Pagination state of a selection prompt
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: i64,
    pub page_count: i64,
}

/// Commit summary: what went in and what was skipped, in order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub flow: FlowKind,
    pub title: String,
    pub added: Vec<String>,
    pub skipped: Vec<SkippedEntry>,
}

/// Cancellation sentinels, recognized case-insensitively at every
/// free-text step ("отмена" is the legacy token)
pub const CANCEL_TOKENS: [&str; 2] = ["cancel", "отмена"];

/// Skip sentinels, accepted where a field is optional
pub const SKIP_TOKENS: [&str; 2] = ["skip", "пропустить"];

pub fn is_cancel(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    CANCEL_TOKENS.iter().any(|t| *t == text)
}

pub fn is_skip(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    SKIP_TOKENS.iter().any(|t| *t == text)
}
