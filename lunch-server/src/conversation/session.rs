//! Per-user conversation sessions
//!
//! Sessions are ephemeral: created when a flow starts, dropped on
//! completion or cancellation, gone after a restart. One session per
//! user id; the transport guarantees at most one in-flight input per
//! user, so sessions never race with themselves.

use super::FlowKind;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Steps across all flows. Each flow walks a linear subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    // Add-Venue
    PlaceName,
    PlaceAddress,
    PlaceCategory,
    PlaceCity,
    PlacePhoto,
    PlaceComment,
    // Add-Schedule
    LunchSelectPlace,
    LunchPayload,
    // Add-Menu-Items
    MenuSelectPlace,
    MenuCategory,
    MenuPayload,
}

/// State of one user's active flow
#[derive(Debug, Clone)]
pub struct ConversationSession {
    pub user_id: i64,
    pub flow: FlowKind,
    pub step: Step,
    /// field-name -> collected value
    fields: HashMap<String, String>,
    /// Pagination cursor of the current selection step
    pub page: i64,
}

impl ConversationSession {
    pub fn new(user_id: i64, flow: FlowKind, step: Step) -> Self {
        Self {
            user_id,
            flow,
            step,
            fields: HashMap::new(),
            page: 1,
        }
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// In-memory session store keyed by user identity
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<i64, ConversationSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Snapshot of the user's session, if a flow is active
    pub fn get(&self, user_id: i64) -> Option<ConversationSession> {
        self.sessions.get(&user_id).map(|s| s.value().clone())
    }

    pub fn put(&self, session: ConversationSession) {
        self.sessions.insert(session.user_id, session);
    }

    pub fn remove(&self, user_id: i64) -> Option<ConversationSession> {
        self.sessions.remove(&user_id).map(|(_, s)| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_lifecycle() {
        let store = SessionStore::new();
        assert!(store.get(1).is_none());

        let mut session = ConversationSession::new(1, FlowKind::AddPlace, Step::PlaceName);
        session.set("name", "Cafe Nord");
        store.put(session);

        let snapshot = store.get(1).expect("session exists");
        assert_eq!(snapshot.get("name"), Some("Cafe Nord"));
        assert_eq!(snapshot.page, 1);

        assert!(store.remove(1).is_some());
        assert!(store.get(1).is_none());
        assert!(store.remove(1).is_none());
    }
}
