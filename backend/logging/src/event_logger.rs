//! Session Event Logger
//!
//! Structured session events (view changes, picks, audio state) written to
//! the rolling NDJSON log under the `session_events` target.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::redact::redact_name;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    ViewChanged { from: String, to: String },
    MoodSelected { mood: String },
    ReliefChosen { variant: String },
    ChoiceSelected { mood: String, index: usize, text: String },
    AudioStateChanged { active: bool, playing: bool, muted: bool },
    Restarted,
}

#[derive(Debug, Serialize)]
pub struct SessionLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

/// Emits events for one session, scrubbing the visitor's name once known.
#[derive(Debug, Clone)]
pub struct SessionEventLogger {
    session_id: String,
    visitor: Option<String>,
}

impl SessionEventLogger {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            visitor: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn set_visitor(&mut self, name: Option<&str>) {
        self.visitor = name.map(str::to_string);
    }

    /// Redacts free text and hands the entry to `tracing`.
    pub fn log_event(&self, event: SessionEvent) -> SessionLogEntry {
        let entry = SessionLogEntry {
            session_id: self.session_id.clone(),
            timestamp: Utc::now(),
            event: self.scrub(event),
        };
        let json = serde_json::to_string(&entry.event).unwrap_or_default();
        info!(target: "session_events", session_id = %entry.session_id, event = %json, "Session event");
        entry
    }

    fn scrub(&self, mut event: SessionEvent) -> SessionEvent {
        let Some(name) = &self.visitor else { return event };
        if let SessionEvent::ChoiceSelected { text, .. } = &mut event {
            *text = redact_name(text, name);
        }
        event
    }
}
