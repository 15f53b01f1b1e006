//! Structured logging for Harimu sessions.
//!
//! Handles subscriber setup with a rolling NDJSON file, session event logging,
//! and scrubbing the visitor's name from logged text.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{SessionEvent, SessionEventLogger, SessionLogEntry};
pub use logger::{LOG_FILE_PREFIX, init_logger};
pub use redact::redact_name;
