//! Structured session logging.
//!
//! Every lifecycle event carries the session id so interleaved runs can be
//! told apart in aggregated JSON logs.

use facetag_models::{ActiveTagSet, ContentEntry};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Session logger for lifecycle events of one frame loop.
#[derive(Debug, Clone)]
pub struct SessionLogger {
    session_id: String,
    source: String,
}

impl SessionLogger {
    /// Create a logger with a fresh session id.
    pub fn new(source: &str) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            source: source.to_string(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn log_start(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            source = %self.source,
            "Session started: {}", message
        );
    }

    /// Log a switch of the selected content.
    pub fn log_content_switch(&self, frame: u64, tags: &ActiveTagSet, entry: &ContentEntry) {
        info!(
            session_id = %self.session_id,
            frame,
            tags = %tags,
            content = %entry.resource_ref,
            "Content switched to {}", entry.display_label()
        );
    }

    /// Per-frame trace; only visible at debug level.
    pub fn log_frame(&self, frame: u64, tags: &ActiveTagSet) {
        debug!(
            session_id = %self.session_id,
            frame,
            tags = %tags,
            "Frame processed"
        );
    }

    pub fn log_skipped_frame(&self, frame: u64, reason: &str) {
        warn!(
            session_id = %self.session_id,
            frame,
            "Frame skipped: {}", reason
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            session_id = %self.session_id,
            source = %self.source,
            "Session error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            session_id = %self.session_id,
            source = %self.source,
            "Session finished: {}", message
        );
    }
}
