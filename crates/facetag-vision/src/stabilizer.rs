//! Temporal stabilization of per-frame tags.
//!
//! Two mechanisms run once per frame:
//! - an eyes-closed hold, so blinks shorter than the hold never assert
//!   `eyes_closed`;
//! - a tag-set debounce, so the stable set only moves after a candidate set
//!   has persisted for the debounce window.
//!
//! Time comes from frame timestamps; nothing here reads a clock.

use std::time::Duration;

use facetag_models::{ActiveTagSet, EyeState};
use tracing::debug;

/// Timing knobs for the stabilizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizerConfig {
    /// Raw eyes-closed must persist this long before `eyes_closed` is asserted
    pub eyes_closed_hold: Duration,

    /// A new tag set must persist this long before it becomes stable
    pub tag_debounce: Duration,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            eyes_closed_hold: Duration::from_millis(200),
            tag_debounce: Duration::ZERO,
        }
    }
}

impl StabilizerConfig {
    /// Load from `FACETAG_EYES_CLOSED_HOLD_MS` and `FACETAG_TAG_DEBOUNCE_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            eyes_closed_hold: env_millis("FACETAG_EYES_CLOSED_HOLD_MS")
                .unwrap_or(defaults.eyes_closed_hold),
            tag_debounce: env_millis("FACETAG_TAG_DEBOUNCE_MS").unwrap_or(defaults.tag_debounce),
        }
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
}

/// Stabilizer memory carried from one frame to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilizerState {
    pub stable_tags: ActiveTagSet,
    pub candidate_tags: ActiveTagSet,
    pub candidate_since: Duration,
    /// Timestamp of the first frame in the current raw-closed run
    pub eyes_closed_since: Option<Duration>,
}

impl Default for StabilizerState {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilizerState {
    /// Fresh state: stable and candidate sets are `{neutral}`.
    pub fn new() -> Self {
        Self {
            stable_tags: ActiveTagSet::neutral(),
            candidate_tags: ActiveTagSet::neutral(),
            candidate_since: Duration::ZERO,
            eyes_closed_since: None,
        }
    }

    /// Feed the raw eye state; returns whether `eyes_closed` is held.
    pub fn observe_eyes(&mut self, eyes: EyeState, now: Duration, config: &StabilizerConfig) -> bool {
        match eyes {
            EyeState::Open => {
                self.eyes_closed_since = None;
                false
            }
            EyeState::Closed => {
                let since = *self.eyes_closed_since.get_or_insert(now);
                now.saturating_sub(since) >= config.eyes_closed_hold
            }
        }
    }

    /// Feed this frame's tag set; returns true when the stable set changed.
    pub fn observe_tags(
        &mut self,
        tags: &ActiveTagSet,
        now: Duration,
        config: &StabilizerConfig,
    ) -> bool {
        if *tags != self.candidate_tags {
            self.candidate_tags = tags.clone();
            self.candidate_since = now;
        }

        let settled = now.saturating_sub(self.candidate_since) >= config.tag_debounce;
        if self.candidate_tags != self.stable_tags && settled {
            debug!(
                from = %self.stable_tags,
                to = %self.candidate_tags,
                "Stable tag set changed"
            );
            self.stable_tags = self.candidate_tags.clone();
            return true;
        }
        false
    }
}
