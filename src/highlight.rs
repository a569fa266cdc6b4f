//! Transient highlight cues. A cue is raised by an operation and fades after
//! a timeout; it is view state only and never feeds back into the map.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::model::EntryId;

/// How long a cue stays lit unless configured otherwise.
pub const DEFAULT_HIGHLIGHT: Duration = Duration::from_millis(1000);

/// The colour family of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Yellow: a put inserted or updated the node.
    Touched,
    /// Green: a lookup or membership test found the node.
    Found,
    /// Red: the node is being removed.
    Removing,
}

/// Which node and bucket to light up. `entry` is `None` when only the bucket
/// is of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub entry: Option<EntryId>,
    pub bucket: usize,
    pub tone: Tone,
}

impl Highlight {
    pub fn is_entry(&self, id: EntryId) -> bool {
        self.entry == Some(id)
    }
}

/// Wraps a cue with the Instant it was raised at.
struct StampedHighlight {
    highlight: Highlight,
    raised_at: Instant,
}

/// Holds the most recent cue. There is no active expiry: a stale cue is only
/// dropped when somebody asks for it past its timeout.
pub struct HighlightTracker {
    current: Option<StampedHighlight>,
    timeout: Duration,
}

impl Default for HighlightTracker {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_HIGHLIGHT)
    }
}

impl HighlightTracker {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            current: None,
            timeout,
        }
    }

    /// Replaces whatever cue was lit.
    pub fn raise(&mut self, highlight: Highlight) {
        self.current = Some(StampedHighlight {
            highlight,
            raised_at: Instant::now(),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The lit cue, if it has not yet faded.
    pub fn active(&mut self) -> Option<Highlight> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&mut self, now: Instant) -> Option<Highlight> {
        if let Some(stamped) = &self.current {
            if now.saturating_duration_since(stamped.raised_at) > self.timeout {
                self.current = None;
                return None;
            }
        }

        self.current.as_ref().map(|s| s.highlight)
    }
}
