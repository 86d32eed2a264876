// src/store/autosave.rs
use std::time::{Duration, Instant};

use super::LogEntryPatch;

/// Debounces draft edits into a single save.
///
/// Editing front-ends record every keystroke-level change as a patch; once
/// no new edit has arrived for the quiet period, `poll` hands back the
/// coalesced patch for a `save_draft` call. A new edit while a save is
/// pending cancels and reschedules it.
pub struct DraftAutosave {
    quiet: Duration,
    pending: Option<(LogEntryPatch, Instant)>,
}

impl DraftAutosave {
    pub const QUIET_PERIOD: Duration = Duration::from_secs(5);

    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Record an edit, restarting the quiet window.
    pub fn record_edit(&mut self, patch: LogEntryPatch, now: Instant) {
        let merged = match self.pending.take() {
            Some((pending, _)) => pending.merge(patch),
            None => patch,
        };
        self.pending = Some((merged, now + self.quiet));
    }

    /// Hand back the coalesced patch once the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<LogEntryPatch> {
        let due = self.pending.as_ref().map(|(_, due)| *due)?;
        if due <= now {
            self.pending.take().map(|(patch, _)| patch)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for DraftAutosave {
    fn default() -> Self {
        Self::new(Self::QUIET_PERIOD)
    }
}
