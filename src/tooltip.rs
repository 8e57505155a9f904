//! Chart tooltip with a single cancellable auto-hide deadline

use crate::activity::RecordId;
use log::debug;
use std::time::{Duration, Instant};

/// How long a tooltip stays up after the last tap
pub const TOOLTIP_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipState {
    Hidden,
    Visible(RecordId),
}

/// Scheduled hide. Only applies while `generation` is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingHide {
    pub generation: u64,
    pub deadline: Instant,
}

#[derive(Debug)]
pub struct Tooltip {
    state: TooltipState,
    pending: Option<PendingHide>,
    generation: u64,
    duration: Duration,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::new(TOOLTIP_DURATION)
    }
}

impl Tooltip {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: TooltipState::Hidden,
            pending: None,
            generation: 0,
            duration,
        }
    }

    #[inline]
    pub fn state(&self) -> TooltipState {
        self.state
    }

    #[inline]
    pub fn visible_record(&self) -> Option<RecordId> {
        match self.state() {
            TooltipState::Visible(id) => Some(id),
            TooltipState::Hidden => None,
        }
    }

    #[inline]
    pub fn pending_hide(&self) -> Option<PendingHide> {
        self.pending
    }

    /// Show `record` and replace any earlier hide with a fresh one.
    ///
    /// The state is updated before the new deadline is recorded, so the
    /// returned hide always belongs to the record now on screen.
    pub fn show(&mut self, record: RecordId, now: Instant) -> PendingHide {
        self.state = TooltipState::Visible(record);
        self.generation = self.generation.wrapping_add(1);
        let hide = PendingHide {
            generation: self.generation,
            deadline: now + self.duration,
        };
        self.pending = Some(hide);
        debug!("tooltip shown for {:?} (generation {})", record, hide.generation);
        hide
    }

    /// Apply a hide. Returns false for superseded or already-fired hides.
    pub fn fire(&mut self, hide: PendingHide) -> bool {
        if self.pending != Some(hide) {
            return false;
        }
        self.pending = None;
        self.state = TooltipState::Hidden;
        debug!("tooltip hidden (generation {})", hide.generation);
        true
    }

    /// Fire the pending hide if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(hide) if now >= hide.deadline => self.fire(hide),
            _ => false,
        }
    }

    /// Time left until the pending hide, if any
    pub fn time_until_hide(&self, now: Instant) -> Option<Duration> {
        self.pending_hide()
            .map(|hide| hide.deadline.saturating_duration_since(now))
    }

    /// Drop any visible tooltip and pending hide, e.g. when the chart goes away.
    pub fn reset(&mut self) {
        self.state = TooltipState::Hidden;
        self.pending = None;
    }
}
