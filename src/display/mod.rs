//! Self-scheduling relative time display.
//!
//! A [`RelativeTimeDisplay`] holds the rendered text for one instant and
//! decides when it next needs refreshing. It never touches a clock or a timer
//! itself: callers pass `now` in and execute the returned [`TimerCommand`]s.
//! At most one timer is pending per display at any moment.

pub mod memo;
pub mod node;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::util::instant::{Instant, InstantError, InstantSource};
use crate::util::time::{format_relative_time, next_update_delay_ms};

pub use node::TimeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Arm { timer: TimerId, delay_ms: u64 },
    Cancel { timer: TimerId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    Initializing,
    Active,
    TornDown,
}

#[derive(Debug, Clone)]
pub struct RelativeTimeDisplay {
    instant: Instant,
    text: String,
    phase: DisplayPhase,
    hydrated: bool,
    pending: Option<PendingTimer>,
    next_timer: u64,
    update_count: u64,
}

impl RelativeTimeDisplay {
    pub fn new(instant: Instant, now: DateTime<Utc>) -> Self {
        Self::with_text(instant, format_relative_time(&instant, now), false)
    }

    /// Normalise any accepted instant form, then build as [`Self::new`].
    pub fn from_source(source: InstantSource, now: DateTime<Utc>) -> Result<Self, InstantError> {
        Ok(Self::new(Instant::try_from(source)?, now))
    }

    /// Start from text rendered elsewhere (e.g. by a server with its own
    /// clock). The text is kept as-is until the first timer fires.
    pub fn hydrated(instant: Instant, initial_text: String) -> Self {
        Self::with_text(instant, initial_text, true)
    }

    fn with_text(instant: Instant, text: String, hydrated: bool) -> Self {
        Self {
            instant,
            text,
            phase: DisplayPhase::Initializing,
            hydrated,
            pending: None,
            next_timer: 0,
            update_count: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<PendingTimer> {
        self.pending
    }

    pub fn next_wake(&self) -> Option<DateTime<Utc>> {
        self.pending.map(|p| p.deadline)
    }

    /// Number of times the visible text has changed since construction.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn node(&self) -> TimeNode {
        TimeNode::from_parts(self.text.clone(), &self.instant)
    }

    pub fn activate(&mut self, now: DateTime<Utc>) -> Vec<TimerCommand> {
        if self.phase != DisplayPhase::Initializing {
            return vec![];
        }
        self.phase = DisplayPhase::Active;

        if self.hydrated {
            debug!(instant = %self.instant, text = %self.text, "Activating hydrated display");
            let mut commands = Vec::new();
            self.arm(now, &mut commands);
            return commands;
        }

        debug!(instant = %self.instant, "Activating display");
        self.update_cycle(now)
    }

    pub fn on_timer(&mut self, timer: TimerId, now: DateTime<Utc>) -> Vec<TimerCommand> {
        if self.phase != DisplayPhase::Active {
            return vec![];
        }
        match self.pending {
            Some(pending) if pending.id == timer => {
                self.pending = None;
                self.update_cycle(now)
            }
            _ => {
                trace!(timer = timer.value(), "Ignoring stale timer");
                vec![]
            }
        }
    }

    pub fn set_instant(&mut self, instant: Instant, now: DateTime<Utc>) -> Vec<TimerCommand> {
        match self.phase {
            DisplayPhase::TornDown => vec![],
            DisplayPhase::Initializing => {
                self.instant = instant;
                self.replace_text(format_relative_time(&instant, now));
                vec![]
            }
            DisplayPhase::Active => {
                self.instant = instant;
                self.update_cycle(now)
            }
        }
    }

    pub fn tear_down(&mut self) -> Vec<TimerCommand> {
        self.phase = DisplayPhase::TornDown;
        let mut commands = Vec::new();
        self.cancel_pending(&mut commands);
        commands
    }

    fn update_cycle(&mut self, now: DateTime<Utc>) -> Vec<TimerCommand> {
        let mut commands = Vec::new();
        self.cancel_pending(&mut commands);
        self.replace_text(format_relative_time(&self.instant, now));
        self.arm(now, &mut commands);
        commands
    }

    fn replace_text(&mut self, text: String) {
        if text != self.text {
            debug!(from = %self.text, to = %text, "Relative time changed");
            self.text = text;
            self.update_count += 1;
        }
    }

    fn cancel_pending(&mut self, commands: &mut Vec<TimerCommand>) {
        if let Some(pending) = self.pending.take() {
            commands.push(TimerCommand::Cancel { timer: pending.id });
        }
    }

    fn arm(&mut self, now: DateTime<Utc>, commands: &mut Vec<TimerCommand>) {
        let delay_ms = next_update_delay_ms(&self.instant, now);
        let id = TimerId(self.next_timer);
        self.next_timer += 1;

        let deadline = i64::try_from(delay_ms)
            .ok()
            .and_then(|ms| now.checked_add_signed(Duration::milliseconds(ms)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.pending = Some(PendingTimer { id, deadline });
        commands.push(TimerCommand::Arm {
            timer: id,
            delay_ms,
        });
    }
}
