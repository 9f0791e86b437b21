use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::app::actions::{Action, DisplayId, SideEffect};
use crate::display::TimerId;

/// Runs the one-shot timers requested by displays as tokio tasks.
///
/// Each firing is delivered back as [`Action::TimerFired`]. Holds at most one
/// task per display.
#[derive(Debug)]
pub struct TimerDriver {
    tx: mpsc::UnboundedSender<Action>,
    tasks: HashMap<DisplayId, (TimerId, JoinHandle<()>)>,
}

impl TimerDriver {
    pub fn new(tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tx,
            tasks: HashMap::new(),
        }
    }

    pub fn apply(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::ArmTimer {
                display,
                timer,
                delay,
            } => {
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Action::TimerFired { display, timer });
                });
                let display_id = display.0;
                debug!(display = display_id, timer = timer.value(), ?delay, "Timer armed");

                if let Some((old, old_handle)) = self.tasks.insert(display, (timer, handle)) {
                    warn!(
                        display = display_id,
                        timer = old.value(),
                        "Timer replaced without cancellation"
                    );
                    old_handle.abort();
                }
            }
            SideEffect::CancelTimer { display, timer } => {
                if let Some(handle) = self.take(display, timer) {
                    handle.abort();
                    let display_id = display.0;
                    debug!(display = display_id, timer = timer.value(), "Timer cancelled");
                }
            }
        }
    }

    /// Forget a timer whose firing has been received.
    pub fn fired(&mut self, display: DisplayId, timer: TimerId) {
        let _ = self.take(display, timer);
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn pending_timer(&self, display: DisplayId) -> Option<TimerId> {
        self.tasks.get(&display).map(|(timer, _)| *timer)
    }

    pub fn shutdown(&mut self) {
        for (_, (_, handle)) in self.tasks.drain() {
            handle.abort();
        }
    }

    fn take(&mut self, display: DisplayId, timer: TimerId) -> Option<JoinHandle<()>> {
        if self.pending_timer(display) != Some(timer) {
            return None;
        }
        self.tasks.remove(&display).map(|(_, handle)| handle)
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
