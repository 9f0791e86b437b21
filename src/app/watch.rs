use std::io::Write;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::actions::{Action, DisplayId, SideEffect};
use crate::app::timers::TimerDriver;
use crate::display::RelativeTimeDisplay;
use crate::util::clock::Clock;
use crate::util::instant::Instant;

const WATCHED: DisplayId = DisplayId(0);

/// Host a single display without a terminal UI, writing one line per visible
/// change. Stops on Ctrl-C, or after `max_updates` changes.
pub async fn run<W: Write>(
    instant: Instant,
    initial_text: Option<String>,
    max_updates: Option<u64>,
    clock: &impl Clock,
    out: &mut W,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut timers = TimerDriver::new(tx);

    let mut display = match initial_text {
        Some(text) => RelativeTimeDisplay::hydrated(instant, text),
        None => RelativeTimeDisplay::new(instant, clock.now()),
    };
    writeln!(out, "{}", display.text()).context("Failed to write output")?;

    for effect in SideEffect::from_commands(WATCHED, display.activate(clock.now())) {
        timers.apply(effect);
    }
    info!(%instant, "Watching relative time");

    let mut seen = display.update_count();
    loop {
        if max_updates.is_some_and(|max| seen >= max) {
            break;
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted");
                break;
            }
            Some(action) = rx.recv() => {
                let Action::TimerFired { display: id, timer } = action else {
                    continue;
                };
                timers.fired(id, timer);
                let commands = display.on_timer(timer, clock.now());
                for effect in SideEffect::from_commands(WATCHED, commands) {
                    timers.apply(effect);
                }

                if display.update_count() != seen {
                    seen = display.update_count();
                    writeln!(out, "{}", display.text()).context("Failed to write output")?;
                    out.flush().context("Failed to flush output")?;
                }
            }
        }
    }

    for effect in SideEffect::from_commands(WATCHED, display.tear_down()) {
        timers.apply(effect);
    }
    timers.shutdown();
    Ok(())
}
