use chrono::{DateTime, Utc};
use tracing::debug;

use crate::app::actions::{Action, SideEffect};
use crate::app::state::{AppState, SELECTOR_DISPLAY};
use crate::display::memo::renders_same;
use crate::util::datetime_input::{format_datetime_local, parse_datetime_local};
use crate::util::instant::Instant;

pub fn update(state: &mut AppState, action: Action, now: DateTime<Utc>) -> Vec<SideEffect> {
    state.changed.clear();

    match action {
        Action::Quit => {
            state.should_quit = true;
            state.tear_down_all()
        }
        Action::MoveUp => {
            if state.cursor > 0 {
                state.cursor -= 1;
                state.dirty = true;
            }
            vec![]
        }
        Action::MoveDown => {
            if state.cursor + 1 < state.examples.len() {
                state.cursor += 1;
                state.dirty = true;
            }
            vec![]
        }
        Action::StartEdit => {
            state.selector.editing = true;
            state.selector.input = format_datetime_local(&state.selector.selected);
            state.selector.input_error = None;
            state.dirty = true;
            vec![]
        }
        Action::EditInput(ch) => {
            if state.selector.editing {
                state.selector.input.push(ch);
                state.selector.input_error = None;
                state.dirty = true;
            }
            vec![]
        }
        Action::EditBackspace => {
            if state.selector.editing {
                state.selector.input.pop();
                state.selector.input_error = None;
                state.dirty = true;
            }
            vec![]
        }
        Action::CommitEdit => {
            if !state.selector.editing {
                return vec![];
            }
            state.dirty = true;
            match parse_datetime_local(&state.selector.input) {
                Ok(instant) => {
                    state.selector.editing = false;
                    state.selector.input_error = None;
                    select_instant(state, instant, now)
                }
                Err(e) => {
                    debug!(error = %e, "Rejected selector input");
                    state.selector.input_error = Some(e.to_string());
                    vec![]
                }
            }
        }
        Action::CancelEdit => {
            state.selector.editing = false;
            state.selector.input = format_datetime_local(&state.selector.selected);
            state.selector.input_error = None;
            state.dirty = true;
            vec![]
        }
        Action::ShiftSelected(secs) => match state.selector.selected.checked_add_secs(secs) {
            Some(instant) => select_instant(state, instant, now),
            None => vec![],
        },
        Action::ResetSelected => select_instant(state, Instant::from_datetime(now), now),
        Action::TimerFired { display, timer } => {
            let selected_row = state.selected_example_id();
            let Some(target) = state.display_mut(display) else {
                return vec![];
            };
            let before = target.update_count();
            let commands = target.on_timer(timer, now);
            if target.update_count() != before {
                state.changed.push(display);
                state.dirty = true;
            } else if display == selected_row && !commands.is_empty() {
                // Detail line shows the selected row's next wake time
                state.dirty = true;
            }
            SideEffect::from_commands(display, commands)
        }
        Action::Resize => {
            state.dirty = true;
            vec![]
        }
    }
}

/// Feed a newly picked instant to the selector and its display.
fn select_instant(state: &mut AppState, instant: Instant, now: DateTime<Utc>) -> Vec<SideEffect> {
    if instant == state.selector.selected {
        return vec![];
    }

    let unchanged = renders_same(&state.selector.selected, &instant, now);
    if unchanged {
        debug!(%instant, "Selected time changed without changing relative text");
    } else {
        state.changed.push(SELECTOR_DISPLAY);
    }

    state.selector.selected = instant;
    state.selector.input = format_datetime_local(&instant);
    state.dirty = true;

    let commands = state.selector_display.set_instant(instant, now);
    SideEffect::from_commands(SELECTOR_DISPLAY, commands)
}
