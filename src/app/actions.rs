use std::time::Duration;

use crate::display::{TimerCommand, TimerId};

/// Identifies one display hosted by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayId(pub usize);

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    StartEdit,
    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,
    ShiftSelected(i64),
    ResetSelected,
    TimerFired { display: DisplayId, timer: TimerId },
    Resize,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    ArmTimer {
        display: DisplayId,
        timer: TimerId,
        delay: Duration,
    },
    CancelTimer {
        display: DisplayId,
        timer: TimerId,
    },
}

impl SideEffect {
    pub fn from_commands(display: DisplayId, commands: Vec<TimerCommand>) -> Vec<SideEffect> {
        commands
            .into_iter()
            .map(|command| match command {
                TimerCommand::Arm { timer, delay_ms } => SideEffect::ArmTimer {
                    display,
                    timer,
                    delay: Duration::from_millis(delay_ms),
                },
                TimerCommand::Cancel { timer } => SideEffect::CancelTimer { display, timer },
            })
            .collect()
    }
}
