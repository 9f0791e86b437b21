use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::actions::Action;
use crate::app::state::AppState;
use crate::app::timers::TimerDriver;
use crate::app::update::update;
use crate::app::view;
use crate::util::clock::{Clock, SystemClock};
use crate::util::config::AppConfig;
use crate::util::instant::Instant;

pub async fn run(config: AppConfig, selected: Instant) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, config, selected, &SystemClock).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    selected: Instant,
    clock: &impl Clock,
) -> Result<()> {
    let mut state = AppState::new(selected, &config.demo.examples, &config.ui, clock.now());

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let mut timers = TimerDriver::new(action_tx);

    for effect in state.activate_all(clock.now()) {
        timers.apply(effect);
    }
    info!(displays = timers.pending_count(), "Displays activated");

    let mut event_stream = crossterm::event::EventStream::new();

    loop {
        // Render only when something visible changed
        if state.dirty {
            terminal.draw(|f| view::render(f, &state))?;
            state.dirty = false;
        }

        if state.should_quit {
            break;
        }

        tokio::select! {
            // Terminal events
            maybe_event = event_stream.next() => {
                if let Some(Ok(event)) = maybe_event
                    && let Some(action) = map_event_to_action(&event, &state) {
                        for effect in update(&mut state, action, clock.now()) {
                            timers.apply(effect);
                        }
                    }
            }
            // Timer firings
            Some(action) = action_rx.recv() => {
                if let Action::TimerFired { display, timer } = &action {
                    timers.fired(*display, *timer);
                }
                for effect in update(&mut state, action, clock.now()) {
                    timers.apply(effect);
                }
            }
        }
    }

    debug!(pending = timers.pending_count(), "Shutting down timers");
    timers.shutdown();
    Ok(())
}

fn map_event_to_action(event: &Event, state: &AppState) -> Option<Action> {
    if let Event::Resize(..) = event {
        return Some(Action::Resize);
    }

    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    if matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    // Handle selector edit mode
    if state.selector.editing {
        return match code {
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::Char(c) => Some(Action::EditInput(*c)),
            _ => None,
        };
    }

    // Normal mode
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('e') | KeyCode::Enter => Some(Action::StartEdit),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::ShiftSelected(60)),
        KeyCode::Char('-') => Some(Action::ShiftSelected(-60)),
        KeyCode::Char('>') => Some(Action::ShiftSelected(3600)),
        KeyCode::Char('<') => Some(Action::ShiftSelected(-3600)),
        KeyCode::Char('n') => Some(Action::ResetSelected),
        _ => None,
    }
}
