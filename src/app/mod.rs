pub mod actions;
pub mod event_loop;
pub mod state;
pub mod timers;
pub mod update;
pub mod view;
pub mod watch;
