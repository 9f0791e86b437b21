pub mod clock;
pub mod config;
pub mod datetime_input;
pub mod instant;
pub mod time;
