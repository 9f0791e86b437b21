pub mod app;
pub mod display;
pub mod ui;
pub mod util;
