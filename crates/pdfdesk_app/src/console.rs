//! Terminal front end: stdin commands in, rendered view model out.

mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod render;

pub use app::run_app;
