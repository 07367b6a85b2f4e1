mod app;
mod commands;
mod config;
mod logging;
mod render;
mod store;

pub use app::run_app;
