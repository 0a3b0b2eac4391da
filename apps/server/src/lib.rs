pub mod api;
pub mod config;
pub mod error;
pub mod models;
mod main_lib;

pub use main_lib::{build_state, AppState};
pub use market_pulse_core::logging::init_tracing;
