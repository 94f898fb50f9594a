//! Process-wide state.

mod state;

pub use state::{register_watch, setup_shutdown_handler};
