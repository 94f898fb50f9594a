//! Actor system for watch mode.
//!
//! ```text
//! FsActor --ViewMsg--> ViewActor --> ViewWatcher (hot_update / remove_view / rescan)
//! (notify,              (concurrent
//!  debounce)             hot updates)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types between the actors
//! - `fs` - File system watcher with debouncing
//! - `view` - Applies batches of changes to the lifecycle controller
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod view;

pub use coordinator::Coordinator;
