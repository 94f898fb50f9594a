//! Actor message definitions.
//!
//! ```text
//! FsActor --ViewMsg--> ViewActor
//!    ^                     |
//!    +----- WatchRoots ----+   (after a config reload moved the views dir)
//! ```

use std::path::PathBuf;

/// Messages to the view actor
#[derive(Debug)]
pub enum ViewMsg {
    /// A debounced batch of view file changes
    Changes {
        /// Created or modified files, re-read and rescanned
        changed: Vec<PathBuf>,
        /// Deleted files
        removed: Vec<PathBuf>,
    },
    /// Config file changed: reload, then full rescan
    ConfigChanged,
    /// Stop the actor (Ctrl+C)
    Shutdown,
}

/// Roots the fs actor should watch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTargets {
    /// Watched recursively
    pub views_dir: PathBuf,
    /// Watched through its parent directory
    pub config_path: Option<PathBuf>,
}
