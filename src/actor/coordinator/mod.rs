//! Actor Coordinator - wires up the watch session
//!
//! - Attaches the file watcher before the initial scan
//! - Runs the initial scan
//! - Runs the actors until Ctrl+C, then ends the build

mod watch_paths;

pub use watch_paths::watch_targets;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::{ViewMsg, WatchTargets};
use super::view::{ViewActor, full_scan, plural_views};
use crate::cli::Cli;
use crate::config::ProjectConfig;
use crate::logger::{status_error, status_success};
use crate::plugin::ViewWatcher;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    cli: &'static Cli,
    config: Arc<ProjectConfig>,
    watcher: Arc<ViewWatcher>,
}

impl Coordinator {
    pub fn new(cli: &'static Cli, config: Arc<ProjectConfig>) -> Self {
        Self {
            cli,
            config,
            watcher: Arc::new(ViewWatcher::new()),
        }
    }

    /// Run the watch session until Ctrl+C.
    pub async fn run(self) -> Result<()> {
        let (view_tx, view_rx) = mpsc::channel::<ViewMsg>(CHANNEL_BUFFER);
        let (retarget_tx, retarget_rx) = mpsc::channel::<WatchTargets>(4);

        // Register before scanning so Ctrl+C during the scan is not lost
        let mut shutdown_rx = crate::core::register_watch();

        let targets = watch_targets(&self.config);
        let fs_actor = FsActor::new(targets.clone(), view_tx.clone(), &self.config.watch)
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;
        crate::log!("watch"; "watching {}", targets.views_dir.display());

        self.watcher.config_resolved(self.config.build_context());
        let healthy = match full_scan(&self.watcher).await {
            Ok(count) => {
                status_success(&format!("initial scan, {}", plural_views(count)));
                true
            }
            Err(e) => {
                status_error("initial scan failed", &format!("{e:#}"));
                false
            }
        };

        let view_actor = ViewActor::new(
            view_rx,
            Arc::clone(&self.watcher),
            self.cli,
            retarget_tx,
            healthy,
        );

        crate::debug!("actor"; "start");
        let fs_handle = tokio::spawn(fs_actor.run(retarget_rx));
        let mut view_handle = tokio::spawn(view_actor.run());

        tokio::select! {
            _ = shutdown_rx.wait_for(|stop| *stop) => {
                crate::debug!("actor"; "shutdown signal received");
                let _ = view_tx.send(ViewMsg::Shutdown).await;
                let _ = tokio::time::timeout(Duration::from_millis(500), &mut view_handle).await;
            }
            _ = &mut view_handle => {}
        }

        fs_handle.abort();
        // Covers a view actor that did not finish in time
        self.watcher.build_end();
        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
