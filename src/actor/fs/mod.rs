//! FileSystem Actor
//!
//! Watches the views directory and the config file and sends debounced
//! batches to the ViewActor. The watcher is attached in [`FsActor::new`],
//! before the initial scan, so edits made during the scan are buffered
//! instead of lost.
//!
//! ```text
//! Watcher → Debouncer (timing, dedup) → Router (config/views) → Classifier (fs state) → ViewMsg
//! ```

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use super::messages::{ViewMsg, WatchTargets};
use crate::config::WatchConfig;

// Existence checks and directory expansion.
mod classifier;
// Pure timing and deduplication.
mod debouncer;
// Debounced batch -> ViewMsg.
mod router;
// Shared fs event types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


use debouncer::Debouncer;
use router::{log_events, route};
use watch_roots::WatchRoots;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    targets: WatchTargets,
    view_tx: mpsc::Sender<ViewMsg>,
    debouncer: Debouncer,
}

impl FsActor {
    /// Create the actor and start watching immediately.
    pub fn new(
        targets: WatchTargets,
        view_tx: mpsc::Sender<ViewMsg>,
        watch: &WatchConfig,
    ) -> notify::Result<Self> {
        // notify only offers a sync callback
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        // Missing roots are re-attached once they appear
        let mut watch_roots = WatchRoots::new(&targets);
        watch_roots.attach_existing(&mut watcher)?;

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            targets,
            view_tx,
            debouncer: Debouncer::new(watch),
        })
    }

    /// Run the actor event loop until the view actor goes away.
    ///
    /// `retarget_rx` delivers new watch targets after a config reload.
    pub async fn run(self, mut retarget_rx: mpsc::Receiver<WatchTargets>) {
        let notify_rx = self.notify_rx;
        let view_tx = self.view_tx;
        let mut targets = self.targets;
        let mut debouncer = self.debouncer;
        let mut watcher = self.watcher;
        let mut watch_roots = self.watch_roots;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Poll notify events on a plain thread and forward them into tokio
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                Some(event) = async_rx.recv() => debouncer.add_event(&event),
                Some(next) = retarget_rx.recv() => {
                    watch_roots.retarget(&next, &mut watcher);
                    targets = next;
                }
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    watch_roots.maintain(&mut watcher);
                    if process_changes(&mut debouncer, &view_tx, &targets).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Forward the pending batch, if ready.
///
/// Returns `Err(())` if the ViewActor shut down
async fn process_changes(
    debouncer: &mut Debouncer,
    view_tx: &mpsc::Sender<ViewMsg>,
    targets: &WatchTargets,
) -> Result<(), ()> {
    let Some(changes) = debouncer.take_if_ready() else {
        return Ok(());
    };
    log_events(&changes);

    match route(changes, targets) {
        Some(msg) => view_tx.send(msg).await.map_err(|_| ()),
        None => Ok(()),
    }
}
