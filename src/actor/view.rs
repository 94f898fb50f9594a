//! View Actor
//!
//! Applies debounced batches to the [`ViewWatcher`]. Changed files become
//! concurrent hot updates whose reads run on the blocking pool; removed
//! files are dropped from the index; a config change reloads the config and
//! rescans from scratch.

use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use super::coordinator::watch_targets;
use super::messages::{ViewMsg, WatchTargets};
use crate::cli::Cli;
use crate::config::ProjectConfig;
use crate::logger::{status_error, status_success, status_unchanged};
use crate::plugin::{HotUpdate, ViewWatcher};

pub struct ViewActor {
    rx: mpsc::Receiver<ViewMsg>,
    watcher: Arc<ViewWatcher>,
    cli: &'static Cli,
    retarget_tx: mpsc::Sender<WatchTargets>,
    /// Last full scan succeeded. Otherwise the next batch rescans everything.
    healthy: bool,
}

impl ViewActor {
    pub fn new(
        rx: mpsc::Receiver<ViewMsg>,
        watcher: Arc<ViewWatcher>,
        cli: &'static Cli,
        retarget_tx: mpsc::Sender<WatchTargets>,
        healthy: bool,
    ) -> Self {
        Self {
            rx,
            watcher,
            cli,
            retarget_tx,
            healthy,
        }
    }

    /// Run until shutdown, then end the build.
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                ViewMsg::Changes { changed, removed } if self.healthy => {
                    self.apply_changes(changed, removed).await;
                }
                ViewMsg::Changes { .. } => {
                    crate::debug!("watch"; "retrying scan after change");
                    self.rescan("views rescanned").await;
                }
                ViewMsg::ConfigChanged => self.reload().await,
                ViewMsg::Shutdown => break,
            }
        }
        self.watcher.build_end();
        crate::debug!("watch"; "view actor stopped");
    }

    async fn apply_changes(&self, changed: Vec<PathBuf>, removed: Vec<PathBuf>) {
        let mut outcomes: Vec<(PathBuf, HotUpdate)> = removed
            .into_iter()
            .map(|path| {
                let outcome = self.watcher.remove_view(&path);
                (path, outcome)
            })
            .collect();

        let mut tasks = JoinSet::new();
        for path in changed {
            let watcher = Arc::clone(&self.watcher);
            tasks.spawn(async move {
                let outcome = watcher.hot_update(&path, read_file(path.clone())).await;
                (path, outcome)
            });
        }
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => outcomes.push(result),
                Err(e) => crate::log!("error"; "hot update task failed: {}", e),
            }
        }

        self.report(&outcomes);
    }

    fn report(&self, outcomes: &[(PathBuf, HotUpdate)]) {
        for (path, outcome) in outcomes {
            crate::debug!("watch"; "{}: {}", outcome.label(), path.display());
        }

        let ctx = self.watcher.context();
        let display = |path: &PathBuf| match ctx.as_ref().and_then(|c| c.view_key(path)) {
            Some(key) => key,
            None => path.display().to_string(),
        };

        if let Some((path, HotUpdate::Failed(e))) = outcomes
            .iter()
            .find(|(_, outcome)| matches!(outcome, HotUpdate::Failed(_)))
        {
            status_error(&format!("cannot scan {}", display(path)), &e.to_string());
            return;
        }

        let rewritten: Vec<_> = outcomes
            .iter()
            .filter(|(_, outcome)| matches!(outcome, HotUpdate::Rewritten))
            .map(|(path, _)| display(path))
            .collect();
        if rewritten.is_empty() {
            status_unchanged("views unchanged");
        } else {
            status_success(&format!("views updated: {}", rewritten.join(", ")));
        }
    }

    /// Reload the config file and rescan with the new paths.
    async fn reload(&mut self) {
        let config = match ProjectConfig::load(self.cli) {
            Ok(config) => config,
            Err(e) => {
                // Keep the previous context until the config is fixed
                status_error("config reload failed", &format!("{e:#}"));
                return;
            }
        };

        self.watcher.build_end();
        self.watcher.config_resolved(config.build_context());
        let _ = self.retarget_tx.send(watch_targets(&config)).await;
        self.rescan("config reloaded").await;
    }

    async fn rescan(&mut self, summary: &str) {
        self.watcher.build_end();
        match full_scan(&self.watcher).await {
            Ok(count) => {
                self.healthy = true;
                status_success(&format!("{summary}, {}", plural_views(count)));
            }
            Err(e) => {
                self.healthy = false;
                status_error("scan failed", &format!("{e:#}"));
            }
        }
    }
}

/// Run `build_start` on the blocking pool.
pub async fn full_scan(watcher: &Arc<ViewWatcher>) -> anyhow::Result<usize> {
    let watcher = Arc::clone(watcher);
    let count = tokio::task::spawn_blocking(move || watcher.build_start()).await??;
    Ok(count)
}

pub fn plural_views(count: usize) -> String {
    match count {
        1 => "1 view".to_string(),
        n => format!("{n} views"),
    }
}

/// Deferred reader for a hot update.
fn read_file(path: PathBuf) -> impl Future<Output = io::Result<String>> {
    async move {
        match tokio::task::spawn_blocking(move || std::fs::read_to_string(&path)).await {
            Ok(content) => content,
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    struct Session {
        _temp: TempDir,
        views: PathBuf,
        watcher: Arc<ViewWatcher>,
        tx: mpsc::Sender<ViewMsg>,
        retarget_rx: mpsc::Receiver<WatchTargets>,
        actor: Option<ViewActor>,
    }

    fn session(healthy: bool) -> Session {
        let temp = TempDir::new().unwrap();
        let root = crate::utils::path::normalize_path(temp.path());
        let config = root.join("viewwatch.toml");
        fs::write(&config, "").unwrap();
        let views = root.join("frontend/views");
        fs::create_dir_all(&views).unwrap();

        let argv = ["viewwatch", "-C", config.to_str().unwrap(), "watch"];
        let cli: &'static Cli = Box::leak(Box::new(Cli::try_parse_from(argv).unwrap()));
        let project = ProjectConfig::load(cli).unwrap();

        let watcher = Arc::new(ViewWatcher::new());
        watcher.config_resolved(project.build_context());
        let (tx, rx) = mpsc::channel(8);
        let (retarget_tx, retarget_rx) = mpsc::channel(8);
        let actor = ViewActor::new(rx, Arc::clone(&watcher), cli, retarget_tx, healthy);

        Session {
            _temp: temp,
            views,
            watcher,
            tx,
            retarget_rx,
            actor: Some(actor),
        }
    }

    #[tokio::test]
    async fn test_changes_update_index() {
        let mut s = session(true);
        let home = s.views.join("home.tsx");
        fs::write(&home, "export default function Home() {}").unwrap();
        let old = s.views.join("old.tsx");

        let actor = s.actor.take().unwrap();
        let handle = tokio::spawn(actor.run());
        s.tx.send(ViewMsg::Changes {
            changed: vec![home.clone()],
            removed: vec![old],
        })
        .await
        .unwrap();

        // Index is cleared on shutdown, so look before stopping
        for _ in 0..100 {
            if !s.watcher.snapshot().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(s.watcher.snapshot().len(), 1);
        assert_eq!(s.watcher.write_count(), 1);

        s.tx.send(ViewMsg::Shutdown).await.unwrap();
        handle.await.unwrap();
        assert!(s.watcher.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_session_rescans() {
        let mut s = session(false);
        fs::write(s.views.join("a.tsx"), "export default function A() {}").unwrap();
        fs::write(s.views.join("b.tsx"), "export default function B() {}").unwrap();

        let mut actor = s.actor.take().unwrap();
        // A change to any file rescans the whole directory
        actor.rescan("views rescanned").await;
        assert!(actor.healthy);
        assert_eq!(s.watcher.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_reload_retargets_watcher() {
        let mut s = session(true);
        let mut actor = s.actor.take().unwrap();
        actor.reload().await;

        let targets = s.retarget_rx.try_recv().unwrap();
        assert_eq!(targets.views_dir, s.views);
        assert!(actor.healthy);
    }

    #[test]
    fn test_plural_views() {
        assert_eq!(plural_views(1), "1 view");
        assert_eq!(plural_views(0), "0 views");
        assert_eq!(plural_views(3), "3 views");
    }
}
