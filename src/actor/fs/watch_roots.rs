use std::path::PathBuf;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

use crate::actor::messages::WatchTargets;

/// Watch-root consistency manager.
///
/// - Attach existing roots at startup
/// - Re-attach roots that were removed and recreated
/// - Swap roots after a config reload
pub(super) struct WatchRoots {
    desired: Vec<(PathBuf, RecursiveMode)>,
    attached: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(targets: &WatchTargets) -> Self {
        Self {
            desired: Self::roots_of(targets),
            attached: FxHashSet::default(),
        }
    }

    /// Views recursively; the config file through its directory so that
    /// editors replacing the file are still seen.
    pub(super) fn roots_of(targets: &WatchTargets) -> Vec<(PathBuf, RecursiveMode)> {
        let mut roots = vec![(targets.views_dir.clone(), RecursiveMode::Recursive)];
        if let Some(parent) = targets.config_path.as_ref().and_then(|p| p.parent())
            && !roots.iter().any(|(p, _)| p == parent)
        {
            roots.push((parent.to_path_buf(), RecursiveMode::NonRecursive));
        }
        roots
    }

    pub(super) fn attach_existing(
        &mut self,
        watcher: &mut RecommendedWatcher,
    ) -> notify::Result<()> {
        for (path, mode) in &self.desired {
            if !path.exists() {
                continue;
            }
            watcher.watch(path, *mode)?;
            self.attached.insert(path.clone());
        }

        Ok(())
    }

    pub(super) fn maintain(&mut self, watcher: &mut RecommendedWatcher) {
        // Drop stale handles for roots that no longer exist.
        self.attached.retain(|path| path.exists());

        for (path, mode) in &self.desired {
            if self.attached.contains(path) || !path.exists() {
                continue;
            }

            if watcher.watch(path, *mode).is_ok() {
                self.attached.insert(path.clone());
                crate::debug!("watch"; "re-attached watch: {}", path.display());
            }
        }
    }

    /// Replace the desired roots, unwatching the ones no longer wanted.
    pub(super) fn retarget(&mut self, targets: &WatchTargets, watcher: &mut RecommendedWatcher) {
        let desired = Self::roots_of(targets);
        if desired == self.desired {
            return;
        }

        let dropped: Vec<_> = self
            .attached
            .iter()
            .filter(|path| !desired.iter().any(|(p, _)| p == *path))
            .cloned()
            .collect();
        for path in dropped {
            let _ = watcher.unwatch(&path);
            self.attached.remove(&path);
            crate::debug!("watch"; "detached watch: {}", path.display());
        }

        self.desired = desired;
        self.maintain(watcher);
    }
}
