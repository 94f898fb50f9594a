use std::path::Path;
use std::time::{Duration, Instant};

use super::types::{ChangeKind, ChangeMap};
use crate::config::WatchConfig;
use crate::utils::path::normalize_path;

/// Timing and deduplication of raw notify events. No knowledge of views.
pub(super) struct Debouncer {
    pub(super) changes: ChangeMap,
    pub(super) last_event: Option<Instant>,
    pub(super) last_batch: Option<Instant>,
    debounce: Duration,
    cooldown: Duration,
}

impl Debouncer {
    pub(super) fn new(config: &WatchConfig) -> Self {
        Self {
            changes: ChangeMap::default(),
            last_event: None,
            last_batch: None,
            debounce: config.debounce(),
            cooldown: config.cooldown(),
        }
    }

    /// Record a notify event. Repeated events for a path are folded with
    /// [`ChangeKind::merge`]; editor temp files are skipped.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = ChangeKind::of_event(&event.kind) else {
            return;
        };
        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            let path = normalize_path(path);

            match self.changes.get(&path).copied() {
                None => {
                    crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
                Some(existing) => match existing.merge(kind) {
                    Some(merged) if merged == existing => continue,
                    Some(merged) => {
                        crate::debug!("watch"; "{}->{}: {}", existing.label(), merged.label(), path.display());
                        self.changes.insert(path, merged);
                    }
                    None => {
                        crate::debug!("watch"; "discard created+removed: {}", path.display());
                        self.changes.remove(&path);
                    }
                },
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Take the pending batch once debounce and cooldown have elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<ChangeMap> {
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;

        if changes.is_empty() {
            return None;
        }

        self.last_batch = Some(Instant::now());
        Some(changes)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < self.debounce {
            return false;
        }

        if let Some(last_batch) = self.last_batch
            && last_batch.elapsed() < self.cooldown
        {
            return false;
        }

        !self.changes.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining = self.debounce.saturating_sub(last_event.elapsed());

        let cooldown_remaining = self
            .last_batch
            .map(|t| self.cooldown.saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
        || name.starts_with('#')
}
