//! Change bookkeeping shared by the debouncer, classifier and router.

use std::path::PathBuf;

use notify::EventKind;
use notify::event::ModifyKind;
use rustc_hash::FxHashMap;

/// Net change of one path within a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    /// Kind of a raw notify event. Metadata-only modifications and access
    /// events carry no content change and map to `None`.
    ///
    /// Renames arrive as `Modify(Name(..))` for both the old and the new
    /// name; they are recorded as modifications and sorted out by existence
    /// once the batch is classified.
    pub(super) fn of_event(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Created),
            EventKind::Remove(_) => Some(Self::Removed),
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(Self::Modified),
            _ => None,
        }
    }

    /// Fold a later event into the kind already recorded for a path.
    ///
    /// `None` means the two cancel out (created, then removed again).
    pub(super) fn merge(self, later: Self) -> Option<Self> {
        match (self, later) {
            (Self::Removed, Self::Created | Self::Modified) => Some(later),
            (Self::Created, Self::Removed) => None,
            (Self::Modified, Self::Removed) => Some(Self::Removed),
            _ => Some(self),
        }
    }

    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Pending changes keyed by path, one entry per path.
pub(super) type ChangeMap = FxHashMap<PathBuf, ChangeKind>;

/// A classified batch in the shape the view actor consumes.
#[derive(Debug, Default, PartialEq, Eq)]
pub(super) struct ViewBatch {
    /// Files to re-read, sorted
    pub(super) changed: Vec<PathBuf>,
    /// Files or directories that are gone, sorted
    pub(super) removed: Vec<PathBuf>,
}

impl ViewBatch {
    pub(super) fn from_changes(changes: ChangeMap) -> Self {
        let mut batch = Self::default();
        for (path, kind) in changes {
            match kind {
                ChangeKind::Created | ChangeKind::Modified => batch.changed.push(path),
                ChangeKind::Removed => batch.removed.push(path),
            }
        }
        batch.changed.sort();
        batch.removed.sort();
        batch
    }

    pub(super) fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }
}
