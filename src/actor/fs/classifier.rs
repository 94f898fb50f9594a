//! Reconcile a debounced batch with the filesystem.
//!
//! ```text
//! correct_by_existence → expand_directories → ViewBatch
//! ```
//!
//! Event kinds are only hints: a rename reports both names as modified, an
//! atomic save may report a removal for a file that is back, and a directory
//! moved into the views tree is a single event for the directory. After this
//! step every changed path is an existing file and every removed path is gone.

use std::path::PathBuf;

use super::types::{ChangeKind, ChangeMap, ViewBatch};
use crate::view::walk::walk;

pub(super) fn classify(mut changes: ChangeMap) -> ViewBatch {
    correct_by_existence(&mut changes);
    expand_directories(&mut changes);
    ViewBatch::from_changes(changes)
}

/// Trust the filesystem over the reported kind.
fn correct_by_existence(changes: &mut ChangeMap) {
    changes.retain(|path, kind| {
        let exists = path.exists();
        match *kind {
            ChangeKind::Created if !exists => {
                crate::debug!("watch"; "discard created (gone): {}", path.display());
                false
            }
            ChangeKind::Modified if !exists => {
                crate::debug!("watch"; "modified->removed (gone): {}", path.display());
                *kind = ChangeKind::Removed;
                true
            }
            ChangeKind::Removed if exists => {
                crate::debug!("watch"; "removed->modified (back): {}", path.display());
                *kind = ChangeKind::Modified;
                true
            }
            _ => true,
        }
    });
}

/// Replace created or modified directories by the files below them.
fn expand_directories(changes: &mut ChangeMap) {
    let dirs: Vec<PathBuf> = changes
        .iter()
        .filter(|(path, kind)| **kind != ChangeKind::Removed && path.is_dir())
        .map(|(path, _)| path.clone())
        .collect();

    for dir in dirs {
        changes.remove(&dir);
        let files = match walk(&dir) {
            Ok(files) => files,
            Err(e) => {
                crate::debug!("watch"; "cannot walk {}: {}", dir.display(), e);
                continue;
            }
        };
        for file in files.flatten() {
            crate::debug!("watch"; "found in {}: {}", dir.display(), file.display());
            changes.entry(file).or_insert(ChangeKind::Created);
        }
    }
}
