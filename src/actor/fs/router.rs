use super::classifier::classify;
use super::types::ChangeMap;
use crate::actor::messages::{ViewMsg, WatchTargets};

pub(super) fn log_events(changes: &ChangeMap) {
    for (path, kind) in changes {
        crate::debug!("watch"; "{}: {}", kind.label(), path.display());
    }
}

/// Turn a debounced batch into the message for the view actor.
///
/// A config change supersedes everything else in the batch since it ends
/// in a full rescan. Paths outside the views directory are dropped before
/// the batch is classified.
pub(super) fn route(mut changes: ChangeMap, targets: &WatchTargets) -> Option<ViewMsg> {
    let config_changed = targets
        .config_path
        .as_ref()
        .is_some_and(|config| changes.contains_key(config));
    if config_changed {
        return Some(ViewMsg::ConfigChanged);
    }

    changes.retain(|path, _| path.starts_with(&targets.views_dir));
    let batch = classify(changes);
    if batch.is_empty() {
        return None;
    }
    Some(ViewMsg::Changes {
        changed: batch.changed,
        removed: batch.removed,
    })
}
