use crate::actor::messages::WatchTargets;
use crate::config::ProjectConfig;

/// Views directory plus the config file, watched even before it exists so
/// that creating one triggers a reload.
pub fn watch_targets(config: &ProjectConfig) -> WatchTargets {
    WatchTargets {
        views_dir: config.build.views.clone(),
        config_path: Some(config.config_path.clone()),
    }
}
