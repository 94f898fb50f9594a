//! One-shot build: config resolved → build start → build end.

use anyhow::{Context, Result};

use crate::config::ProjectConfig;
use crate::log;
use crate::plugin::ViewWatcher;

/// Scan the views directory once and write the artifacts.
///
/// Returns the number of indexed views.
pub fn build_views(config: &ProjectConfig) -> Result<usize> {
    let ctx = config.build_context();
    let views_json = ctx.views_json_path();
    let manifest = ctx.manifest_path();

    let watcher = ViewWatcher::new();
    watcher.config_resolved(ctx);
    let result = watcher
        .build_start()
        .context("view scan failed");
    watcher.build_end();

    let count = result?;
    if count == 0 {
        log!("build"; "no views found, nothing written");
    } else {
        log!("build"; "{} views", count);
        log!("write"; "{}", views_json.display());
        log!("write"; "{}", manifest.display());
    }
    Ok(count)
}
