//! Watch mode: initial scan, then hot updates until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actor::Coordinator;
use crate::cli::Cli;
use crate::config::ProjectConfig;

pub fn watch_views(cli: &'static Cli, config: ProjectConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(Coordinator::new(cli, Arc::new(config)).run())
}
