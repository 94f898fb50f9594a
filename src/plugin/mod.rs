//! View discovery lifecycle.
//!
//! [`ViewWatcher`] owns the build context and the view index for one
//! build or watch session and reacts to the bundler-style lifecycle events:
//!
//! ```text
//! config_resolved --> build_start --> hot_update* / remove_view* --> build_end
//!   (paths)          (full scan)       (one file each)              (reset)
//! ```
//!
//! Hot updates may run concurrently. Updates of the same path are sequenced
//! with tickets (see [`sequence`]), and the index comparison plus artifact
//! write happen in one critical section.

mod context;
pub mod sequence;


pub use context::BuildContext;

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use rayon::prelude::*;
use thiserror::Error;

use crate::view::manifest::write_artifacts;
use crate::view::walk::walk;
use crate::view::{ScanError, ViewData, ViewIndex, is_view_source, scan_source};
use sequence::{Sequencer, Ticket};

/// Errors that abort a full scan.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build context not resolved before build start")]
    Unresolved,

    #[error("cannot walk views directory `{}`", path.display())]
    Walk { path: PathBuf, source: io::Error },

    #[error("cannot read `{}`", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed view `{}`: {source}", path.display())]
    Scan { path: PathBuf, source: ScanError },
}

/// Why a hot update could not be applied.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("read failed: {0}")]
    Read(#[from] io::Error),

    #[error("{0}")]
    Scan(#[from] ScanError),
}

/// Outcome of a single hot update.
#[derive(Debug)]
pub enum HotUpdate {
    /// File is outside the views directory (or no build is active).
    Ignored,
    /// Index serialization did not change, artifacts left alone.
    Unchanged,
    /// Index changed and artifacts were rewritten.
    Rewritten,
    /// A newer update of the same file started in the meantime.
    Superseded,
    /// The file could not be read or scanned; its entry was left as is.
    Failed(UpdateError),
}

impl HotUpdate {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Unchanged => "unchanged",
            Self::Rewritten => "rewritten",
            Self::Superseded => "superseded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Lifecycle controller for view discovery.
#[derive(Debug, Default)]
pub struct ViewWatcher {
    ctx: RwLock<Option<Arc<BuildContext>>>,
    index: Mutex<ViewIndex>,
    sequencer: Sequencer,
    /// Number of artifact write passes so far.
    writes: AtomicUsize,
}

impl ViewWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the resolved paths. Must happen before [`Self::build_start`].
    pub fn config_resolved(&self, ctx: BuildContext) {
        *self.ctx.write() = Some(Arc::new(ctx));
    }

    pub fn context(&self) -> Option<Arc<BuildContext>> {
        self.ctx.read().clone()
    }

    /// Full scan of the views directory.
    ///
    /// Walk and read errors, duplicate `meta` and duplicate default exports
    /// abort the scan before the index is touched. A file the parser gives up
    /// on is skipped with a warning. Artifacts are written once when at least
    /// one view exists. Returns the number of indexed views.
    pub fn build_start(&self) -> Result<usize, BuildError> {
        let ctx = self.context().ok_or(BuildError::Unresolved)?;
        let views_dir = &ctx.views_dir;

        let files = walk(views_dir)
            .and_then(|files| {
                files
                    .filter(|file| file.as_ref().map_or(true, |path| is_view_source(path)))
                    .collect::<io::Result<Vec<_>>>()
            })
            .map_err(|source| BuildError::Walk {
                path: views_dir.clone(),
                source,
            })?;

        let scanned = files
            .par_iter()
            .map(|path| scan_file(&ctx, path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut index = self.index.lock();
        for (key, data) in scanned {
            if let Some(data) = data {
                index.insert(key, data);
            }
        }

        crate::debug!("scan"; "{} files, {} views", files.len(), index.len());
        if !index.is_empty() {
            self.write(&ctx, &index);
        }
        Ok(index.len())
    }

    /// Rescan one changed file.
    ///
    /// `read` supplies the file content and is only awaited for files inside
    /// the views directory.
    pub async fn hot_update<F>(&self, file: &Path, read: F) -> HotUpdate
    where
        F: Future<Output = io::Result<String>>,
    {
        let Some((ctx, key)) = self.locate(file) else {
            return HotUpdate::Ignored;
        };
        let ticket = self.sequencer.begin(&key);
        let outcome = self.rescan(&ctx, &ticket, file, read).await;
        self.sequencer.finish(&ticket);
        outcome
    }

    async fn rescan<F>(&self, ctx: &BuildContext, ticket: &Ticket, file: &Path, read: F) -> HotUpdate
    where
        F: Future<Output = io::Result<String>>,
    {
        if !is_view_source(file) {
            return self.apply(ctx, ticket, None);
        }

        let content = match read.await {
            Ok(content) => content,
            Err(e) => return HotUpdate::Failed(e.into()),
        };
        match scan_source(file, &content) {
            Ok(data) => self.apply(ctx, ticket, data),
            Err(e) => HotUpdate::Failed(e.into()),
        }
    }

    /// Drop the entry of a deleted file, or every entry below a deleted
    /// directory.
    pub fn remove_view(&self, file: &Path) -> HotUpdate {
        let Some((ctx, key)) = self.locate(file) else {
            return HotUpdate::Ignored;
        };
        let ticket = self.sequencer.begin(&key);

        let mut index = self.index.lock();
        if !self.sequencer.is_current(&ticket) {
            return HotUpdate::Superseded;
        }
        let removed = index.remove_tree(&key);
        self.sequencer.finish(&ticket);
        // Reads still in flight for files of the removed tree must not
        // bring their entries back
        for key in &removed {
            self.sequencer.invalidate(key);
        }
        if removed.is_empty() {
            return HotUpdate::Unchanged;
        }

        crate::debug!("watch"; "removed {}", removed.join(", "));
        self.write(&ctx, &index);
        HotUpdate::Rewritten
    }

    /// Clear the index. Outstanding hot updates become superseded.
    pub fn build_end(&self) {
        self.index.lock().clear();
        self.sequencer.reset();
    }

    /// Clone of the current index.
    #[cfg(test)]
    pub fn snapshot(&self) -> ViewIndex {
        self.index.lock().clone()
    }

    /// Number of artifact write passes performed.
    #[cfg(test)]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn locate(&self, file: &Path) -> Option<(Arc<BuildContext>, String)> {
        let ctx = self.context()?;
        let key = ctx.view_key(file)?;
        Some((ctx, key))
    }

    fn apply(&self, ctx: &BuildContext, ticket: &Ticket, data: Option<ViewData>) -> HotUpdate {
        let mut index = self.index.lock();
        if !self.sequencer.is_current(ticket) {
            return HotUpdate::Superseded;
        }

        let before = index.serialize();
        index.apply(ticket.key(), data);
        if index.serialize() == before {
            return HotUpdate::Unchanged;
        }

        self.write(ctx, &index);
        HotUpdate::Rewritten
    }

    fn write(&self, ctx: &BuildContext, index: &ViewIndex) {
        let report = write_artifacts(ctx, index);
        self.writes.fetch_add(1, Ordering::SeqCst);
        if report.is_complete() {
            crate::debug!("write"; "{} views", index.len());
        }
    }
}

/// Read and scan one file of the full scan.
fn scan_file(ctx: &BuildContext, path: &Path) -> Result<(String, Option<ViewData>), BuildError> {
    let content = std::fs::read_to_string(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let data = match scan_source(path, &content) {
        Ok(data) => data,
        Err(ScanError::Syntax(message)) => {
            crate::log!("warning"; "skipping {}: {}", path.display(), message);
            None
        }
        Err(source) => {
            return Err(BuildError::Scan {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let key = ctx
        .view_key(path)
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok((key, data))
}
