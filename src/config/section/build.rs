//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! root = "frontend"                                  # Frontend root (relative to config file)
//! out_dir = "target/classes/META-INF/VAADIN/webapp"  # Bundler output (relative to config file)
//! views = "views"                                    # View sources (relative to root)
//! generated = "generated"                            # Manifest directory (relative to root)
//! ```
//!
//! `views.json` is written next to `out_dir`, the manifest to
//! `<generated>/views.ts`.

use crate::config::{ConfigDiagnostics, ConfigField};
use crate::plugin::BuildContext;
use crate::utils::path::normalize_path;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Frontend root directory.
    pub root: PathBuf,

    /// Bundler output directory.
    pub out_dir: PathBuf,

    /// View sources, under `root`.
    pub views: PathBuf,

    /// Generated manifest directory, under `root`.
    pub generated: PathBuf,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            root: "frontend".into(),
            out_dir: "target/classes/META-INF/VAADIN/webapp".into(),
            views: "views".into(),
            generated: "generated".into(),
        }
    }
}

impl BuildSectionConfig {
    /// Check raw paths before normalization makes them absolute.
    pub fn validate_paths(&self, diag: &mut ConfigDiagnostics) {
        Self::validate_nested(&self.views, ConfigField::Views, diag);
        Self::validate_nested(&self.generated, ConfigField::Generated, diag);
    }

    fn validate_nested(path: &Path, field: ConfigField, diag: &mut ConfigDiagnostics) {
        if path.as_os_str().is_empty() {
            diag.reject(field, "must not be empty");
            return;
        }
        for comp in path.components() {
            let msg = match comp {
                Component::ParentDir => "parent directory '..' not allowed",
                Component::RootDir | Component::Prefix(_) => "absolute paths not allowed",
                _ => continue,
            };
            diag.reject(field, format!("{msg}: {}", path.display()))
                .hint("use a path relative to `build.root`");
            return;
        }
    }

    /// Make all paths absolute: `root` and `out_dir` against `base`,
    /// `views` and `generated` against `root`.
    pub fn normalize(&mut self, base: &Path) {
        self.root = normalize_path(&base.join(&self.root));
        self.out_dir = normalize_path(&base.join(&self.out_dir));
        self.views = normalize_path(&self.root.join(&self.views));
        self.generated = normalize_path(&self.root.join(&self.generated));
    }

    /// Build context from normalized paths.
    pub fn context(&self) -> BuildContext {
        BuildContext::new(&self.root, &self.out_dir)
            .with_views_dir(&self.views)
            .with_generated_dir(&self.generated)
    }
}
