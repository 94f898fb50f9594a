//! Resolved build paths.

use std::path::{Path, PathBuf};

use crate::view::manifest::relative_specifier;

/// File name of the JSON sidecar.
pub const VIEWS_JSON: &str = "views.json";
/// File name of the generated manifest module.
pub const MANIFEST: &str = "views.ts";

/// Paths resolved once per build, read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Bundler root (the frontend directory).
    pub root: PathBuf,
    /// Bundler output directory.
    pub out_dir: PathBuf,
    /// Directory holding the view sources.
    pub views_dir: PathBuf,
    /// Directory receiving the manifest module.
    pub generated_dir: PathBuf,
}

impl BuildContext {
    /// Context with the conventional `views/` and `generated/` layout under `root`.
    pub fn new(root: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            views_dir: root.join("views"),
            generated_dir: root.join("generated"),
            out_dir: out_dir.into(),
            root,
        }
    }

    pub fn with_views_dir(mut self, views_dir: impl Into<PathBuf>) -> Self {
        self.views_dir = views_dir.into();
        self
    }

    pub fn with_generated_dir(mut self, generated_dir: impl Into<PathBuf>) -> Self {
        self.generated_dir = generated_dir.into();
        self
    }

    /// `<parent(out_dir)>/views.json`
    pub fn views_json_path(&self) -> PathBuf {
        self.out_dir
            .parent()
            .unwrap_or(&self.out_dir)
            .join(VIEWS_JSON)
    }

    /// `<generated_dir>/views.ts`
    pub fn manifest_path(&self) -> PathBuf {
        self.generated_dir.join(MANIFEST)
    }

    /// Module specifier of the views directory as seen from the manifest.
    pub fn views_import_base(&self) -> String {
        relative_specifier(&self.generated_dir, &self.views_dir)
    }

    /// Whether `file` lives under the views directory.
    pub fn contains(&self, file: &Path) -> bool {
        file.starts_with(&self.views_dir) && file != self.views_dir
    }

    /// Index key of a view file: its path with the views directory removed.
    ///
    /// The key keeps the leading separator and the file's own separators,
    /// e.g. `/home/index.tsx`. Returns `None` for files outside the views
    /// directory.
    pub fn view_key(&self, file: &Path) -> Option<String> {
        if !self.contains(file) {
            return None;
        }
        let file = file.to_string_lossy();
        let views_dir = self.views_dir.to_string_lossy();
        let views_dir = views_dir.trim_end_matches(['/', '\\']);
        let key = file.get(views_dir.len()..)?;
        if key.starts_with(['/', '\\']) {
            Some(key.to_string())
        } else {
            Some(format!("{}{key}", std::path::MAIN_SEPARATOR))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> BuildContext {
        BuildContext::new("/app/frontend", "/app/target/classes/META-INF/VAADIN/webapp")
    }

    #[test]
    fn test_artifact_paths() {
        let ctx = ctx();
        assert_eq!(
            ctx.views_json_path(),
            PathBuf::from("/app/target/classes/META-INF/VAADIN/views.json")
        );
        assert_eq!(
            ctx.manifest_path(),
            PathBuf::from("/app/frontend/generated/views.ts")
        );
        assert_eq!(ctx.views_import_base(), "../views");
    }

    #[test]
    fn test_view_key() {
        let ctx = ctx();
        assert_eq!(
            ctx.view_key(Path::new("/app/frontend/views/home/index.tsx")).as_deref(),
            Some("/home/index.tsx")
        );
        assert_eq!(
            ctx.view_key(Path::new("/app/frontend/views/about.tsx")).as_deref(),
            Some("/about.tsx")
        );
    }

    #[test]
    fn test_view_key_outside_views() {
        let ctx = ctx();
        assert!(ctx.view_key(Path::new("/app/frontend/main.tsx")).is_none());
        // Prefix match must be per component
        assert!(ctx.view_key(Path::new("/app/frontend/views-old/a.tsx")).is_none());
        assert!(ctx.view_key(Path::new("/app/frontend/views")).is_none());
    }

    #[test]
    fn test_custom_layout() {
        let ctx = BuildContext::new("/app/frontend", "/app/dist/webapp")
            .with_views_dir("/app/frontend/src/pages")
            .with_generated_dir("/app/frontend/src/generated");
        assert_eq!(ctx.views_import_base(), "../pages");
        assert_eq!(
            ctx.view_key(Path::new("/app/frontend/src/pages/x.tsx")).as_deref(),
            Some("/x.tsx")
        );
    }
}
