//! View discovery.
//!
//! ```text
//! walk (views dir) --> scan (one file) --> ViewIndex --> manifest (views.json + views.ts)
//! ```
//!
//! - `scan` - extract `meta` and the default-exported function from one source file
//! - `index` - ordered map of view path to [`ViewData`]
//! - `walk` - depth-first file enumeration
//! - `manifest` - render and write the derived artifacts

pub mod index;
pub mod manifest;
pub mod scan;
pub mod walk;

pub use index::ViewIndex;
pub use scan::{ScanError, scan_source};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Routing data extracted from a single view file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewData {
    /// Verbatim source text of the `meta` initializer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_value: Option<String>,
    /// Identifier of the `export default function` (empty when anonymous).
    pub default_name: String,
}

#[cfg(test)]
impl ViewData {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            meta_value: None,
            default_name: default_name.into(),
        }
    }

    pub fn with_meta(mut self, meta_value: impl Into<String>) -> Self {
        self.meta_value = Some(meta_value.into());
        self
    }
}

/// Extensions the scanner understands.
const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "mjs", "cts", "cjs"];

/// Check if a file can contain a view (script source, not a style or asset).
pub fn is_view_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_data_serialization_omits_missing_meta() {
        let json = serde_json::to_string(&ViewData::new("Home")).unwrap();
        assert_eq!(json, r#"{"defaultName":"Home"}"#);
    }

    #[test]
    fn test_view_data_serialization_with_meta() {
        let data = ViewData::new("Home").with_meta("{title: 'Home'}");
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"metaValue":"{title: 'Home'}","defaultName":"Home"}"#);
    }

    #[test]
    fn test_view_data_deserialize_without_meta() {
        let data: ViewData = serde_json::from_str(r#"{"defaultName":"About"}"#).unwrap();
        assert_eq!(data, ViewData::new("About"));
    }

    #[test]
    fn test_is_view_source() {
        assert!(is_view_source(Path::new("/views/home/index.tsx")));
        assert!(is_view_source(Path::new("/views/about.ts")));
        assert!(is_view_source(Path::new("/views/legacy.jsx")));
        assert!(!is_view_source(Path::new("/views/home/index.css")));
        assert!(!is_view_source(Path::new("/views/logo.svg")));
        assert!(!is_view_source(Path::new("/views/README")));
    }
}
