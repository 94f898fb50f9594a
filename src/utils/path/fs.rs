//! Path normalization utilities.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first so paths compare equal to what the file
/// watcher reports. Falls back to the path itself when absolute, or joined
/// with the current directory when relative.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a CLI path: absolute as-is, cwd-relative when it exists there,
/// otherwise relative to `fallback_dir`.
#[inline]
pub fn resolve_path(path: &Path, fallback_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    if path.exists() {
        return normalize_path(path);
    }
    normalize_path(&fallback_dir.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/views/home.tsx"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("relative/views/home.tsx"));
    }

    #[test]
    fn test_normalize_path_resolves_dots() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("frontend/views")).unwrap();
        let dotted = temp.path().join("frontend/./views/../views");
        assert_eq!(
            normalize_path(&dotted),
            normalize_path(&temp.path().join("frontend/views"))
        );
    }

    #[test]
    fn test_resolve_path_absolute() {
        let resolved = resolve_path(Path::new("/absolute/views.json"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/absolute/views.json"));
    }

    #[test]
    fn test_resolve_path_fallback() {
        let resolved = resolve_path(Path::new("nonexistent/views.json"), Path::new("/fallback"));
        assert_eq!(resolved, PathBuf::from("/fallback/nonexistent/views.json"));
    }
}
