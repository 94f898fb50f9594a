//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find the config file by searching upward from the current directory.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Find `config_name` in `start` or the nearest ancestor holding it.
///
/// ```text
/// /home/user/app/frontend/views/  ← start
/// /home/user/app/viewwatch.toml   ← found!
/// ```
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_in_ancestor() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("frontend/views/home");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("viewwatch.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("viewwatch.toml")).unwrap();
        assert_eq!(found, temp.path().join("viewwatch.toml"));
    }

    #[test]
    fn test_nearest_wins() {
        let temp = TempDir::new().unwrap();
        let inner = temp.path().join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(temp.path().join("viewwatch.toml"), "").unwrap();
        fs::write(inner.join("viewwatch.toml"), "").unwrap();

        let found = find_config_file_from(&inner, Path::new("viewwatch.toml")).unwrap();
        assert_eq!(found, inner.join("viewwatch.toml"));
    }

    #[test]
    fn test_directory_with_config_name_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/viewwatch.toml");
        fs::create_dir_all(&dir).unwrap();
        let found = find_config_file_from(&temp.path().join("a"), Path::new("viewwatch.toml"));
        assert_ne!(found, Some(dir));
    }

    #[test]
    fn test_absolute_path() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.toml");
        assert!(find_config_file_from(Path::new("/"), &config).is_none());
        fs::write(&config, "").unwrap();
        assert_eq!(find_config_file_from(Path::new("/"), &config), Some(config));
    }
}
