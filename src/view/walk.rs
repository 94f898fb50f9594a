//! Directory walker.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

/// Lazily enumerate every regular file under `dir`, depth-first.
///
/// Entries of a directory come in file-name order, so two walks over an
/// unchanged tree yield the same sequence. A missing root is an error;
/// errors met while descending are yielded as items.
pub fn walk(dir: &Path) -> io::Result<impl Iterator<Item = io::Result<PathBuf>>> {
    let metadata = fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("not a directory: {}", dir.display()),
        ));
    }

    let walker = WalkDir::new(dir).sort(true).skip_hidden(false);
    Ok(walker.into_iter().filter_map(|entry| match entry {
        Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.path())),
        Ok(_) => None,
        Err(e) => Some(Err(io::Error::from(e))),
    }))
}
