use crate::error::{Result, SpecifyError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

fn at(path: &Path) -> impl FnOnce(std::io::Error) -> SpecifyError + '_ {
    move |source| SpecifyError::FileIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// Prevents partial writes from corrupting documents.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(at(dir))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(at(dir))?;
    tmp.write_all(data).map_err(at(path))?;
    tmp.persist(path).map_err(|e| SpecifyError::FileIo {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(at(path))
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(at(path))
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Copy `src` over `dest` when `src` is a file. Returns false if there was
/// nothing to copy.
pub fn copy_if_exists(src: &Path, dest: &Path) -> Result<bool> {
    if !src.is_file() {
        return Ok(false);
    }
    let data = std::fs::read(src).map_err(at(src))?;
    atomic_write(dest, &data)?;
    Ok(true)
}

/// True when `path` is a directory with at least one entry.
pub fn dir_has_entries(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Names of the immediate child directories of `dir`. A missing or
/// unreadable directory yields an empty list.
pub fn child_dir_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect()
}
