use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::CacheError;

/// `Ok(false)` only when nothing exists at `path`; any other failure to stat
/// the path is returned as an error.
pub fn path_exists(path: &Path) -> Result<bool, CacheError> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CacheError::filesystem(path, e)),
    }
}

pub fn ensure_dir(path: &Path) -> Result<(), CacheError> {
    fs::create_dir_all(path).map_err(|e| CacheError::filesystem(path, e))
}

/// Writes to a temporary file next to `path` and renames it into place, so a
/// crash never leaves a half written file under the final name.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<(), CacheError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|e| CacheError::filesystem(dir, e))?;
    file.write_all(content)
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| CacheError::filesystem(file.path(), e))?;
    file.persist(path)
        .map_err(|e| CacheError::filesystem(path, e.error))?;
    Ok(())
}

pub fn save_to_json_file<T: Serialize>(path: &Path, data: &T) -> Result<(), CacheError> {
    let json = serde_json::to_vec(data).map_err(|source| CacheError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_atomically(path, &json)
}

pub fn load_from_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, CacheError> {
    let content = fs::read(path).map_err(|e| CacheError::filesystem(path, e))?;
    serde_json::from_slice(&content).map_err(|source| CacheError::Serialize {
        path: path.to_path_buf(),
        source,
    })
}
