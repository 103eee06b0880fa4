use std::fs;
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::Serialize;
use crate::errors::FileError;

pub const APP_DIR_NAME: &str = "Craftfolio";

/// Environment variable that overrides the per-user data directory.
pub const DATA_DIR_ENV: &str = "CRAFTFOLIO_DATA_DIR";

pub fn get_app_data_dir() -> Result<PathBuf, FileError> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => dirs::data_dir().ok_or(FileError::NoDataDir)?.join(APP_DIR_NAME),
    };

    ensure_dir(&data_dir)?;
    Ok(data_dir)
}

pub fn ensure_dir(dir: &Path) -> Result<(), FileError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| FileError::io(dir, e))?;
    }
    Ok(())
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, FileError> {
    let content = match read_text(path)? {
        Some(content) => content,
        None => return Ok(None),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| FileError::json(path, e))
}

/// Write `value` as pretty JSON, replacing the file in one rename.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FileError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| FileError::json(path, e))?;

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, content).map_err(|e| FileError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| FileError::io(path, e))?;

    Ok(())
}

pub fn read_text(path: &Path) -> Result<Option<String>, FileError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(FileError::io(path, e)),
    }
}

/// Remove a file; removing a file that is already gone is fine.
pub fn remove_file(path: &Path) -> Result<(), FileError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FileError::io(path, e)),
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
