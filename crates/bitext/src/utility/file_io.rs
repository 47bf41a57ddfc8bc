//! # File IO
//!
//! Artifacts are written to a sibling temp file and renamed into place,
//! so a failed write never leaves a truncated artifact behind.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{BitextError, Result};

/// Expand `~` and environment variables in a configured path.
///
/// ## Arguments
/// * `key` - the config key the path came from; named in errors.
/// * `path` - the raw path.
pub fn expand_path(
    key: &str,
    path: &str,
) -> Result<PathBuf> {
    let expanded =
        shellexpand::full(path).map_err(|e| BitextError::config(key, e.to_string()))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// The `"{path}.tmp"` sibling a write is staged to.
fn staging_path(path: &Path) -> PathBuf {
    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    PathBuf::from(tmp_name)
}

/// Write to the staging path of `path`; removes it again on failure.
fn stage<F>(
    path: &Path,
    write: F,
) -> Result<PathBuf>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = staging_path(path);
    let result = (|| -> Result<()> {
        let mut writer = BufWriter::new(File::create(&tmp_path)?);
        write(&mut writer)?;
        writer.flush()?;
        Ok(())
    })();

    match result {
        Ok(()) => Ok(tmp_path),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

/// Write a file atomically.
///
/// Creates the parent directories; writes to `"{path}.tmp"`, then renames.
pub fn write_atomic<P, F>(
    path: P,
    write: F,
) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let path = path.as_ref();
    let tmp_path = stage(path, write)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write a set of files, all or nothing.
///
/// Every file is staged before any is renamed into place; if a stage
/// fails, the files staged so far are removed and no target is touched.
pub fn write_all_atomic<P>(files: &[(P, Vec<u8>)]) -> Result<()>
where
    P: AsRef<Path>,
{
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (path, bytes) in files {
        let path = path.as_ref();
        match stage(path, |w| Ok(w.write_all(bytes)?)) {
            Ok(tmp_path) => staged.push((tmp_path, path)),
            Err(e) => {
                for (tmp_path, _) in &staged {
                    let _ = fs::remove_file(tmp_path);
                }
                return Err(e);
            }
        }
    }

    for (tmp_path, path) in staged {
        fs::rename(&tmp_path, path)?;
    }
    Ok(())
}

/// Serialize `value` as pretty json, with a trailing newline.
pub fn to_json_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize,
{
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write `value` as pretty json, atomically.
pub fn write_json_path<P, T>(
    path: P,
    value: &T,
) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let bytes = to_json_bytes(value)?;
    write_atomic(path, |w| Ok(w.write_all(&bytes)?))
}

/// Read a json file.
pub fn read_json_path<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
