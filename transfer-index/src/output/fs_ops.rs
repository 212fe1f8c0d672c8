use serde::Serialize;
use std::{fs::File, path::Path};

use crate::app::TransferAppError;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), TransferAppError>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| TransferAppError::WriteError {
            path: dirspath.to_path_buf(),
            message: format!("error building output directory: {e}"),
        })
    } else {
        Ok(())
    }
}

/// opens `directory/filename` for writing while respecting the user's overwrite
/// preference. returns None, after logging a warning, when the file exists and may
/// not be replaced.
pub fn create_output_file(
    directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<Option<File>, TransferAppError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        log::warn!(
            "not writing {}, file exists (use --overwrite to replace it)",
            filepath.display()
        );
        return Ok(None);
    }
    let file = File::create(&filepath).map_err(|e| TransferAppError::WriteError {
        path: filepath.clone(),
        message: e.to_string(),
    })?;
    Ok(Some(file))
}

/// writes a value as pretty-printed JSON.
pub fn write_json<T: Serialize>(
    value: &T,
    directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<(), TransferAppError> {
    if let Some(file) = create_output_file(directory, filename, overwrite)? {
        serde_json::to_writer_pretty(file, value).map_err(|e| TransferAppError::WriteError {
            path: directory.join(filename),
            message: format!("failure serializing JSON: {e}"),
        })?;
    }
    Ok(())
}

/// writes a value as TOML.
pub fn write_toml<T: Serialize>(
    value: &T,
    directory: &Path,
    filename: &str,
    overwrite: bool,
) -> Result<(), TransferAppError> {
    let contents = toml::to_string_pretty(value).map_err(|e| TransferAppError::WriteError {
        path: directory.join(filename),
        message: format!("failure serializing TOML: {e}"),
    })?;
    if let Some(mut file) = create_output_file(directory, filename, overwrite)? {
        std::io::Write::write_all(&mut file, contents.as_bytes()).map_err(|e| {
            TransferAppError::WriteError {
                path: directory.join(filename),
                message: e.to_string(),
            }
        })?;
    }
    Ok(())
}
