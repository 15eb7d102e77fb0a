//! Input file selection.

use std::path::{Path, PathBuf};

use log::info;

use crate::config::DEFAULT_INPUT_FILE;
use crate::error_handling::GenerateError;

/// Picks the domain list to read.
///
/// An explicit path is used as is. Otherwise `general.txt` in `dir` wins,
/// then the only `.txt` file in `dir`.
///
/// # Errors
///
/// Returns `GenerateError::Input` when no file was given and `dir` holds
/// no `.txt` file, several of them, or cannot be listed.
pub async fn select_input_file(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<PathBuf, GenerateError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let default = dir.join(DEFAULT_INPUT_FILE);
    if tokio::fs::metadata(&default)
        .await
        .is_ok_and(|meta| meta.is_file())
    {
        return Ok(default);
    }

    let mut candidates = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| GenerateError::Input(format!("cannot list {}: {e}", dir.display())))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| GenerateError::Input(format!("cannot list {}: {e}", dir.display())))?
    {
        let path = entry.path();
        let is_txt = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
        if is_txt && entry.file_type().await.is_ok_and(|t| t.is_file()) {
            candidates.push(path);
        }
    }
    candidates.sort();

    match candidates.len() {
        0 => Err(GenerateError::Input(format!(
            "no input file given and no {DEFAULT_INPUT_FILE} or other .txt file in {}",
            dir.display()
        ))),
        1 => {
            let path = candidates.remove(0);
            info!("Using input file {}", path.display());
            Ok(path)
        }
        _ => Err(GenerateError::Input(format!(
            "no input file given and several .txt files in {}: {}",
            dir.display(),
            candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|name| name.to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}
