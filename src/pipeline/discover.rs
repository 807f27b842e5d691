//! Listing of match documents in a source directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{StatsError, StatsResult};

/// List `*.json` documents under `dir`, sorted by path.
///
/// Flat listing uses a glob pattern; `recursive` walks subdirectories and matches the
/// extension case-insensitively. Any listing failure is returned as
/// [`StatsError::Discovery`].
pub fn discover_documents(dir: impl AsRef<Path>, recursive: bool) -> StatsResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(StatsError::Discovery {
            message: format!("source is not a directory ({})", dir.display()),
        });
    }

    let mut paths = if recursive { walk(dir)? } else { glob_flat(dir)? };
    paths.sort();
    Ok(paths)
}

fn glob_flat(dir: &Path) -> StatsResult<Vec<PathBuf>> {
    let dir_str = dir.to_str().ok_or_else(|| StatsError::Discovery {
        message: format!("source path is not valid utf-8 ({})", dir.display()),
    })?;
    let pattern = Path::new(&glob::Pattern::escape(dir_str)).join("*.json");
    let pattern = pattern.to_string_lossy();

    let entries = glob::glob(&pattern).map_err(|e| StatsError::Discovery {
        message: format!("invalid pattern '{pattern}': {e}"),
    })?;

    let mut out = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| StatsError::Discovery {
            message: format!("cannot read {}: {}", e.path().display(), e.error()),
        })?;
        if path.is_file() {
            out.push(path);
        }
    }
    Ok(out)
}

fn walk(dir: &Path) -> StatsResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|e| StatsError::Discovery {
            message: format!("cannot walk {}: {e}", dir.display()),
        })?;
        if entry.file_type().is_file() && has_json_extension(entry.path()) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
