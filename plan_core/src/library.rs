//! External content library loader.
//!
//! Users can point the config at a JSON library file to replace the built-in
//! starter content. A missing or malformed file degrades to the starter
//! library rather than aborting generation.

use crate::types::Library;
use crate::Result;
use std::path::Path;

/// Load a content library from a JSON file
///
/// Returns None if the file doesn't exist or can't be parsed (the caller
/// falls back to the starter library).
pub fn load_library(path: &Path) -> Result<Option<Library>> {
    if !path.exists() {
        tracing::debug!("No library file found at {:?}", path);
        return Ok(None);
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::warn!(
                "Failed to read library at {:?}: {}. Using starter library.",
                path,
                e
            );
            return Ok(None);
        }
    };

    let library: Library = match serde_json::from_str(&contents) {
        Ok(library) => library,
        Err(e) => {
            tracing::warn!(
                "Failed to parse library at {:?}: {}. Using starter library.",
                path,
                e
            );
            return Ok(None);
        }
    };

    tracing::info!(
        "Loaded library: {} exercises, {} templates, {} interval sets",
        library.exercises.len(),
        library.templates.len(),
        library.intervals.len()
    );

    Ok(Some(library))
}

/// Resolve the library to generate against: the configured file if it loads,
/// otherwise the built-in starter content.
pub fn resolve_library(path: Option<&Path>) -> Result<Library> {
    if let Some(path) = path {
        if let Some(library) = load_library(path)? {
            return Ok(library);
        }
    }
    Ok(crate::catalog::starter_library())
}
