use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::FeedlogResult;

/// Read a JSON document, degrading to the empty default when the file is
/// missing, blank, or corrupt. Corruption is reported, never fatal: the
/// worst case is starting over from an empty document.
pub(super) fn load_document<T: DeserializeOwned + Default>(path: &Path) -> T {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return T::default(),
    };
    if contents.trim().is_empty() {
        return T::default();
    }
    match serde_json::from_str(&contents) {
        Ok(document) => document,
        Err(e) => {
            eprintln!(
                "Warning: {} is not valid JSON ({}); starting from an empty document",
                path.display(),
                e
            );
            T::default()
        }
    }
}

/// Write a JSON document, pretty-printed with 2-space indentation so the
/// files stay human-diffable. Non-ASCII text is stored literally.
pub(super) fn save_document<T: Serialize>(path: &Path, document: &T) -> FeedlogResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}
