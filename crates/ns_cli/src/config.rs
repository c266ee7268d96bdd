use ns_core::{Error, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_KEY_FILE: &str = "key.txt";

/// Reads the NewsAPI key from `path`, dropping trailing whitespace and newlines.
pub fn read_api_key(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("could not read API key file {}: {}", path.display(), e))
    })?;

    let key = contents.trim_end();
    if key.is_empty() {
        return Err(Error::Config(format!("API key file {} is empty", path.display())));
    }
    Ok(key.to_string())
}

/// An explicit key wins over the key file.
pub fn resolve_api_key(explicit: Option<&str>, key_file: &Path) -> Result<String> {
    match explicit.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => Ok(key.to_string()),
        None => read_api_key(key_file),
    }
}
