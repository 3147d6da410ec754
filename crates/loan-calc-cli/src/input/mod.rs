pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Structured input from `--input <file>` or, failing that, JSON piped on
/// stdin. `None` means the command should build its input from flags.
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_input(path)?));
    }
    match stdin::read_piped()? {
        Some(text) => Ok(Some(
            serde_json::from_str(&text).map_err(|e| format!("Failed to parse stdin: {e}"))?,
        )),
        None => Ok(None),
    }
}
