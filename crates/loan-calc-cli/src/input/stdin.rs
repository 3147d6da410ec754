use std::io::{self, Read};

/// Text piped on stdin, if any. Interactive terminals and empty pipes
/// give `None` so the caller can fall back to flags.
pub fn read_piped() -> Result<Option<String>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    log::debug!("read {} bytes from stdin", trimmed.len());
    Ok(Some(trimmed.to_string()))
}
