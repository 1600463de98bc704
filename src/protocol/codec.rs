//! Newline-delimited JSON framing.
//!
//! One message per line. Lines that are blank or do not parse as a request
//! envelope are dropped without a response.

use serde::Serialize;

use super::RpcRequest;
use crate::error::Result;

/// Parse one input line; `None` for blank or malformed lines.
pub fn decode_line(line: &str) -> Option<RpcRequest> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<RpcRequest>(trimmed) {
        Ok(request) => Some(request),
        Err(e) => {
            log::debug!("Discarding malformed line ({}): {}", e, truncate(trimmed, 200));
            None
        }
    }
}

/// Serialize a message as a single line terminated by `\n`.
pub fn encode_message<T: Serialize>(message: &T) -> Result<String> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
