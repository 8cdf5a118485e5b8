// Error-tolerant decoding of raw document bytes.
//
// Corpora scraped from the wild routinely contain stray Latin-1 bytes or
// truncated multi-byte sequences. By default we drop the bad bytes and keep
// the rest of the document rather than failing the whole comparison.

use serde::{Deserialize, Serialize};

use crate::error::{FightinError, Result};

/// What to do with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Fail on the first invalid sequence.
    Strict,
    /// Silently drop invalid sequences.
    #[default]
    Ignore,
    /// Substitute U+FFFD for each invalid sequence.
    Replace,
}

/// Decode one document's bytes into text according to `policy`.
pub fn decode_document(bytes: &[u8], policy: DecodePolicy) -> Result<String> {
    match policy {
        DecodePolicy::Replace => Ok(String::from_utf8_lossy(bytes).into_owned()),
        DecodePolicy::Strict => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| {
                FightinError::config(format!(
                    "invalid UTF-8 at byte offset {}",
                    e.valid_up_to()
                ))
            }),
        DecodePolicy::Ignore => Ok(decode_ignoring_invalid(bytes)),
    }
}

fn decode_ignoring_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to guarantees this prefix is well-formed
                if let Ok(prefix) = std::str::from_utf8(valid) {
                    out.push_str(prefix);
                }
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    // Truncated sequence at the very end of the input
                    None => return out,
                }
            }
        }
    }
}
