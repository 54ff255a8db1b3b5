//! # Record Codec
//!
//! A record is a small JSON document:
//!
//! ```text
//! {"format":1,"mode":"text","cursor":5,"content":"hello"}
//! ```
//!
//! Field order is fixed by the struct, and nothing time-dependent goes in, so
//! encoding the same state twice yields the same bytes. Flushing an unchanged
//! buffer therefore rewrites an identical file.
//!
//! Decoding clamps the cursor into the content. A record written by an older
//! session may carry an offset that no longer fits; that is recoverable, not
//! corruption.

use crate::model::{BufferState, ModeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const FORMAT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("record is empty")]
    Empty,

    #[error("record is not well formed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported record format {0}")]
    UnsupportedFormat(u32),
}

#[derive(Serialize)]
struct RecordOut<'a> {
    format: u32,
    mode: &'a ModeId,
    cursor: usize,
    content: &'a str,
}

#[derive(Deserialize)]
struct RecordIn {
    format: u32,
    mode: ModeId,
    cursor: usize,
    content: String,
}

pub fn encode(state: &BufferState) -> Vec<u8> {
    let record = RecordOut {
        format: FORMAT_VERSION,
        mode: &state.mode,
        cursor: state.cursor,
        content: &state.content,
    };
    // Only strings and integers go in; serialization cannot fail.
    serde_json::to_vec(&record).unwrap_or_default()
}

pub fn decode(bytes: &[u8]) -> Result<BufferState, DecodeError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(DecodeError::Empty);
    }

    let record: RecordIn = serde_json::from_slice(bytes)?;
    if record.format != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedFormat(record.format));
    }

    Ok(BufferState {
        content: record.content,
        cursor: record.cursor,
        mode: record.mode,
    }
    .clamped())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(content: &str, cursor: usize, mode: &str) -> BufferState {
        BufferState {
            content: content.to_string(),
            cursor,
            mode: ModeId::from(mode),
        }
    }

    #[test]
    fn test_roundtrip_preserves_triple() {
        let cases = [
            state("", 0, "fundamental"),
            state("hello", 5, "text"),
            state("line one\nline two\n", 9, "rust"),
            state("naïve café ☕", 12, "markdown"),
            state("{\"looks\": \"like json\"}", 3, "json"),
        ];
        for original in cases {
            let decoded = decode(&encode(&original)).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let s = state("same", 2, "text");
        assert_eq!(encode(&s), encode(&s.clone()));
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&state("hello", 5, "text"));
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"format":1,"mode":"text","cursor":5,"content":"hello"}"#
        );
    }

    #[test]
    fn test_decode_clamps_stale_cursor() {
        let bytes = br#"{"format":1,"mode":"text","cursor":99,"content":"abc"}"#;
        let decoded = decode(bytes).unwrap();
        assert_eq!(decoded.cursor, 3);
        assert_eq!(decoded.content, "abc");
    }

    #[test]
    fn test_decode_clamps_by_chars_not_bytes() {
        let bytes = r#"{"format":1,"mode":"text","cursor":10,"content":"ééé"}"#;
        assert_eq!(decode(bytes.as_bytes()).unwrap().cursor, 3);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode(b""), Err(DecodeError::Empty)));
        assert!(matches!(decode(b"  \n"), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = encode(&state("hello world", 3, "text"));
        let cut = &bytes[..bytes.len() / 2];
        assert!(matches!(decode(cut), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_missing_field() {
        let bytes = br#"{"format":1,"mode":"text","content":"abc"}"#;
        assert!(matches!(decode(bytes), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_negative_cursor_is_malformed() {
        let bytes = br#"{"format":1,"mode":"text","cursor":-1,"content":"abc"}"#;
        assert!(matches!(decode(bytes), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_decode_unknown_format() {
        let bytes = br#"{"format":7,"mode":"text","cursor":0,"content":""}"#;
        assert!(matches!(
            decode(bytes),
            Err(DecodeError::UnsupportedFormat(7))
        ));
    }

    #[test]
    fn test_decode_plain_text_is_malformed() {
        assert!(matches!(
            decode(b"just some notes"),
            Err(DecodeError::Malformed(_))
        ));
    }
}
