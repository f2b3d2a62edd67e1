//! Reading the legacy item file, whose text encoding is not declared anywhere.
//!
//! Candidates are tried strictly in order and the first clean decode wins. The
//! single-byte encodings accept almost any input, so stricter ones must come first.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Utf8,
    Latin1,
    Windows1252,
}

/// Bytes left unassigned by the Windows-1252 code page.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Fixed fallback order, strictest first.
pub const DEFAULT_ENCODINGS: [SourceEncoding; 3] = [
    SourceEncoding::Utf8,
    SourceEncoding::Latin1,
    SourceEncoding::Windows1252,
];

impl SourceEncoding {
    pub fn name(self) -> &'static str {
        match self {
            SourceEncoding::Utf8 => "utf-8",
            SourceEncoding::Latin1 => "latin-1",
            SourceEncoding::Windows1252 => "windows-1252",
        }
    }

    /// Returns `None` when the bytes are not valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            SourceEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned),
            // Every byte is a valid code point in ISO-8859-1.
            SourceEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            // encoding_rs follows WHATWG and maps the unassigned bytes to C1
            // controls; the code page proper has no characters there.
            SourceEncoding::Windows1252 => {
                if bytes.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                    return None;
                }
                encoding_rs::WINDOWS_1252
                    .decode_without_bom_handling_and_without_replacement(bytes)
                    .map(Cow::into_owned)
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSource {
    pub path: PathBuf,
    pub encoding: SourceEncoding,
    pub content: String,
}

pub fn read_source<P: AsRef<Path>>(path: P, encodings: &[SourceEncoding]) -> Result<DecodedSource> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ConvertError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    for &encoding in encodings {
        match encoding.decode(&bytes) {
            Some(content) => {
                tracing::debug!(path = %path.display(), %encoding, "decoded source");
                if Some(&encoding) != encodings.first() {
                    tracing::warn!(path = %path.display(), %encoding, "source decoded with fallback encoding");
                }
                return Ok(DecodedSource {
                    path: path.to_path_buf(),
                    encoding,
                    content,
                });
            }
            None => tracing::debug!(path = %path.display(), %encoding, "decode failed, trying next"),
        }
    }

    let tried: Vec<&str> = encodings.iter().map(|e| e.name()).collect();
    Err(ConvertError::SourceUnreadable {
        path: path.to_path_buf(),
        reason: format!("no candidate encoding could decode it (tried: [{}])", tried.join(", ")),
    })
}
