use std::fmt::Display;

use crate::StlParsingErrorDetail;

/// Shortest buffer that can be classified.
pub const MIN_FILE_LEN: usize = 5;

const SNIFF_LEN: usize = 32;
const ASCII_KEYWORD: &[u8] = b"solid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

impl Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StlFormat::Ascii => write!(f, "ascii"),
            StlFormat::Binary => write!(f, "binary"),
        }
    }
}

/// Classifies a buffer by looking for `solid` at the start of its first 32 bytes.
///
/// This is a prefix test only: a binary file whose header begins with `solid` is reported as
/// ascii and will fail in the ascii decoder.
pub fn sniff_format(bytes: &[u8]) -> Result<StlFormat, StlParsingErrorDetail> {
    if bytes.len() < MIN_FILE_LEN {
        return Err(StlParsingErrorDetail::TooSmall { len: bytes.len() });
    }

    let prefix = &bytes[..bytes.len().min(SNIFF_LEN)];
    let start = prefix.iter().position(|b| !is_space(*b)).unwrap_or(prefix.len());
    if prefix[start..].starts_with(ASCII_KEYWORD) {
        Ok(StlFormat::Ascii)
    } else {
        Ok(StlFormat::Binary)
    }
}

// `u8::is_ascii_whitespace` leaves out the vertical tab.
fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b'\x0b'
}
