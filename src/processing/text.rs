//! Conversions between message text and the byte payload.
//!
//! The codec itself only moves bytes. Capacity is 8 bits per payload byte under either
//! convention, but a UTF-8 character may cost up to 4 bytes.

use serde::{Deserialize, Serialize};

use super::error::{StegoError, StegoResult};

/// How text is turned into payload bytes and back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// One byte per character; only U+0000..=U+00FF can be written.
    #[default]
    Latin1,
    /// Standard UTF-8.
    Utf8,
}

impl TextEncoding {
    pub fn to_bytes(self, text: &str) -> StegoResult<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Latin1 => text
                .chars()
                .enumerate()
                .map(|(index, character)| {
                    u8::try_from(u32::from(character))
                        .map_err(|_| StegoError::UnencodableCharacter { character, index })
                })
                .collect(),
        }
    }

    pub fn to_text(self, bytes: &[u8]) -> StegoResult<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|_| StegoError::InvalidUtf8),
            Self::Latin1 => Ok(bytes.iter().copied().map(char::from).collect()),
        }
    }
}
