use std::fmt;

use serde::Serialize;

use crate::error::{HL7Error, Result};

/// Segments are always terminated by a carriage return once input is normalized.
pub const SEGMENT_SEPARATOR: char = '\r';

/// Every message starts with this segment name.
pub const HEADER_MARKER: &str = "MSH";

/// The delimiter set a message declares in its own header.
///
/// The header spells them out at fixed character offsets 3 through 7, in the
/// order field, composite, repeat, escape, subcomposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Delimiters {
    #[serde(rename = "fieldSeparator")]
    pub field: char,
    #[serde(rename = "compositeSeparator")]
    pub composite: char,
    #[serde(rename = "repeatSeparator")]
    pub repeat: char,
    #[serde(rename = "escapeSeparator")]
    pub escape: char,
    #[serde(rename = "subCompositeSeparator")]
    pub sub_composite: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            composite: '^',
            repeat: '~',
            escape: '\\',
            sub_composite: '&',
        }
    }
}

impl Delimiters {
    /// Read the delimiter set from a header line such as `MSH|^~\&|SENDER|...`.
    ///
    /// The caller is expected to have checked the `MSH` prefix already; this only
    /// guards the length so a truncated header is reported instead of indexed.
    pub fn from_header(line: &str) -> Result<Self> {
        let mut chars = line.chars().skip(HEADER_MARKER.len());
        match (
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
            chars.next(),
        ) {
            (Some(field), Some(composite), Some(repeat), Some(escape), Some(sub_composite)) => {
                Ok(Self {
                    field,
                    composite,
                    repeat,
                    escape,
                    sub_composite,
                })
            }
            _ => Err(HL7Error::MalformedHeader {
                length: line.chars().count(),
            }),
        }
    }

    /// The encoding characters as they appear in the header's second field.
    pub fn encoding_characters(&self) -> String {
        [self.composite, self.repeat, self.escape, self.sub_composite]
            .iter()
            .collect()
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.field, self.encoding_characters())
    }
}
