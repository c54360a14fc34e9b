use std::borrow::Cow;
use std::fmt::Display;
use std::str::FromStr;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::GtdPrepError;

/// Label of the encoding the GTD export is published in.
pub const DEFAULT_ENCODING_LABEL: &str = "latin1";

/// Labels decoded as ISO-8859-1 proper (one byte per code point). The WHATWG table maps these
/// to windows-1252 instead, which disagrees on 0x80..=0x9F.
const ISO_8859_1_LABELS: [&str; 9] = [
    "latin1",
    "latin-1",
    "latin_1",
    "l1",
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859_1",
    "cp819",
];

/// Character encoding of a source file. The latin-1 labels resolve to ISO-8859-1, every
/// other WHATWG label (`windows-1252`, `utf-8`, ...) to the matching `encoding_rs` encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SourceEncoding {
    #[default]
    Latin1,
    Whatwg(&'static Encoding),
}

impl SourceEncoding {
    pub fn from_label(label: &str) -> Result<Self, GtdPrepError> {
        let normalised = label.trim().to_ascii_lowercase();
        if ISO_8859_1_LABELS.contains(&normalised.as_str()) {
            return Ok(Self::Latin1);
        }
        Encoding::for_label(normalised.as_bytes())
            .map(Self::Whatwg)
            .ok_or_else(|| GtdPrepError::UnknownEncoding(label.to_string()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes` strictly, returning `None` on the first malformed sequence rather than
    /// substituting replacement characters. A leading BOM is kept as text.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            // Every byte is a valid ISO-8859-1 code point
            Self::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            Self::Whatwg(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

impl FromStr for SourceEncoding {
    type Err = GtdPrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for SourceEncoding {
    type Error = GtdPrepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_label(&value)
    }
}

impl From<SourceEncoding> for String {
    fn from(value: SourceEncoding) -> Self {
        value.name().to_string()
    }
}

impl Display for SourceEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
