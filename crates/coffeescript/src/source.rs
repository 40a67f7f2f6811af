//! Reading CoffeeScript sources from disk.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, WINDOWS_1252};
use tracing::debug;

use crate::error::{Error, Result};

/// Placed between the contents of adjacent files.
pub const SEPARATOR: &str = "\n\n";

/// Labels that name windows-1252 itself rather than an older alias of it.
const WINDOWS_1252_LABELS: &[&str] = &["cp1252", "windows-1252", "x-cp1252"];

const ASCII_LABELS: &[&str] = &["ascii", "us-ascii", "ansi_x3.4-1968"];

/// How the bytes of a source file become text.
///
/// WHATWG folds `ascii` and `iso-8859-1` into windows-1252 and `utf-16`
/// into UTF-16LE. Those labels keep their own meaning here: ASCII rejects
/// any byte above 0x7F, Latin-1 maps each byte to the code point of the
/// same value, and `utf-16` picks its byte order from a leading BOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Ascii,
    Latin1,
    /// UTF-16 with an optional byte order mark, little endian without one
    Utf16,
    Whatwg(&'static Encoding),
}

impl SourceEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            SourceEncoding::Ascii => "ascii",
            SourceEncoding::Latin1 => "iso-8859-1",
            SourceEncoding::Utf16 => "UTF-16",
            SourceEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decode `bytes` strictly; `None` if they are malformed.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            SourceEncoding::Ascii => std::str::from_utf8(bytes)
                .ok()
                .filter(|text| text.is_ascii())
                .map(Cow::Borrowed),
            SourceEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            SourceEncoding::Utf16 => {
                let (encoding, bom) = match Encoding::for_bom(bytes) {
                    Some((encoding, len)) if encoding == UTF_16LE || encoding == UTF_16BE => {
                        (encoding, len)
                    }
                    _ => (UTF_16LE, 0),
                };
                encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom..])
            }
            SourceEncoding::Whatwg(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }
}

/// Resolve an encoding label such as `utf-8`, `shift_jis` or `euc-jp`.
pub fn lookup_encoding(label: &str) -> Result<SourceEncoding> {
    let normalized = label.trim().to_ascii_lowercase();
    let encoding = Encoding::for_label(normalized.as_bytes())
        .ok_or_else(|| Error::UnknownEncoding(label.to_string()))?;

    let encoding = if encoding == WINDOWS_1252 {
        if ASCII_LABELS.contains(&normalized.as_str()) {
            SourceEncoding::Ascii
        } else if WINDOWS_1252_LABELS.contains(&normalized.as_str()) {
            SourceEncoding::Whatwg(encoding)
        } else {
            SourceEncoding::Latin1
        }
    } else if normalized == "utf-16" {
        SourceEncoding::Utf16
    } else {
        SourceEncoding::Whatwg(encoding)
    };
    Ok(encoding)
}

/// Read the whole of `path` and decode it strictly.
///
/// A byte order mark is kept as part of the text, except under `utf-16`
/// where it selects the byte order. Malformed input is an error, never
/// replaced.
pub fn read_text(path: &Path, encoding: SourceEncoding) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = encoding.decode(&bytes).ok_or_else(|| Error::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name().to_string(),
    })?;

    debug!(path = %path.display(), encoding = encoding.name(), bytes = bytes.len(), "read source");
    Ok(text.into_owned())
}

/// Read every path in order and join the texts with [`SEPARATOR`].
///
/// Fails on the first file that cannot be read or decoded.
pub fn read_sources<I, P>(paths: I, encoding: &str) -> Result<String>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let encoding = lookup_encoding(encoding)?;
    let texts = paths
        .into_iter()
        .map(|path| read_text(path.as_ref(), encoding))
        .collect::<Result<Vec<_>>>()?;
    Ok(texts.join(SEPARATOR))
}
