//! File system helpers: BOM-aware source readers.

use std::path::Path;

/// Decoded source text plus the label of the encoding that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSource {
    pub text: String,
    pub encoding: &'static str,
}

/// Reads a source file, detecting UTF-16 by BOM and falling back to
/// Windows-1252 when the bytes are not valid UTF-8.
pub fn read_source_file<P: AsRef<Path>>(path: P) -> std::io::Result<DecodedSource> {
    let bytes = std::fs::read(path)?;
    Ok(decode_source(&bytes))
}

pub fn decode_source(bytes: &[u8]) -> DecodedSource {
    let (text, encoding) = match bytes {
        [0xFF, 0xFE, ..] => {
            let (decoded, _, had_errors) = encoding_rs::UTF_16LE.decode(bytes);
            if had_errors {
                tracing::warn!("Errors detected while decoding UTF-16LE source");
            }
            (decoded.into_owned(), "utf-16le")
        }
        [0xFE, 0xFF, ..] => {
            let (decoded, _, had_errors) = encoding_rs::UTF_16BE.decode(bytes);
            if had_errors {
                tracing::warn!("Errors detected while decoding UTF-16BE source");
            }
            (decoded.into_owned(), "utf-16be")
        }
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => (s.to_string(), "utf-8"),
            Err(_) => {
                tracing::debug!("UTF-8 decoding failed, trying Windows-1252");
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                (decoded.into_owned(), "windows-1252")
            }
        },
    };

    DecodedSource {
        text: strip_bom(&text).to_string(),
        encoding,
    }
}

fn strip_bom(input: &str) -> &str {
    input.strip_prefix('\u{FEFF}').unwrap_or(input)
}
