//! Hex text format: one byte per line, lowercase, no zero padding.
//!
//! Bytes below `0x10` are written as a single digit (`5`, not `05`). Files
//! produced by earlier tooling use this layout, so it is kept as is.

use crate::error::{ConvertError, Result};
use std::io::{self, Write};
use std::num::ParseIntError;

/// Write each byte as `{:x}` on its own line.
pub fn write_lines<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<()> {
    for byte in bytes {
        writeln!(writer, "{:x}", byte)?;
    }
    Ok(())
}

/// Parse every line of `text` as a hex byte.
///
/// All lines are parsed, even when the caller only needs a prefix of them.
pub fn parse_lines(text: &str) -> Result<Vec<u8>> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            parse_byte(line).map_err(|source| ConvertError::InvalidHex {
                line: idx + 1,
                token: line.to_string(),
                source,
            })
        })
        .collect()
}

/// Parse a single token. Surrounding whitespace and a `0x` prefix are allowed.
pub fn parse_byte(token: &str) -> std::result::Result<u8, ParseIntError> {
    let token = token.trim();
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u8::from_str_radix(digits, 16)
}
