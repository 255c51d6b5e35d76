//! Identifier text encoding
//!
//! Identifiers are rendered as zero-padded, 4-digit hexadecimal. Case and an
//! optional `0x` prefix are a policy choice of the consumer; [`parse_id`]
//! accepts every variant [`format_id`] can produce.

use crate::error::{DescriptorError, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of hex digits in a formatted identifier
pub const ID_WIDTH: usize = 4;

/// Hex digit case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Identifier formatting policy
///
/// The default (`lower`, no prefix) matches the `lsusb` display convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IdFormat {
    #[serde(default)]
    pub case: HexCase,
    /// Prepend `0x`
    #[serde(default)]
    pub prefix: bool,
}

impl IdFormat {
    pub const fn new(case: HexCase, prefix: bool) -> Self {
        Self { case, prefix }
    }
}

/// Render an identifier as text
///
/// Values above `0xffff` are not truncated, they simply take more digits.
pub fn format_id(value: u32, format: &IdFormat) -> String {
    let prefix = if format.prefix { "0x" } else { "" };
    match format.case {
        HexCase::Lower => format!("{prefix}{value:0width$x}", width = ID_WIDTH),
        HexCase::Upper => format!("{prefix}{value:0width$X}", width = ID_WIDTH),
    }
}

/// Parse identifier text back into a USB identifier
pub fn parse_id(text: &str) -> Result<u16> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);

    if digits.is_empty()
        || digits.len() > ID_WIDTH
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(DescriptorError::InvalidIdentifier {
            text: text.to_string(),
        });
    }

    u16::from_str_radix(digits, 16).map_err(|_| DescriptorError::InvalidIdentifier {
        text: text.to_string(),
    })
}
