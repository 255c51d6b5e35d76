//! VID:PID device filters
//!
//! Filters are written as `0xVID:0xPID` with `*` for either half, e.g.
//! `"0x046d:*"`. They deserialize straight from the config file, so a
//! malformed pattern is rejected while parsing.

use descriptor::parse_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceFilter {
    /// `None` matches any vendor
    pub vendor_id: Option<u16>,
    /// `None` matches any product
    pub product_id: Option<u16>,
}

impl DeviceFilter {
    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id.is_none_or(|v| v == vendor_id)
            && self.product_id.is_none_or(|p| p == product_id)
    }
}

/// True when no filters are configured or any filter matches
pub fn allowed(filters: &[DeviceFilter], vendor_id: u16, product_id: u16) -> bool {
    filters.is_empty() || filters.iter().any(|f| f.matches(vendor_id, product_id))
}

fn parse_half(text: &str, name: &str) -> Result<Option<u16>, String> {
    if text == "*" {
        return Ok(None);
    }
    if !text.starts_with("0x") && !text.starts_with("0X") {
        return Err(format!(
            "Invalid {} '{}', must start with '0x' (e.g., '0x1234')",
            name, text
        ));
    }
    parse_id(text)
        .map(Some)
        .map_err(|e| format!("Invalid {} '{}': {}", name, text, e))
}

impl FromStr for DeviceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((vid, pid)) = s.split_once(':') else {
            return Err(format!(
                "Invalid filter format '{}', expected VID:PID (e.g., '0x1234:0x5678' or '0x1234:*')",
                s
            ));
        };

        Ok(Self {
            vendor_id: parse_half(vid, "VID")?,
            product_id: parse_half(pid, "PID")?,
        })
    }
}

impl TryFrom<String> for DeviceFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = |id: Option<u16>| id.map_or_else(|| "*".to_string(), |v| format!("{:#06x}", v));
        write!(f, "{}:{}", half(self.vendor_id), half(self.product_id))
    }
}

impl From<DeviceFilter> for String {
    fn from(filter: DeviceFilter) -> Self {
        filter.to_string()
    }
}
