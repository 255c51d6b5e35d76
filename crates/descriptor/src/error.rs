//! Descriptor error types

use std::fmt;
use thiserror::Error;

/// Which identifier field of a record an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    VendorId,
    ProductId,
}

impl fmt::Display for IdField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdField::VendorId => f.write_str("vendor_id"),
            IdField::ProductId => f.write_str("product_id"),
        }
    }
}

/// Descriptor-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Identifier does not fit in the 16-bit USB range
    #[error("Identifier out of range: {field} = {value:#x} (max: 0xffff)")]
    OutOfRangeIdentifier { field: IdField, value: u32 },

    /// Text could not be parsed back into an identifier
    #[error("Invalid identifier '{text}', expected 1-4 hex digits")]
    InvalidIdentifier { text: String },
}

/// Type alias for descriptor results
pub type Result<T> = std::result::Result<T, DescriptorError>;
