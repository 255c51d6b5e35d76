//! Device descriptor normalization for hid-descriptors
//!
//! This crate defines the record handed over by hardware enumeration, the
//! display-ready record handed to consumers, and the conversion between them.
//!
//! # Example
//!
//! ```
//! use descriptor::{RawDeviceRecord, normalize};
//!
//! let raw = RawDeviceRecord::new("Widget", "/dev/hidraw0", 1234, 5678, "Acme");
//! let normalized = normalize(raw);
//!
//! assert_eq!(normalized.vendor_id, "04d2");
//! assert_eq!(normalized.product_id, "162e");
//! assert_eq!(normalized.id_pair(), "04d2:162e");
//! ```
//!
//! # Strict Normalization
//!
//! Producers outside the USB stack may hand over identifiers wider than 16 bits.
//! `try_normalize` reports those instead of formatting them:
//!
//! ```
//! use descriptor::{DescriptorError, IdFormat, RawDeviceRecord, try_normalize};
//!
//! let mut raw = RawDeviceRecord::new("", "1-2:1.0", 0, 0, "");
//! raw.vendor_id = 0x1_0000;
//!
//! let result = try_normalize(raw, &IdFormat::default());
//! assert!(matches!(result, Err(DescriptorError::OutOfRangeIdentifier { .. })));
//! ```

pub mod error;
pub mod format;
pub mod normalize;
pub mod types;

pub use error::{DescriptorError, IdField, Result};
pub use format::{HexCase, ID_WIDTH, IdFormat, format_id, parse_id};
pub use normalize::{normalize, normalize_all, normalize_with, try_normalize, try_normalize_all};
pub use types::{NormalizedDeviceRecord, RawDeviceRecord};
