//! Raw to normalized record conversion
//!
//! All functions here are pure: they own their input, touch no shared state,
//! and can be called from any thread.

use crate::error::Result;
use crate::format::{IdFormat, format_id};
use crate::types::{NormalizedDeviceRecord, RawDeviceRecord};

/// Normalize a record using the default identifier format
///
/// Never fails. Out-of-range identifiers are formatted as-is; use
/// [`try_normalize`] to reject them instead.
pub fn normalize(raw: RawDeviceRecord) -> NormalizedDeviceRecord {
    normalize_with(raw, &IdFormat::default())
}

/// Normalize a record using an explicit identifier format
pub fn normalize_with(raw: RawDeviceRecord, format: &IdFormat) -> NormalizedDeviceRecord {
    NormalizedDeviceRecord {
        vendor_id: format_id(raw.vendor_id, format),
        product_id: format_id(raw.product_id, format),
        product_name: raw.product_name,
        path: raw.path,
        vendor_name: raw.vendor_name,
    }
}

/// Validate, then normalize
pub fn try_normalize(raw: RawDeviceRecord, format: &IdFormat) -> Result<NormalizedDeviceRecord> {
    raw.validate()?;
    Ok(normalize_with(raw, format))
}

/// Normalize a sequence, preserving order one-to-one
pub fn normalize_all<I>(records: I, format: &IdFormat) -> Vec<NormalizedDeviceRecord>
where
    I: IntoIterator<Item = RawDeviceRecord>,
{
    records
        .into_iter()
        .map(|raw| normalize_with(raw, format))
        .collect()
}

/// Validate and normalize a sequence, keeping one result per input
///
/// A bad record does not abort the batch; callers decide whether to skip it.
pub fn try_normalize_all<I>(records: I, format: &IdFormat) -> Vec<Result<NormalizedDeviceRecord>>
where
    I: IntoIterator<Item = RawDeviceRecord>,
{
    records
        .into_iter()
        .map(|raw| try_normalize(raw, format))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DescriptorError, IdField};
    use crate::format::HexCase;

    fn widget() -> RawDeviceRecord {
        RawDeviceRecord::new("Widget", "/dev/hidraw0", 1234, 5678, "Acme")
    }

    #[test]
    fn test_normalize_widget() {
        let normalized = normalize(widget());

        assert_eq!(normalized.product_name, "Widget");
        assert_eq!(normalized.path, "/dev/hidraw0");
        assert_eq!(normalized.vendor_id, "04d2");
        assert_eq!(normalized.product_id, "162e");
        assert_eq!(normalized.vendor_name, "Acme");
    }

    #[test]
    fn test_normalize_with_upper() {
        let normalized = normalize_with(widget(), &IdFormat::new(HexCase::Upper, false));
        assert_eq!(normalized.product_id, "162E");
    }

    #[test]
    fn test_normalize_passes_out_of_range_through() {
        let mut raw = widget();
        raw.vendor_id = 65536;
        assert_eq!(normalize(raw).vendor_id, "10000");
    }

    #[test]
    fn test_try_normalize_rejects_out_of_range() {
        let mut raw = widget();
        raw.vendor_id = 65536;

        let err = try_normalize(raw, &IdFormat::default()).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::OutOfRangeIdentifier {
                field: IdField::VendorId,
                value: 65536,
            }
        );
    }

    #[test]
    fn test_try_normalize_all_keeps_going() {
        let mut bad = widget();
        bad.product_id = u32::MAX;
        let results = try_normalize_all(vec![widget(), bad, widget()], &IdFormat::default());

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
