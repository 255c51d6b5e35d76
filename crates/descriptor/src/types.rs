//! Device record type definitions
//!
//! A [`RawDeviceRecord`] is what the hardware enumerator hands over, with the
//! identifiers still numeric. A [`NormalizedDeviceRecord`] is what consumers
//! see, with the identifiers already rendered as text.

use crate::error::{DescriptorError, IdField};
use serde::{Deserialize, Serialize};

/// Device record as produced by hardware enumeration
///
/// Identifiers are carried as `u32` so that a misbehaving producer can hand
/// over values outside the USB range; [`RawDeviceRecord::validate`] catches
/// those.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawDeviceRecord {
    /// Product string (empty if the device did not report one)
    pub product_name: String,
    /// Platform-specific device path, unique per connection
    pub path: String,
    /// USB Vendor ID
    pub vendor_id: u32,
    /// USB Product ID
    pub product_id: u32,
    /// Manufacturer string (empty if the device did not report one)
    pub vendor_name: String,
}

impl RawDeviceRecord {
    /// Build a record from in-range USB identifiers
    pub fn new(
        product_name: impl Into<String>,
        path: impl Into<String>,
        vendor_id: u16,
        product_id: u16,
        vendor_name: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            path: path.into(),
            vendor_id: vendor_id.into(),
            product_id: product_id.into(),
            vendor_name: vendor_name.into(),
        }
    }

    /// Check that both identifiers fit in 16 bits
    pub fn validate(&self) -> Result<(), DescriptorError> {
        check_range(IdField::VendorId, self.vendor_id)?;
        check_range(IdField::ProductId, self.product_id)?;
        Ok(())
    }
}

fn check_range(field: IdField, value: u32) -> Result<(), DescriptorError> {
    if value > u32::from(u16::MAX) {
        return Err(DescriptorError::OutOfRangeIdentifier { field, value });
    }
    Ok(())
}

/// Device record with display-formatted identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedDeviceRecord {
    pub product_name: String,
    pub path: String,
    pub vendor_id: String,
    pub product_id: String,
    pub vendor_name: String,
}

impl NormalizedDeviceRecord {
    /// `vendor:product` key, as printed by `lsusb`
    pub fn id_pair(&self) -> String {
        format!("{}:{}", self.vendor_id, self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_widens_ids() {
        let raw = RawDeviceRecord::new("Widget", "/dev/hidraw0", 0xffff, 1, "Acme");
        assert_eq!(raw.vendor_id, 65535);
        assert_eq!(raw.product_id, 1);
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_vendor_first() {
        let raw = RawDeviceRecord {
            product_name: String::new(),
            path: String::new(),
            vendor_id: 0x1_0000,
            product_id: 0x2_0000,
            vendor_name: String::new(),
        };

        assert_eq!(
            raw.validate(),
            Err(DescriptorError::OutOfRangeIdentifier {
                field: IdField::VendorId,
                value: 0x1_0000,
            })
        );
    }

    #[test]
    fn test_validate_rejects_product() {
        let mut raw = RawDeviceRecord::new("", "", 1, 1, "");
        raw.product_id = 70_000;

        assert!(matches!(
            raw.validate(),
            Err(DescriptorError::OutOfRangeIdentifier {
                field: IdField::ProductId,
                ..
            })
        ));
    }

    #[test]
    fn test_id_pair() {
        let record = NormalizedDeviceRecord {
            product_name: "Widget".to_string(),
            path: "/dev/hidraw0".to_string(),
            vendor_id: "04d2".to_string(),
            product_id: "162e".to_string(),
            vendor_name: "Acme".to_string(),
        };
        assert_eq!(record.id_pair(), "04d2:162e");
    }
}
