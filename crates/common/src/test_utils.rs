//! Test utilities for hid-descriptors
//!
//! Provides mock records and helper functions for testing across crates.
//!
//! # Example
//!
//! ```
//! use common::test_utils::create_mock_raw_record;
//!
//! let record = create_mock_raw_record(1, 0x1234, 0x5678);
//! assert_eq!(record.vendor_id, 0x1234);
//! ```

use crate::channel::{UsbCommand, UsbWorker};
use descriptor::RawDeviceRecord;
use std::future::Future;
use std::thread::JoinHandle;
use std::time::Duration;

/// Default test timeout (5 seconds)
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a mock raw record
///
/// The path follows the `bus-port:config.interface` shape of real HID paths.
pub fn create_mock_raw_record(index: u32, vendor_id: u16, product_id: u16) -> RawDeviceRecord {
    RawDeviceRecord::new(
        format!("Test Product {}", index),
        format!("1-{}:1.0", index),
        vendor_id,
        product_id,
        format!("Test Manufacturer {}", index),
    )
}

/// Create a mock device that reports no strings
pub fn create_mock_anonymous_device(index: u32) -> RawDeviceRecord {
    RawDeviceRecord::new("", format!("2-{}:1.0", index), 0x1209, 0x0001, "")
}

/// Create a list of mock records for testing
///
/// ```
/// use common::test_utils::create_mock_record_list;
///
/// let records = create_mock_record_list(5);
/// assert_eq!(records.len(), 5);
/// ```
pub fn create_mock_record_list(count: u32) -> Vec<RawDeviceRecord> {
    (1..=count)
        .map(|i| create_mock_raw_record(i, 0x1000 + (i as u16), 0x2000 + (i as u16)))
        .collect()
}

/// Run a fake USB thread that answers every `ListDevices` with `records`
///
/// Returns the number of list requests served once `Shutdown` arrives or the
/// bridge is dropped.
pub fn spawn_mock_usb_worker(worker: UsbWorker, records: Vec<RawDeviceRecord>) -> JoinHandle<u32> {
    std::thread::spawn(move || {
        let mut served = 0;
        while let Ok(cmd) = worker.recv_command() {
            match cmd {
                UsbCommand::ListDevices { response } => {
                    let _ = response.send(Ok(records.clone()));
                    served += 1;
                }
                UsbCommand::Shutdown => break,
            }
        }
        served
    })
}

/// Timeout wrapper for async tests
///
/// Wraps an async operation with a timeout to prevent tests from hanging.
pub async fn with_timeout<T, F>(duration: Duration, future: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimeoutError { duration })
}

/// Error returned when a test times out
#[derive(Debug)]
pub struct TimeoutError {
    /// The timeout duration that was exceeded
    pub duration: Duration,
}

impl std::fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Test timed out after {:?}", self.duration)
    }
}

impl std::error::Error for TimeoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_record_list_ids() {
        let records = create_mock_record_list(3);
        assert_eq!(records[0].vendor_id, 0x1001);
        assert_eq!(records[2].product_id, 0x2003);
        assert!(records.iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn test_anonymous_device_has_empty_strings() {
        let record = create_mock_anonymous_device(1);
        assert!(record.product_name.is_empty());
        assert!(record.vendor_name.is_empty());
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
        })
        .await;
        assert!(result.is_err());
    }
}
