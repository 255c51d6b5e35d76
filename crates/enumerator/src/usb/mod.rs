//! USB subsystem
//!
//! Enumerates HID hardware through libusb and produces raw device records.
//!
//! libusb calls block, so they run in a dedicated worker thread that the
//! Tokio runtime reaches through the `common` channel bridge.

pub mod device;
pub mod enumerate;
pub mod worker;

pub use enumerate::EnumerationOptions;
pub use worker::spawn_usb_worker;
