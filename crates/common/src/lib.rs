//! Common utilities for hid-descriptors
//!
//! This crate provides the ambient pieces shared by the binaries: error
//! handling, logging setup, and the async channel bridge used to talk to the
//! blocking USB enumeration thread.

pub mod channel;
pub mod error;
pub mod logging;
pub mod test_utils;

pub use channel::{UsbBridge, UsbCommand, UsbWorker, create_usb_bridge};
pub use error::{Error, Result};
pub use logging::setup_logging;
