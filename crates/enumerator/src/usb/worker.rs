//! USB worker thread
//!
//! Dedicated thread that owns the libusb context. The Tokio runtime sends it
//! commands over the `common` bridge and awaits the replies.

use crate::usb::enumerate::{EnumerationOptions, Enumerator};
use common::{UsbCommand, UsbWorker};
use tracing::{debug, error, info};

/// USB worker thread
pub struct UsbWorkerThread {
    enumerator: Enumerator,
    worker: UsbWorker,
}

impl UsbWorkerThread {
    /// Serve commands until `Shutdown` arrives or the bridge is dropped
    pub fn run(self) {
        info!("USB worker thread started");

        while let Ok(cmd) = self.worker.recv_command() {
            match cmd {
                UsbCommand::ListDevices { response } => {
                    let result = self
                        .enumerator
                        .list()
                        .map_err(|e| common::Error::Usb(e.to_string()));
                    debug!("Replying to ListDevices (ok={})", result.is_ok());
                    let _ = response.send(result);
                }
                UsbCommand::Shutdown => {
                    info!("USB worker shutting down");
                    break;
                }
            }
        }

        info!("USB worker thread stopped");
    }
}

/// Answer every request with the context creation error
///
/// Keeps the caller from seeing a bare channel error when libusb itself is
/// unavailable.
fn run_failed(worker: UsbWorker, err: rusb::Error) {
    error!("Failed to initialize USB context: {}", err);

    while let Ok(cmd) = worker.recv_command() {
        match cmd {
            UsbCommand::ListDevices { response } => {
                let _ = response.send(Err(common::Error::Usb(format!(
                    "USB context unavailable: {}",
                    err
                ))));
            }
            UsbCommand::Shutdown => break,
        }
    }
}

/// Spawn the USB worker thread
///
/// The libusb context is created on the new thread so it never crosses
/// threads.
pub fn spawn_usb_worker(
    worker: UsbWorker,
    options: EnumerationOptions,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    std::thread::Builder::new()
        .name("usb-worker".to_string())
        .spawn(move || match Enumerator::new(options) {
            Ok(enumerator) => UsbWorkerThread { enumerator, worker }.run(),
            Err(e) => run_failed(worker, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::create_usb_bridge;

    #[tokio::test]
    async fn test_worker_answers_and_stops() {
        let (bridge, worker) = create_usb_bridge();
        let handle = spawn_usb_worker(worker, EnumerationOptions::default()).unwrap();

        // Either a device list or a USB error, depending on libusb access
        match bridge.list_devices().await {
            Ok(records) => assert!(records.iter().all(|r| r.validate().is_ok())),
            Err(e) => assert!(matches!(e, common::Error::Usb(_))),
        }

        bridge.shutdown().await.unwrap();
        handle.join().unwrap();
    }

    #[tokio::test]
    async fn test_failed_worker_reports_usb_error() {
        let (bridge, worker) = create_usb_bridge();
        let handle = std::thread::spawn(move || run_failed(worker, rusb::Error::Access));

        let err = bridge.list_devices().await.unwrap_err();
        assert!(err.to_string().contains("USB context unavailable"));

        bridge.shutdown().await.unwrap();
        handle.join().unwrap();
    }
}
