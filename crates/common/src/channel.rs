//! Async channel bridge between Tokio runtime and USB thread

use async_channel::{Receiver, Sender, bounded};
use descriptor::RawDeviceRecord;

/// Commands from Tokio runtime to USB thread
#[derive(Debug)]
pub enum UsbCommand {
    /// Enumerate connected devices
    ListDevices {
        /// Channel to send response back
        response: tokio::sync::oneshot::Sender<crate::Result<Vec<RawDeviceRecord>>>,
    },

    /// Shutdown the USB thread gracefully
    Shutdown,
}

/// Handle for Tokio runtime (async)
#[derive(Clone)]
pub struct UsbBridge {
    cmd_tx: Sender<UsbCommand>,
}

impl UsbBridge {
    /// Send a command to the USB thread
    pub async fn send_command(&self, cmd: UsbCommand) -> crate::Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|e| crate::Error::Channel(e.to_string()))
    }

    /// Ask the USB thread for a fresh enumeration pass and wait for it
    pub async fn list_devices(&self) -> crate::Result<Vec<RawDeviceRecord>> {
        tracing::trace!("Requesting device list from USB thread");
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.send_command(UsbCommand::ListDevices { response: tx })
            .await?;

        rx.await
            .map_err(|e| crate::Error::Channel(format!("USB thread dropped reply: {}", e)))?
    }

    /// Ask the USB thread to exit
    pub async fn shutdown(&self) -> crate::Result<()> {
        self.send_command(UsbCommand::Shutdown).await
    }
}

/// Handle for USB thread (blocking)
pub struct UsbWorker {
    cmd_rx: Receiver<UsbCommand>,
}

impl UsbWorker {
    /// Receive a command from Tokio runtime (blocking)
    pub fn recv_command(&self) -> crate::Result<UsbCommand> {
        self.cmd_rx
            .recv_blocking()
            .map_err(|e| crate::Error::Channel(e.to_string()))
    }

    /// Try to receive a command without blocking
    pub fn try_recv_command(&self) -> Option<UsbCommand> {
        self.cmd_rx.try_recv().ok()
    }
}

/// Create the channel bridge between Tokio and USB thread
///
/// Returns (UsbBridge for Tokio, UsbWorker for USB thread)
pub fn create_usb_bridge() -> (UsbBridge, UsbWorker) {
    let (cmd_tx, cmd_rx) = bounded(16);

    (UsbBridge { cmd_tx }, UsbWorker { cmd_rx })
}
