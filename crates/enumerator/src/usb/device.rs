//! Raw record extraction from a single USB device
//!
//! Reads cached descriptors from a `rusb::Device` and turns each HID
//! interface into a [`RawDeviceRecord`]. The device is only opened to read
//! string descriptors; no interface is ever claimed.

use descriptor::RawDeviceRecord;
use rusb::{ConfigDescriptor, Device, DeviceDescriptor, UsbContext};
use std::time::Duration;
use tracing::{debug, trace};

/// USB interface class code for HID
pub const HID_CLASS: u8 = 0x03;

/// USB device class code for hubs
const HUB_CLASS: u8 = 0x09;

/// Linux Foundation, vendor of the virtual root hubs
const LINUX_FOUNDATION_VID: u16 = 0x1d6b;

const STRING_TIMEOUT: Duration = Duration::from_millis(200);

/// Root hubs are host controller artifacts, not devices
pub fn is_root_hub(vendor_id: u16, class_code: u8) -> bool {
    vendor_id == LINUX_FOUNDATION_VID && class_code == HUB_CLASS
}

/// Build the sysfs-style path `bus-port.port:config.interface`
///
/// Falls back to the bus address when the port chain is unknown. `interface`
/// is `None` for whole-device records.
pub fn format_path(
    bus: u8,
    ports: &[u8],
    address: u8,
    config_value: u8,
    interface: Option<u8>,
) -> String {
    let location = if ports.is_empty() {
        address.to_string()
    } else {
        ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".")
    };

    match interface {
        Some(number) => format!("{}-{}:{}.{}", bus, location, config_value, number),
        None => format!("{}-{}", bus, location),
    }
}

/// Interface numbers that expose a HID class in any alternate setting
///
/// Input is `(interface_number, class_code)` per alternate setting. Output is
/// sorted and free of duplicates.
pub fn hid_interface_numbers<I>(settings: I) -> Vec<u8>
where
    I: IntoIterator<Item = (u8, u8)>,
{
    let mut numbers: Vec<u8> = settings
        .into_iter()
        .filter(|&(_, class)| class == HID_CLASS)
        .map(|(number, _)| number)
        .collect();
    numbers.sort_unstable();
    numbers.dedup();
    numbers
}

fn interface_settings(config: &ConfigDescriptor) -> Vec<(u8, u8)> {
    config
        .interfaces()
        .flat_map(|interface| {
            interface
                .descriptors()
                .map(|alt| (alt.interface_number(), alt.class_code()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Read manufacturer and product strings
///
/// Any failure (device busy, permissions, missing index) yields an empty
/// string for that field.
fn read_strings<T: UsbContext>(
    device: &Device<T>,
    descriptor: &DeviceDescriptor,
) -> (String, String) {
    let handle = match device.open() {
        Ok(handle) => handle,
        Err(e) => {
            trace!(
                "Cannot open {:03}:{:03} for strings: {}",
                device.bus_number(),
                device.address(),
                e
            );
            return (String::new(), String::new());
        }
    };

    let language = match handle.read_languages(STRING_TIMEOUT) {
        Ok(languages) => languages.first().copied(),
        Err(_) => None,
    };

    let read = |index: Option<u8>| -> String {
        match (index, language) {
            (Some(idx), Some(lang)) => handle
                .read_string_descriptor(lang, idx, STRING_TIMEOUT)
                .unwrap_or_default(),
            (Some(idx), None) => handle.read_string_descriptor_ascii(idx).unwrap_or_default(),
            (None, _) => String::new(),
        }
    };

    let vendor_name = read(descriptor.manufacturer_string_index());
    let product_name = read(descriptor.product_string_index());

    (vendor_name, product_name)
}

/// Which interfaces of a device become records
///
/// `Some(n)` is one record per HID interface `n`; a single `None` is one
/// whole-device record. Empty means the device yields nothing.
pub fn record_interfaces<I>(hid_only: bool, settings: I) -> Vec<Option<u8>>
where
    I: IntoIterator<Item = (u8, u8)>,
{
    if hid_only {
        hid_interface_numbers(settings).into_iter().map(Some).collect()
    } else {
        vec![None]
    }
}

/// Descriptor values shared by every record of one device
#[derive(Debug, Clone)]
pub struct DeviceSummary {
    pub bus: u8,
    pub ports: Vec<u8>,
    pub address: u8,
    pub config_value: u8,
    pub vendor_id: u16,
    pub product_id: u16,
    pub vendor_name: String,
    pub product_name: String,
}

impl DeviceSummary {
    pub fn records(&self, interfaces: &[Option<u8>]) -> Vec<RawDeviceRecord> {
        interfaces
            .iter()
            .map(|&interface| {
                RawDeviceRecord::new(
                    self.product_name.clone(),
                    format_path(
                        self.bus,
                        &self.ports,
                        self.address,
                        self.config_value,
                        interface,
                    ),
                    self.vendor_id,
                    self.product_id,
                    self.vendor_name.clone(),
                )
            })
            .collect()
    }
}

/// Produce the raw records for one device
///
/// Returns an empty list for root hubs, and for non-HID devices when
/// `hid_only` is set.
pub fn device_records<T: UsbContext>(
    device: &Device<T>,
    hid_only: bool,
) -> Result<Vec<RawDeviceRecord>, rusb::Error> {
    let descriptor = device.device_descriptor()?;

    if is_root_hub(descriptor.vendor_id(), descriptor.class_code()) {
        debug!("Skipping root hub on bus {}", device.bus_number());
        return Ok(Vec::new());
    }

    let config = device
        .active_config_descriptor()
        .or_else(|_| device.config_descriptor(0))?;

    let interfaces = record_interfaces(hid_only, interface_settings(&config));
    if interfaces.is_empty() {
        return Ok(Vec::new());
    }

    // Strings are only read for devices that produce records
    let (vendor_name, product_name) = read_strings(device, &descriptor);
    let summary = DeviceSummary {
        bus: device.bus_number(),
        ports: device.port_numbers().unwrap_or_default(),
        address: device.address(),
        config_value: config.number(),
        vendor_id: descriptor.vendor_id(),
        product_id: descriptor.product_id(),
        vendor_name,
        product_name,
    };

    Ok(summary.records(&interfaces))
}
