//! hid-list
//!
//! Enumerates connected HID devices through libusb, normalizes their
//! descriptors, and prints them as a table or JSON.

mod config;
mod filter;
mod output;
mod usb;

use anyhow::{Context, Result};
use clap::Parser;
use common::{UsbBridge, create_usb_bridge, setup_logging};
use config::{ConfigSource, ListerConfig};
use descriptor::{
    HexCase, IdFormat, NormalizedDeviceRecord, RawDeviceRecord, normalize_all, try_normalize_all,
};
use output::OutputFormat;
use tracing::{error, info, warn};
use usb::{EnumerationOptions, spawn_usb_worker};

#[derive(Parser, Debug)]
#[command(name = "hid-list")]
#[command(author, version, about = "List connected HID devices")]
#[command(long_about = "
Lists connected HID devices with their vendor and product identifiers
formatted as 4-digit hexadecimal.

EXAMPLES:
    # Table output
    hid-list

    # JSON output for scripts
    hid-list --json

    # Uppercase identifiers with 0x prefix
    hid-list --upper --prefix

    # Drop records with identifiers outside the 16-bit range
    hid-list --strict

CONFIGURATION:
    The lister looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/hid-descriptors/hid-list.toml
    3. /etc/hid-descriptors/hid-list.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Save default configuration (to --config or the default location) and exit
    #[arg(long)]
    save_config: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Uppercase hex identifiers
    #[arg(long)]
    upper: bool,

    /// Prefix identifiers with 0x
    #[arg(long)]
    prefix: bool,

    /// Drop records whose identifiers do not fit in 16 bits
    #[arg(long)]
    strict: bool,

    /// List every USB device, not only HID interfaces
    #[arg(long)]
    all: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref().map(config::expand_path);

    // Handle --save-config flag early (before loading config)
    if args.save_config {
        let path = config_path.unwrap_or_else(ListerConfig::default_path);
        ListerConfig::default()
            .save(&path)
            .context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let (config, source) =
        ListerConfig::resolve(config_path).context("Failed to load configuration")?;

    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.general.log_level);
    setup_logging(log_level).context("Failed to setup logging")?;

    info!("hid-list v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        ConfigSource::File(path) => info!("Loaded configuration from: {}", path.display()),
        ConfigSource::Defaults => info!("No configuration file found, using defaults"),
    }

    let format = effective_format(&args, &config);
    let strict = args.strict || config.usb.strict;
    let hid_only = config.usb.hid_only && !args.all;
    let options = EnumerationOptions {
        hid_only,
        filters: config.usb.filters.clone(),
    };

    let (usb_bridge, worker) = create_usb_bridge();
    let usb_worker_handle =
        spawn_usb_worker(worker, options).context("Failed to spawn USB worker thread")?;

    let result = list_devices(&usb_bridge).await;

    info!("Shutting down USB subsystem...");
    if let Err(e) = usb_bridge.shutdown().await {
        error!("Error shutting down USB worker: {:#}", e);
    }
    if let Err(e) = usb_worker_handle.join() {
        error!("USB worker thread panicked: {:?}", e);
    }

    let records = normalize_records(result?, &format, strict);
    let output_format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };
    print!(
        "{}",
        output::render(&records, output_format, hid_only)
            .context("Failed to render device list")?
    );

    Ok(())
}

/// Command-line flags override the config file
fn effective_format(args: &Args, config: &ListerConfig) -> IdFormat {
    let mut format = config.format;
    if args.upper {
        format.case = HexCase::Upper;
    }
    if args.prefix {
        format.prefix = true;
    }
    format
}

async fn list_devices(usb_bridge: &UsbBridge) -> Result<Vec<RawDeviceRecord>> {
    usb_bridge
        .list_devices()
        .await
        .context("Failed to enumerate USB devices")
}

fn normalize_records(
    raw: Vec<RawDeviceRecord>,
    format: &IdFormat,
    strict: bool,
) -> Vec<NormalizedDeviceRecord> {
    if !strict {
        return normalize_all(raw, format);
    }

    try_normalize_all(raw, format)
        .into_iter()
        .filter_map(|result| match result {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping device record: {}", e);
                None
            }
        })
        .collect()
}
