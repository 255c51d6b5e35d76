//! Rendering of normalized device lists

use descriptor::NormalizedDeviceRecord;
use std::fmt::Write;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn render(
    records: &[NormalizedDeviceRecord],
    format: OutputFormat,
    hid_only: bool,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records, hid_only)),
        OutputFormat::Json => render_json(records),
    }
}

/// One line per record: `vid:pid  vendor  product  path`
///
/// `hid_only` only changes the message printed for an empty list.
pub fn render_table(records: &[NormalizedDeviceRecord], hid_only: bool) -> String {
    if records.is_empty() {
        let message = if hid_only {
            "No HID devices found."
        } else {
            "No devices found."
        };
        return format!("{}\n", message);
    }

    let vendor_width = column_width(records.iter().map(|r| display_name(&r.vendor_name)));
    let product_width = column_width(records.iter().map(|r| display_name(&r.product_name)));

    let mut out = String::new();
    for record in records {
        let _ = writeln!(
            out,
            "{}  {:<vw$}  {:<pw$}  {}",
            record.id_pair(),
            display_name(&record.vendor_name),
            display_name(&record.product_name),
            record.path,
            vw = vendor_width,
            pw = product_width,
        );
    }
    out
}

/// Pretty-printed JSON array
pub fn render_json(records: &[NormalizedDeviceRecord]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

// Table only; JSON keeps the empty string.
fn display_name(name: &str) -> &str {
    if name.is_empty() { "-" } else { name }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0)
}
