//! One-shot device listing.

use tabled::Tabled;

use lotwatch_api::ApiClient;
use lotwatch_core::normalize::normalize_device;
use lotwatch_core::Device;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Last seen")]
    last_seen: String,
    #[tabled(rename = "MsgCount")]
    msg_count: String,
    #[tabled(rename = "Entrance (cm)")]
    entrance_cm: String,
    #[tabled(rename = "Exit")]
    exit: String,
    #[tabled(rename = "Slots")]
    slots: String,
    #[tabled(rename = "Admin")]
    admin: String,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            device: d.device_id.clone(),
            last_seen: d.last_seen.clone().unwrap_or_else(|| "unknown".into()),
            msg_count: d
                .last_msg_count
                .map_or_else(|| "-".into(), |n| n.to_string()),
            entrance_cm: d.entrance_cm.to_string(),
            exit: if d.exit_approved { "YES" } else { "NO" }.into(),
            slots: format!("{}/{} occupied", d.occupied_count(), d.slots.len()),
            admin: if d.is_admin { "yes" } else { "no" }.into(),
        }
    }
}

fn device_json(d: &Device) -> serde_json::Value {
    serde_json::json!({
        "deviceId": d.device_id,
        "entranceCm": d.entrance_cm,
        "exitApproved": d.exit_approved,
        "lastMsgCount": d.last_msg_count,
        "lastSeen": d.last_seen,
        "isAdmin": d.is_admin,
        "slots": d.slots.iter().map(|s| serde_json::json!({
            "id": s.id,
            "occupied": s.occupied,
            "booked": s.booked,
        })).collect::<Vec<_>>(),
    })
}

pub async fn handle(client: &ApiClient, global: &GlobalOpts) -> Result<(), CliError> {
    let records = client.fetch_devices().await?;
    let devices: Vec<Device> = records.iter().map(normalize_device).collect();

    match global.output {
        OutputFormat::Table => {
            println!(
                "{}",
                output::table(devices.iter().map(DeviceRow::from))
            );
            if !global.quiet {
                eprintln!("Devices: {}", devices.len());
            }
        }
        OutputFormat::Json => {
            let payload: Vec<_> = devices.iter().map(device_json).collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "[]".into())
            );
        }
    }

    Ok(())
}
