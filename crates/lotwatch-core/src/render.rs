// ── Renderer ──
//
// Pure mapping from the canonical device list to an HTML fragment. No I/O
// and no state: the poll loop calls this once per cycle and fully replaces
// whatever was displayed before. All text that originated on the wire goes
// through `escape_html` before insertion.

use std::fmt::Write as _;

use crate::model::{Device, Slot};

/// Escape text for safe insertion into HTML.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

fn encode_query(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Builds the command-endpoint targets the admin controls post to.
///
/// Passed into the renderer explicitly so the display layer never reaches
/// for a process-wide dispatch hook; swapping the API mount point means
/// constructing different routes, not editing markup.
#[derive(Debug, Clone)]
pub struct CommandRoutes {
    base: String,
}

impl Default for CommandRoutes {
    fn default() -> Self {
        Self::new("/api/cmd")
    }
}

impl CommandRoutes {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    pub fn open_gate(&self, device_id: &str) -> String {
        format!("{}/open-gate?deviceId={}", self.base, encode_query(device_id))
    }

    pub fn exit_approved(&self, device_id: &str, approved: bool) -> String {
        format!(
            "{}/exit-approved?deviceId={}&approved={approved}",
            self.base,
            encode_query(device_id)
        )
    }

    pub fn book_slot(&self, device_id: &str, slot: u8) -> String {
        format!(
            "{}/book-slots?deviceId={}&slot{slot}=true",
            self.base,
            encode_query(device_id)
        )
    }

    pub fn clear_bookings(&self, device_id: &str) -> String {
        format!("{}/book-slots?deviceId={}", self.base, encode_query(device_id))
    }
}

// ── Fragments ───────────────────────────────────────────────────────

fn control(out: &mut String, action: &str, label: &str) {
    let _ = write!(
        out,
        r#"<form class="control" method="post" action="{}"><button type="submit">{}</button></form>"#,
        escape_html(action),
        escape_html(label),
    );
}

fn slot_badge(slot: &Slot) -> String {
    let occupancy = if slot.occupied { "Occupied" } else { "Free" };
    let booking = if slot.booked { "Booked" } else { "Not booked" };
    format!(
        concat!(
            r#"<div class="slot">"#,
            r#"<div class="slot-name">Slot {id}</div>"#,
            r#"<span class="badge {occ_class}">{occupancy}</span>"#,
            r#"<span class="badge {book_class}">{booking}</span>"#,
            "</div>"
        ),
        id = slot.id,
        occ_class = if slot.occupied { "occupied" } else { "free" },
        occupancy = occupancy,
        book_class = if slot.booked { "booked" } else { "unbooked" },
        booking = booking,
    )
}

fn admin_panel(device: &Device, routes: &CommandRoutes) -> String {
    if !device.is_admin {
        return r#"<div class="admin-hidden">Admin controls hidden (user mode).</div>"#.into();
    }

    let id = &device.device_id;
    let mut out = String::from(r#"<div class="admin"><div class="admin-title">Admin Controls</div>"#);
    control(&mut out, &routes.open_gate(id), "Open Gate");
    control(&mut out, &routes.exit_approved(id, true), "Approve Exit");
    control(&mut out, &routes.exit_approved(id, false), "Revoke Exit");
    for slot in 1..=4u8 {
        control(&mut out, &routes.book_slot(id, slot), &format!("Book Slot {slot}"));
    }
    control(&mut out, &routes.clear_bookings(id), "Clear All Bookings");
    out.push_str("</div>");
    out
}

fn device_card(device: &Device, routes: &CommandRoutes) -> String {
    let last_seen = device.last_seen.as_deref().unwrap_or("unknown");
    let msg_count = device
        .last_msg_count
        .map_or_else(|| "-".to_owned(), |n| n.to_string());
    let slots: String = device.slots.iter().map(slot_badge).collect();

    format!(
        concat!(
            r#"<section class="device">"#,
            r#"<header><h2>{device_id}</h2>"#,
            r#"<div class="last-seen">Last seen: {last_seen}</div>"#,
            r#"<div class="msg-count">MsgCount <strong>{msg_count}</strong></div>"#,
            "</header>",
            r#"<div class="metrics">"#,
            r#"<div class="metric">Entrance (cm) <strong>{entrance_cm}</strong></div>"#,
            r#"<div class="metric">Exit Approved <strong>{exit}</strong></div>"#,
            "</div>",
            r#"<div class="slots">{slots}</div>"#,
            "{admin}",
            "</section>"
        ),
        device_id = escape_html(&device.device_id),
        last_seen = escape_html(last_seen),
        msg_count = escape_html(&msg_count),
        entrance_cm = device.entrance_cm,
        exit = if device.exit_approved { "YES" } else { "NO" },
        slots = slots,
        admin = admin_panel(device, routes),
    )
}

/// Render the device list to an HTML fragment, one card per device.
pub fn render_devices(devices: &[Device], routes: &CommandRoutes) -> String {
    devices.iter().map(|d| device_card(d, routes)).collect()
}

/// Render a complete dashboard page around an already-rendered card
/// fragment, with the status line on top.
///
/// The page refreshes itself on the poll cadence so a browser pointed at
/// the written file tracks the loop without any script. `cards` is trusted
/// markup (output of [`render_devices`]); `status` is escaped here.
pub fn render_page(status: &str, cards: &str) -> String {
    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\">",
            "<meta http-equiv=\"refresh\" content=\"2\">",
            "<title>lotwatch</title></head><body>",
            r#"<div id="statusText">{status}</div>"#,
            r#"<div id="devices">{cards}</div>"#,
            "</body></html>"
        ),
        status = escape_html(status),
        cards = cards,
    )
}
