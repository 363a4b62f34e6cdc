// ── Payload normalization ──
//
// The device-list endpoint is schema-flexible: field names arrive in
// camelCase, lowercase, or snake_case depending on which server variant
// produced the record, and the `slots` value is one of three shapes.
// Everything here is total: malformed input degrades to documented
// defaults, never to a panic, so one bad record can never kill a poll
// cycle.

use serde_json::Value;

use crate::model::{Device, Slot};

/// Minimum slot count for synthesized lists.
///
/// Applies to the aggregate-count and unknown branches only. Explicit
/// arrays keep their length even below 4; the source systems never
/// reconciled that asymmetry and we preserve it as observed.
pub const MIN_SLOTS: u32 = 4;

/// Placeholder identifier for records that carry no device id under any
/// known spelling.
pub const UNKNOWN_DEVICE_LABEL: &str = "(unknown device)";

// Ordered candidate spellings, most-preferred first.
const DEVICE_ID_KEYS: &[&str] = &["deviceId", "device_id", "deviceid"];
const ENTRANCE_CM_KEYS: &[&str] = &["entranceCm", "entrance_cm", "entrancecm"];
const EXIT_APPROVED_KEYS: &[&str] = &["exitApproved", "exit_approved", "exitapproved"];
const LAST_MSG_COUNT_KEYS: &[&str] = &["lastMsgCount", "last_msg_count", "lastmsgcount", "msgCount"];
const LAST_SEEN_KEYS: &[&str] = &["lastSeen", "last_seen", "lastseen"];
const IS_ADMIN_KEYS: &[&str] = &["isAdmin", "is_admin", "isadmin"];
const SLOTS_KEYS: &[&str] = &["slots"];
const AVAILABLE_KEYS: &[&str] = &["available", "Available"];
const OCCUPIED_KEYS: &[&str] = &["occupied", "Occupied"];

// ── Field resolver ──────────────────────────────────────────────────

/// Resolve one logical field from several candidate key spellings.
///
/// Returns the value of the first candidate whose value is present and
/// non-null. A non-object `record` resolves to `None` rather than failing,
/// so callers never special-case malformed records.
pub fn resolve<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    let obj = record.as_object()?;
    candidates
        .iter()
        .find_map(|key| obj.get(*key).filter(|v| !v.is_null()))
}

// ── Coercions ───────────────────────────────────────────────────────

/// Truthiness in the sense the original dashboard used: `false`, `0`, and
/// `""` are false; any other present value is true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric coercion: JSON numbers directly, numeric strings parsed.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-negative integer coercion for counts.
fn as_count(value: &Value) -> Option<u32> {
    as_number(value)
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u32)
}

/// Textual coercion: strings as-is, numbers formatted. Anything else is
/// treated as absent.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ── Slot normalizer ─────────────────────────────────────────────────

/// The three shapes a `slots` payload is known to arrive in, resolved once
/// per record instead of being re-inferred at each access.
enum SlotsPayload<'a> {
    /// `[{id, occupied, booked}, ...]`
    Explicit(&'a [Value]),
    /// `{available: N, occupied: M}` — no booking information.
    Aggregate { available: u32, occupied: u32 },
    /// Absent, null, or anything unrecognized.
    Unknown,
}

fn classify_slots(raw: Option<&Value>) -> SlotsPayload<'_> {
    match raw {
        Some(Value::Array(items)) => SlotsPayload::Explicit(items),
        Some(record @ Value::Object(_)) => {
            let available = resolve(record, AVAILABLE_KEYS).and_then(as_count);
            let occupied = resolve(record, OCCUPIED_KEYS).and_then(as_count);
            if available.is_none() && occupied.is_none() {
                SlotsPayload::Unknown
            } else {
                SlotsPayload::Aggregate {
                    available: available.unwrap_or(0),
                    occupied: occupied.unwrap_or(0),
                }
            }
        }
        _ => SlotsPayload::Unknown,
    }
}

fn slot_id(element: &Value, index: usize) -> u32 {
    resolve(element, &["id"])
        .and_then(as_count)
        .unwrap_or((index as u32) + 1)
}

/// Convert whatever was found under `slots` into an ordered slot list.
///
/// Explicit arrays keep their length as-is (see [`MIN_SLOTS`]); the
/// aggregate shape synthesizes `max(4, available + occupied)` slots with
/// the first `occupied` of them marked occupied; everything else falls
/// through to four free, unbooked slots.
pub fn normalize_slots(raw: Option<&Value>) -> Vec<Slot> {
    match classify_slots(raw) {
        SlotsPayload::Explicit(items) => items
            .iter()
            .enumerate()
            .map(|(index, element)| Slot {
                id: slot_id(element, index),
                occupied: resolve(element, &["occupied"]).is_some_and(truthy),
                booked: resolve(element, &["booked"]).is_some_and(truthy),
            })
            .collect(),

        SlotsPayload::Aggregate {
            available,
            occupied,
        } => {
            let total = available.saturating_add(occupied).max(MIN_SLOTS);
            (1..=total)
                .map(|id| Slot {
                    id,
                    occupied: id <= occupied,
                    booked: false,
                })
                .collect()
        }

        SlotsPayload::Unknown => (1..=MIN_SLOTS).map(Slot::empty).collect(),
    }
}

// ── Device normalizer ───────────────────────────────────────────────

/// Build one canonical [`Device`] from one raw record.
///
/// Total function: there is no failure mode. Missing or malformed fields
/// take their documented defaults, and a record with no recognizable id
/// gets [`UNKNOWN_DEVICE_LABEL`] so the rest of the cycle proceeds.
pub fn normalize_device(raw: &Value) -> Device {
    Device {
        device_id: resolve(raw, DEVICE_ID_KEYS)
            .and_then(as_text)
            .unwrap_or_else(|| UNKNOWN_DEVICE_LABEL.to_owned()),
        entrance_cm: resolve(raw, ENTRANCE_CM_KEYS)
            .and_then(as_number)
            .unwrap_or(0.0),
        exit_approved: resolve(raw, EXIT_APPROVED_KEYS).is_some_and(truthy),
        last_msg_count: resolve(raw, LAST_MSG_COUNT_KEYS)
            .and_then(as_number)
            .map(|f| f as i64),
        last_seen: resolve(raw, LAST_SEEN_KEYS).and_then(as_text),
        is_admin: resolve(raw, IS_ADMIN_KEYS).is_some_and(truthy),
        slots: normalize_slots(resolve(raw, SLOTS_KEYS)),
    }
}
