// ── Canonical domain model ──
//
// Value objects rebuilt from scratch on every poll cycle. Nothing here is
// persisted or mutated in place: a cycle produces a fresh `Vec<Device>`,
// renders it, and drops it.

/// One parking space belonging to a [`Device`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// 1-based. Sequential in synthesized lists; preserved from the source
    /// in explicit-array payloads.
    pub id: u32,
    /// Sensor-reported physical presence.
    pub occupied: bool,
    /// Reservation flag, independent of occupancy. False whenever the
    /// payload carries no booking information.
    pub booked: bool,
}

impl Slot {
    /// A free, unbooked slot with the given id.
    pub fn empty(id: u32) -> Self {
        Self {
            id,
            occupied: false,
            booked: false,
        }
    }
}

/// Canonical parking-monitoring unit, normalized from one raw record.
///
/// Every field is total: missing, null, or wrongly-typed input degrades to
/// the documented default rather than failing the poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Stable identifier, reconciled across key spellings. When the record
    /// carries none, this holds [`normalize::UNKNOWN_DEVICE_LABEL`](crate::normalize::UNKNOWN_DEVICE_LABEL).
    pub device_id: String,
    /// Entrance distance-sensor reading in centimeters. 0 when absent or
    /// invalid.
    pub entrance_cm: f64,
    pub exit_approved: bool,
    /// Display-only message counter. Absent renders as a placeholder and
    /// never defaults to 0.
    pub last_msg_count: Option<i64>,
    /// Opaque timestamp text from the server; absent renders as "unknown".
    pub last_seen: Option<String>,
    /// Per-session viewer capability, resolved server-side. Gates the
    /// admin controls in the rendered output.
    pub is_admin: bool,
    pub slots: Vec<Slot>,
}

impl Device {
    /// Number of occupied slots (for summaries and status lines).
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }
}
