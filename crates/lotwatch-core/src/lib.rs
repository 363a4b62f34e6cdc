// lotwatch-core: Canonical model and refresh loop between lotwatch-api and
// consumers (CLI).

pub mod model;
pub mod normalize;
pub mod poller;
pub mod render;

// ── Primary re-exports ──────────────────────────────────────────────
pub use model::{Device, Slot};
pub use normalize::{normalize_device, normalize_slots, resolve};
pub use poller::{poll_once, DashboardView, Poller};
pub use render::{escape_html, render_devices, render_page, CommandRoutes};
