// lotwatch-api: Async Rust client for the parking-dashboard HTTP API.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ApiClient, BookingFlags};
pub use error::Error;
