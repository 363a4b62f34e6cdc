// Dashboard API HTTP client.
//
// Two surfaces: the device-list poll (`GET /api/devices`) and the admin
// command endpoints (`POST /api/cmd/*`). Command parameters travel in the
// query string; no request bodies are sent. The device payload is
// schema-flexible by design, so the client hands back raw
// `serde_json::Value` records and leaves normalization to `lotwatch-core`.

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{json_shape, Error};
use crate::transport::TransportConfig;

/// Booking flags for the `book-slots` command.
///
/// `None` means "omit the parameter". Omitting all four means
/// "clear all bookings" on the server side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFlags {
    pub slot1: Option<bool>,
    pub slot2: Option<bool>,
    pub slot3: Option<bool>,
    pub slot4: Option<bool>,
}

impl BookingFlags {
    /// Flags that clear every booking (no parameters sent).
    pub fn clear_all() -> Self {
        Self::default()
    }

    /// Book a single 1-based slot, leaving the others untouched.
    pub fn book_single(slot: u8) -> Self {
        let mut flags = Self::default();
        match slot {
            1 => flags.slot1 = Some(true),
            2 => flags.slot2 = Some(true),
            3 => flags.slot3 = Some(true),
            4 => flags.slot4 = Some(true),
            _ => {}
        }
        flags
    }

    fn params(self) -> Vec<(&'static str, String)> {
        [
            ("slot1", self.slot1),
            ("slot2", self.slot2),
            ("slot3", self.slot3),
            ("slot4", self.slot4),
        ]
        .into_iter()
        .filter_map(|(name, flag)| flag.map(|b| (name, b.to_string())))
        .collect()
    }
}

/// HTTP client for the parking-dashboard API.
///
/// Session credentials (cookie jar, optional API-key header) are attached by
/// [`TransportConfig`]; every method here just builds a URL and interprets
/// the response.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the given API origin.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client(&base_url)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` (tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The API origin this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Device list ──────────────────────────────────────────────────

    /// Fetch the raw device list.
    ///
    /// Returns one `Value` per device record, deliberately untyped: the
    /// server is known to emit several field spellings and slot shapes,
    /// which `lotwatch-core` reconciles. A 2xx response whose body is not
    /// a JSON array is an [`Error::UnexpectedShape`].
    pub async fn fetch_devices(&self) -> Result<Vec<Value>, Error> {
        let url = self.endpoint("api/devices")?;
        debug!(%url, "GET devices");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                method: "GET",
                path: "/api/devices".into(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: Value = serde_json::from_str(&body).map_err(|_| Error::UnexpectedShape {
            path: "/api/devices".into(),
            found: "an unparsable body",
        })?;

        match parsed {
            Value::Array(records) => Ok(records),
            other => Err(Error::UnexpectedShape {
                path: "/api/devices".into(),
                found: json_shape(&other),
            }),
        }
    }

    // ── Admin commands ───────────────────────────────────────────────

    /// Open the entrance gate for a device.
    pub async fn open_gate(&self, device_id: &str) -> Result<Value, Error> {
        self.command("open-gate", &[("deviceId", device_id.to_owned())])
            .await
    }

    /// Set or clear the exit-approval flag.
    pub async fn set_exit_approved(
        &self,
        device_id: &str,
        approved: bool,
    ) -> Result<Value, Error> {
        self.command(
            "exit-approved",
            &[
                ("deviceId", device_id.to_owned()),
                ("approved", approved.to_string()),
            ],
        )
        .await
    }

    /// Set booking flags for the named slots. Flags that are `None` are
    /// omitted; omitting all of them clears every booking.
    pub async fn book_slots(
        &self,
        device_id: &str,
        flags: BookingFlags,
    ) -> Result<Value, Error> {
        let mut params = vec![("deviceId", device_id.to_owned())];
        params.extend(flags.params());
        self.command("book-slots", &params).await
    }

    /// POST a command with query-string parameters and no body.
    ///
    /// Non-2xx responses become [`Error::Http`] carrying the status code
    /// and the verbatim body text. A 2xx JSON body is returned parsed; a
    /// 2xx empty or unparsable body is returned as an empty object — some
    /// endpoints answer `{"ok": true}`, some answer nothing, and neither
    /// is a failure.
    async fn command(
        &self,
        name: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, Error> {
        let path = format!("api/cmd/{name}");
        let mut url = self.endpoint(&path)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        debug!(%url, "POST command");

        let resp = self.http.post(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            warn!(command = name, status = status.as_u16(), body = %body, "command rejected");
            return Err(Error::Http {
                method: "POST",
                path: format!("/api/cmd/{name}"),
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or_else(|_| Value::Object(serde_json::Map::new())))
    }
}
