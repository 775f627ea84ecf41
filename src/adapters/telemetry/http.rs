//! Blocking HTTP POST seam shared by both telemetry sinks.
//!
//! Sinks build the URL, headers and JSON body; a [`HttpTransport`] only
//! moves bytes and reports the response status.  On target this is the
//! ESP-IDF HTTP client with a per-request timeout; host tests plug in a
//! recorder.

use crate::error::TelemetryError;

pub const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

pub trait HttpTransport {
    /// POST `body` and return the response status code.
    fn post_json(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<u16, TelemetryError>;
}

/// Map a response status to the sink contract: 2xx is success.
pub fn check_status(status: u16) -> Result<(), TelemetryError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(TelemetryError::Status(status))
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF client
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct EspHttpTransport {
    timeout: core::time::Duration,
}

#[cfg(target_os = "espidf")]
impl EspHttpTransport {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout: core::time::Duration::from_millis(u64::from(timeout_ms)),
        }
    }
}

#[cfg(target_os = "espidf")]
fn classify(e: &esp_idf_svc::io::EspIOError) -> TelemetryError {
    if e.0.code() == esp_idf_svc::sys::ESP_ERR_TIMEOUT as i32
        || e.0.code() == esp_idf_svc::sys::ESP_ERR_HTTP_EAGAIN as i32
    {
        TelemetryError::Timeout
    } else {
        TelemetryError::Transport
    }
}

#[cfg(target_os = "espidf")]
impl HttpTransport for EspHttpTransport {
    fn post_json(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<u16, TelemetryError> {
        use embedded_svc::http::Method;
        use embedded_svc::http::client::Client;
        use embedded_svc::io::Write;
        use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

        // A fresh connection per request: one POST per sink every 5 s.
        let conn = EspHttpConnection::new(&Configuration {
            timeout: Some(self.timeout),
            ..Default::default()
        })
        .map_err(|_| TelemetryError::Connect)?;
        let mut client = Client::wrap(conn);

        let content_length = body.len().to_string();
        let mut all_headers: Vec<(&str, &str)> = Vec::with_capacity(headers.len() + 2);
        all_headers.push(CONTENT_TYPE_JSON);
        all_headers.push(("Content-Length", &content_length));
        all_headers.extend_from_slice(headers);

        let mut request = client
            .request(Method::Post, url, &all_headers)
            .map_err(|e| match classify(&e) {
                TelemetryError::Timeout => TelemetryError::Timeout,
                _ => TelemetryError::Connect,
            })?;
        request.write_all(body).map_err(|e| classify(&e))?;
        request.flush().map_err(|e| classify(&e))?;
        let response = request.submit().map_err(|e| classify(&e))?;
        Ok(response.status())
    }
}
