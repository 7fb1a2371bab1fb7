//! Malice callback webhook.

use avg_core::{presenter, ScanResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{ClientError, Result};

/// Header carrying the sample ID on callbacks
pub const MALICE_ID_HEADER: &str = "X-Malice-ID";

/// Posts scan results back to Malice
#[derive(Clone)]
pub struct WebhookClient {
    http: HttpClient,
    endpoint: Url,
}

impl WebhookClient {
    /// Create a client for the callback `endpoint`
    pub fn new(endpoint: &str) -> Result<Self> {
        Self::with_config(endpoint, &HttpConfig::default())
    }

    /// Create a client with custom HTTP settings, e.g. a proxy
    pub fn with_config(endpoint: &str, config: &HttpConfig) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ClientError::InvalidUrl(format!("{endpoint}: {e}")))?;
        Ok(Self {
            http: config.build_client()?,
            endpoint,
        })
    }

    /// POST `{"avg": result}` tagged with `scan_id`
    ///
    /// Returns the response body.
    pub async fn send(&self, scan_id: &str, result: &ScanResult) -> Result<String> {
        let body = presenter::to_json(result)?;
        debug!(url = %self.endpoint, id = scan_id, "POST callback");

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(MALICE_ID_HEADER, scan_id)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            Ok(text)
        } else {
            warn!(code = status.as_u16(), "callback rejected");
            Err(ClientError::Api {
                code: status.as_u16(),
                message: text,
            })
        }
    }
}
