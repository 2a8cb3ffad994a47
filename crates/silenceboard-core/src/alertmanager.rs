use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{AlertmanagerConfig, normalize_base_url};
use crate::error::{Operation, Result, SilenceBoardError};
use crate::http::ensure_success;
use crate::models::Silence;

#[derive(Clone)]
pub struct AlertmanagerClient {
    base_url: String,
    http: Client,
}

impl std::fmt::Debug for AlertmanagerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertmanagerClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl AlertmanagerClient {
    pub fn new(config: &AlertmanagerConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .build()?;

        Ok(Self {
            base_url: normalize_base_url(&config.base_url),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every silence the server knows about, in server order.
    pub fn list_silences(&self) -> Result<Vec<Silence>> {
        let url = format!("{}/api/v2/silences", self.base_url);
        tracing::debug!(%url, "listing silences");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(SilenceBoardError::transport(Operation::ListSilences))?;
        let resp = ensure_success(resp, Operation::ListSilences)?;
        resp.json::<Vec<Silence>>()
            .map_err(SilenceBoardError::transport(Operation::ListSilences))
    }
}
