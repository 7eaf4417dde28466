use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::SpinError;
use crate::wire::{ScriptBody, ScriptReply, SuggestionBody, SuggestionReply, VariationBody};

/// Reqwest implementation of the three backend contracts, JSON over POST
/// against a configurable base URL.
pub struct HttpBackend {
    base_url: String,
    client: Client,
    timeout_secs: u64,
}

impl HttpBackend {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        Self {
            base_url,
            client: Client::new(),
            timeout_secs,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, SpinError> {
        let url = self.url(path);
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(SpinError::Transport(format!(
                "backend error ({status}): {text}"
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| SpinError::Provider(format!("malformed backend payload: {e}")))
    }

    /// GET /health, used by the `--check` mode. Reachability only; the body
    /// is surfaced as-is.
    pub async fn health(&self) -> Result<serde_json::Value, SpinError> {
        let url = self.url("/health");
        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(SpinError::Transport(format!(
                "backend error ({status}): {text}"
            )));
        }
        serde_json::from_str(&text)
            .map_err(|e| SpinError::Provider(format!("malformed health payload: {e}")))
    }
}

#[async_trait]
impl super::Backend for HttpBackend {
    async fn get_suggestions(&self, body: &SuggestionBody) -> Result<SuggestionReply, SpinError> {
        self.post("/get-suggestions", body).await
    }

    async fn generate_script(&self, body: &ScriptBody) -> Result<ScriptReply, SpinError> {
        self.post("/generate-script", body).await
    }

    async fn generate_variation(&self, body: &VariationBody) -> Result<ScriptReply, SpinError> {
        self.post("/generate-variation", body).await
    }
}
