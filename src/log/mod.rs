use chrono::Utc;
use fs_err as fs;
use serde::Serialize;
use serde_json::to_string_pretty;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::provider::ProviderConfig;
use crate::session::Stage;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
}

/// Per-session artifact sink. Bodies handed to [`Artifacts::save`] must
/// already be redacted; this module never sees a live key.
pub struct Artifacts {
    dir: PathBuf,
    save_request: bool,
    save_response: bool,
}

fn session_dir(root: &Path, id: Uuid) -> PathBuf {
    root.join("session").join(id.to_string())
}

impl Artifacts {
    pub fn new(root: &Path, id: Uuid, save_request: bool, save_response: bool) -> Self {
        Self {
            dir: session_dir(root, id),
            save_request,
            save_response,
        }
    }

    pub fn save<B: Serialize, R: Serialize>(
        &self,
        stage: &str,
        body: &B,
        reply: Option<&R>,
    ) -> anyhow::Result<SavedPaths> {
        if !self.save_request && !self.save_response {
            return Ok(SavedPaths {
                dir: self.dir.clone(),
                request: None,
                response: None,
            });
        }
        fs::create_dir_all(&self.dir)?;

        let mut request_path = None;
        let mut response_path = None;

        if self.save_request {
            let p = self.dir.join(format!("{stage}.request.json"));
            fs::write(&p, to_string_pretty(body)?)?;
            request_path = Some(p);
        }

        if self.save_response {
            if let Some(r) = reply {
                let p = self.dir.join(format!("{stage}.response.json"));
                fs::write(&p, to_string_pretty(r)?)?;
                response_path = Some(p);
            }
        }

        Ok(SavedPaths {
            dir: self.dir.clone(),
            request: request_path,
            response: response_path,
        })
    }
}

/// One diagnostic line per provider call, whatever the outcome. The key
/// value never appears; only its presence and length do.
pub fn call_event(op: &str, cfg: &ProviderConfig, outcome: &str) {
    debug!(
        op,
        outcome,
        provider = cfg.provider.wire_id(),
        model = %cfg.model,
        key_set = !cfg.api_key.is_empty(),
        key_len = cfg.key_len(),
        at = %Utc::now().to_rfc3339(),
        "provider call"
    );
}

pub fn transition(from: Stage, to: Stage, cfg: &ProviderConfig) {
    debug!(
        from = from.title(),
        to = to.title(),
        provider = cfg.provider.wire_id(),
        model = %cfg.model,
        key_set = !cfg.api_key.is_empty(),
        key_len = cfg.key_len(),
        at = %Utc::now().to_rfc3339(),
        "stage transition"
    );
}
