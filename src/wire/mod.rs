use serde::{Deserialize, Serialize};

use crate::provider::ProviderConfig;
use crate::session::{ScriptRequest, VariationKind};

/// ========================================
/// Request/response bodies for the backend
/// ========================================

const REDACTED: &str = "[redacted]";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionBody {
    pub query: String,
    pub limit: usize,
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl SuggestionBody {
    pub fn new(query: &str, limit: usize, cfg: &ProviderConfig) -> Self {
        Self {
            query: query.trim().to_string(),
            limit,
            provider: cfg.provider.wire_id().to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        }
    }

    /// Copy safe to persist in artifacts; the key never hits disk.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionReply {
    pub success: bool,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptBody {
    pub topic: String,
    pub refined_topic: String,
    pub hook: String,
    pub style: String,
    pub provider: String,
    pub api_key: String,
    pub model: String,
}

impl ScriptBody {
    pub fn new(request: &ScriptRequest, cfg: &ProviderConfig) -> Self {
        Self {
            topic: request.topic.clone(),
            refined_topic: request.refined_topic.clone(),
            hook: request.hook.clone(),
            style: request
                .style
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            provider: cfg.provider.wire_id().to_string(),
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
        }
    }

    pub fn redacted(&self) -> Self {
        Self {
            api_key: REDACTED.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReply {
    pub success: bool,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationBody {
    pub original_script: String,
    pub variation_type: VariationKind,
}

impl VariationBody {
    pub fn new(original_script: &str, kind: VariationKind) -> Self {
        Self {
            original_script: original_script.to_string(),
            variation_type: kind,
        }
    }
}
