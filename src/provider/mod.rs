use async_trait::async_trait;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::SpinError;
use crate::wire::{ScriptBody, ScriptReply, SuggestionBody, SuggestionReply, VariationBody};

pub mod http;

/// The fixed set of provider identifiers the backend understands. Two are
/// live; anthropic and google are declared but inert, and calls routed to
/// them never reach the wire.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "anthropic")]
    Anthropic,
    #[value(name = "google")]
    Google,
}

/// Active providers carry their declared model set; inert ones carry
/// nothing and always degrade to fallback content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    Active { models: &'static [&'static str] },
    Inert,
}

const OPENAI_MODELS: &[&str] = &["gpt-4", "gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"];
const OPENROUTER_MODELS: &[&str] = &[
    "openai/gpt-4o",
    "anthropic/claude-3.5-sonnet",
    "meta-llama/llama-3.1-70b-instruct",
    "mistralai/mistral-7b-instruct",
];

impl ProviderId {
    pub fn wire_id(self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Google => "google",
        }
    }

    pub fn status(self) -> ProviderStatus {
        match self {
            ProviderId::OpenAI => ProviderStatus::Active { models: OPENAI_MODELS },
            ProviderId::OpenRouter => ProviderStatus::Active { models: OPENROUTER_MODELS },
            ProviderId::Anthropic | ProviderId::Google => ProviderStatus::Inert,
        }
    }

    pub fn default_model(self) -> Option<&'static str> {
        match self.status() {
            ProviderStatus::Active { models } => models.first().copied(),
            ProviderStatus::Inert => None,
        }
    }

    /// The model field must be one of the provider's declared set at call
    /// time; inert providers declare none.
    pub fn supports(self, model: &str) -> bool {
        match self.status() {
            ProviderStatus::Active { models } => models.contains(&model),
            ProviderStatus::Inert => false,
        }
    }

    /// The conventional environment variable for this provider's key.
    pub fn key_env_var(self) -> Option<&'static str> {
        match self {
            ProviderId::OpenAI => Some("OPENAI_API_KEY"),
            ProviderId::OpenRouter => Some("OPENROUTER_API_KEY"),
            ProviderId::Anthropic | ProviderId::Google => None,
        }
    }
}

/// Pass-through configuration for one backend call. Never cached by the
/// core; the key is never logged (only its presence and length are).
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub model: String,
    pub api_key: String,
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), SpinError> {
        match self.provider.status() {
            ProviderStatus::Inert => Err(SpinError::Validation(format!(
                "provider '{}' is declared but inert",
                self.provider.wire_id()
            ))),
            ProviderStatus::Active { .. } if !self.provider.supports(&self.model) => {
                Err(SpinError::Validation(format!(
                    "model '{}' is not declared by provider '{}'",
                    self.model,
                    self.provider.wire_id()
                )))
            }
            ProviderStatus::Active { .. } => Ok(()),
        }
    }

    pub fn key_len(&self) -> usize {
        self.api_key.len()
    }
}

/// The three wire contracts the generation backend exposes. A trait seam so
/// the composer can run against a scripted double in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn get_suggestions(&self, body: &SuggestionBody) -> Result<SuggestionReply, SpinError>;
    async fn generate_script(&self, body: &ScriptBody) -> Result<ScriptReply, SpinError>;
    async fn generate_variation(&self, body: &VariationBody) -> Result<ScriptReply, SpinError>;
}

pub type DynBackend = Box<dyn Backend + Send + Sync>;

pub fn make_backend(base_url: String, timeout_secs: u64) -> DynBackend {
    Box::new(http::HttpBackend::new(base_url, timeout_secs))
}
