use fs_err as fs;
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::provider::{ProviderConfig, ProviderId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend_url: String,
    pub provider: ProviderId,
    /// Empty means "resolve to the provider's first declared model".
    pub model: String,
    pub api_key: String,
    pub suggestion_limit: usize,
    pub timeout_secs: u64,
    pub save_request: bool,
    pub save_response: bool,
    pub artifacts_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".into(),
            provider: ProviderId::OpenAI,
            model: String::new(),
            api_key: String::new(),
            suggestion_limit: 6,
            timeout_secs: 60,
            save_request: false,
            save_response: false,
            artifacts_root: ".spinner".into(),
        }
    }
}

impl Config {
    /// Optional TOML file first, then CLI flags on top, then env for the
    /// key. CLI always wins where both are present.
    pub fn from_args(args: &Args) -> anyhow::Result<Config> {
        let mut cfg = match &args.config {
            Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
            None => Config::default(),
        };

        cfg.provider = args.provider;
        cfg.backend_url = args.backend_url.clone();
        cfg.timeout_secs = args.timeout_secs;
        cfg.suggestion_limit = args.suggestion_limit;
        cfg.save_request = args.save_request;
        cfg.save_response = args.save_response;

        if let Some(model) = &args.model {
            cfg.model = model.clone();
        } else if cfg.model.is_empty() {
            cfg.model = cfg.provider.default_model().unwrap_or("gpt-4").to_string();
        }

        if let Some(key) = &args.api_key {
            cfg.api_key = key.clone();
        }
        if cfg.api_key.is_empty() {
            cfg.api_key = key_from_env(cfg.provider);
        }

        Ok(cfg)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

fn key_from_env(provider: ProviderId) -> String {
    let mut candidates = vec!["SPINNER_API_KEY"];
    if let Some(var) = provider.key_env_var() {
        candidates.push(var);
    }
    for var in candidates {
        if let Ok(key) = std::env::var(var) {
            if !key.is_empty() {
                return key;
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn partial_toml_fills_the_rest_with_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            backend_url = "http://spinner.internal:9000"
            provider = "openrouter"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.backend_url, "http://spinner.internal:9000");
        assert_eq!(cfg.provider, ProviderId::OpenRouter);
        assert_eq!(cfg.suggestion_limit, 6);
        assert_eq!(cfg.timeout_secs, 60);
    }

    #[test]
    fn model_defaults_to_the_providers_first_declared_model() {
        let args = Args::parse_from(["script_spinner", "--provider", "openrouter"]);
        let cfg = Config::from_args(&args).unwrap();
        assert_eq!(cfg.model, "openai/gpt-4o");

        let args = Args::parse_from(["script_spinner", "--provider", "openai", "--model", "gpt-4o-mini"]);
        let cfg = Config::from_args(&args).unwrap();
        assert_eq!(cfg.model, "gpt-4o-mini");
    }
}
