use clap::Parser;

use crate::provider::ProviderId;

#[derive(Parser, Debug)]
#[command(
    name = "script_spinner",
    version,
    about = "Guided wizard that spins 60-second video scripts through an LLM generation backend"
)]
pub struct Args {
    #[arg(long, value_enum, default_value_t = ProviderId::OpenAI)]
    pub provider: ProviderId,

    /// Model identifier; defaults to the provider's first declared model.
    #[arg(long)]
    pub model: Option<String>,

    /// Key passed through to the backend. Falls back to SPINNER_API_KEY or
    /// the provider's conventional env var; without one, every call serves
    /// canned fallback content.
    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long, default_value = "http://localhost:8000")]
    pub backend_url: String,

    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = 6)]
    pub suggestion_limit: usize,

    /// Save redacted request bodies under .spinner/session/<id>/.
    #[arg(long, default_value_t = false)]
    pub save_request: bool,

    /// Save response bodies under .spinner/session/<id>/.
    #[arg(long, default_value_t = false)]
    pub save_response: bool,

    /// Probe the backend /health endpoint and exit.
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Optional TOML config file; CLI flags win over its values.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
