use tracing::{debug, warn};

use crate::errors::SpinError;
use crate::log::{self, Artifacts};
use crate::provider::{DynBackend, ProviderConfig};
use crate::session::{ScriptRequest, VariationKind};
use crate::wire::{ScriptBody, SuggestionBody, VariationBody};

pub mod fallback;

/// Terminal outcome of a provider-backed operation. Both variants carry
/// displayable content; which one occurred is visible only in diagnostics,
/// never in the user-facing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Generated(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Generated(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Orchestrates the three backend operations. Transport, provider, and
/// validation failures all stop here and come out as `Outcome::Fallback`;
/// callers never see an error.
pub struct Composer {
    backend: DynBackend,
    artifacts: Artifacts,
}

impl Composer {
    pub fn new(backend: DynBackend, artifacts: Artifacts) -> Self {
        Self { backend, artifacts }
    }

    pub async fn request_suggestions(
        &self,
        topic: &str,
        cfg: &ProviderConfig,
        limit: usize,
    ) -> Outcome<Vec<String>> {
        match self.try_suggestions(topic, cfg, limit).await {
            Ok(list) => {
                log::call_event("suggestions", cfg, "generated");
                Outcome::Generated(list)
            }
            Err(e) => {
                warn!(error = %e, "suggestion request degraded to fallback");
                log::call_event("suggestions", cfg, "fallback");
                Outcome::Fallback(clip(fallback::suggestions(), limit))
            }
        }
    }

    pub async fn request_script(
        &self,
        request: &ScriptRequest,
        cfg: &ProviderConfig,
    ) -> Outcome<String> {
        match self.try_script(request, cfg).await {
            Ok(script) => {
                log::call_event("script", cfg, "generated");
                Outcome::Generated(script)
            }
            Err(e) => {
                warn!(error = %e, "script generation degraded to fallback");
                log::call_event("script", cfg, "fallback");
                Outcome::Fallback(fallback::script())
            }
        }
    }

    pub async fn request_variation(
        &self,
        current_script: &str,
        kind: VariationKind,
        cfg: &ProviderConfig,
    ) -> Outcome<String> {
        let op = format!("variation.{}", kind.as_str());
        match self.try_variation(current_script, kind, &op, cfg).await {
            Ok(script) => {
                log::call_event(&op, cfg, "generated");
                Outcome::Generated(script)
            }
            Err(e) => {
                warn!(error = %e, kind = kind.as_str(), "variation degraded to fallback");
                log::call_event(&op, cfg, "fallback");
                Outcome::Fallback(fallback::variation(kind))
            }
        }
    }

    async fn try_suggestions(
        &self,
        topic: &str,
        cfg: &ProviderConfig,
        limit: usize,
    ) -> Result<Vec<String>, SpinError> {
        // Double-checks the wizard guard so a short topic can never reach
        // the wire even if a caller skips the session.
        if topic.trim().len() <= 2 {
            return Err(SpinError::Validation("topic too short for suggestions".into()));
        }
        cfg.validate()?;

        let body = SuggestionBody::new(topic, limit, cfg);
        let result = self.backend.get_suggestions(&body).await;
        self.persist("suggestions", &body.redacted(), result.as_ref().ok());

        let reply = result?;
        if !reply.success {
            return Err(SpinError::Provider("backend reported success=false".into()));
        }
        if reply.suggestions.is_empty() {
            return Err(SpinError::Provider("backend returned no suggestions".into()));
        }
        Ok(clip(reply.suggestions, limit))
    }

    async fn try_script(
        &self,
        request: &ScriptRequest,
        cfg: &ProviderConfig,
    ) -> Result<String, SpinError> {
        cfg.validate()?;

        let body = ScriptBody::new(request, cfg);
        let result = self.backend.generate_script(&body).await;
        self.persist("script", &body.redacted(), result.as_ref().ok());

        let reply = result?;
        if !reply.success {
            return Err(SpinError::Provider(format!(
                "backend reported success=false: {}",
                reply.message
            )));
        }
        if reply.script.trim().is_empty() {
            return Err(SpinError::Provider("backend returned an empty script".into()));
        }
        debug!(message = %reply.message, "script generated");
        Ok(reply.script)
    }

    async fn try_variation(
        &self,
        current_script: &str,
        kind: VariationKind,
        op: &str,
        cfg: &ProviderConfig,
    ) -> Result<String, SpinError> {
        cfg.validate()?;

        let body = VariationBody::new(current_script, kind);
        let result = self.backend.generate_variation(&body).await;
        self.persist(op, &body, result.as_ref().ok());

        let reply = result?;
        if !reply.success {
            return Err(SpinError::Provider(format!(
                "backend reported success=false: {}",
                reply.message
            )));
        }
        if reply.script.trim().is_empty() {
            return Err(SpinError::Provider("backend returned an empty variation".into()));
        }
        Ok(reply.script)
    }

    fn persist<B: serde::Serialize, R: serde::Serialize>(
        &self,
        stage: &str,
        body: &B,
        reply: Option<&R>,
    ) {
        if let Err(e) = self.artifacts.save(stage, body, reply) {
            warn!(error = %e, stage, "failed to save call artifacts");
        }
    }
}

fn clip(mut list: Vec<String>, limit: usize) -> Vec<String> {
    list.truncate(limit);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Backend, ProviderId};
    use crate::wire::{ScriptReply, SuggestionReply};
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    /// Scripted double: serves the configured replies, or a transport
    /// failure when a reply is absent, counting every wire call.
    #[derive(Default)]
    struct ScriptedBackend {
        suggestions: Option<SuggestionReply>,
        script: Option<ScriptReply>,
        variation: Option<ScriptReply>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        async fn get_suggestions(
            &self,
            _body: &SuggestionBody,
        ) -> Result<SuggestionReply, SpinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.suggestions
                .clone()
                .ok_or_else(|| SpinError::Transport("connection refused".into()))
        }

        async fn generate_script(&self, _body: &ScriptBody) -> Result<ScriptReply, SpinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .clone()
                .ok_or_else(|| SpinError::Transport("connection refused".into()))
        }

        async fn generate_variation(&self, _body: &VariationBody) -> Result<ScriptReply, SpinError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.variation
                .clone()
                .ok_or_else(|| SpinError::Transport("connection refused".into()))
        }
    }

    fn composer_with(backend: ScriptedBackend) -> Composer {
        let artifacts = Artifacts::new(Path::new(".spinner"), Uuid::new_v4(), false, false);
        Composer::new(Box::new(backend), artifacts)
    }

    fn cfg() -> ProviderConfig {
        ProviderConfig {
            provider: ProviderId::OpenAI,
            model: "gpt-4".into(),
            api_key: "sk-test".into(),
        }
    }

    fn request() -> ScriptRequest {
        ScriptRequest {
            topic: "coffee brewing".into(),
            hook: "anyone can do this".into(),
            style: Some(crate::session::Style::Casual),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn transport_failure_yields_the_six_literal_suggestions() {
        let composer = composer_with(ScriptedBackend::default());
        let outcome = composer.request_suggestions("coffee", &cfg(), 6).await;
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.into_inner(),
            vec![
                "How to master this skill quickly",
                "Common mistakes beginners make",
                "Essential tools you need",
                "Tips from professionals",
                "Quick wins for immediate results",
                "Secrets that actually work",
            ]
        );
    }

    #[tokio::test]
    async fn short_topic_never_reaches_the_wire() {
        let backend = ScriptedBackend::default();
        let calls = backend.calls.clone();
        let composer = composer_with(backend);
        let outcome = composer.request_suggestions(" ab ", &cfg(), 6).await;
        assert!(outcome.is_fallback());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn success_false_is_a_provider_failure() {
        let backend = ScriptedBackend {
            suggestions: Some(SuggestionReply {
                success: false,
                suggestions: vec!["ignored".into()],
            }),
            ..Default::default()
        };
        let outcome = composer_with(backend)
            .request_suggestions("coffee", &cfg(), 6)
            .await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn generated_suggestions_are_clipped_to_the_limit() {
        let backend = ScriptedBackend {
            suggestions: Some(SuggestionReply {
                success: true,
                suggestions: (1..=8).map(|i| format!("idea {i}")).collect(),
            }),
            ..Default::default()
        };
        let outcome = composer_with(backend)
            .request_suggestions("coffee", &cfg(), 3)
            .await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_inner().len(), 3);
    }

    #[tokio::test]
    async fn inert_provider_always_falls_back_without_a_call() {
        let backend = ScriptedBackend {
            script: Some(ScriptReply {
                success: true,
                script: "live".into(),
                message: String::new(),
            }),
            ..Default::default()
        };
        let calls = backend.calls.clone();
        let composer = composer_with(backend);
        let inert = ProviderConfig {
            provider: ProviderId::Anthropic,
            model: "claude-3-opus".into(),
            api_key: "k".into(),
        };
        let outcome = composer.request_script(&request(), &inert).await;
        assert!(outcome.is_fallback());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn undeclared_model_always_falls_back_without_a_call() {
        let backend = ScriptedBackend::default();
        let calls = backend.calls.clone();
        let composer = composer_with(backend);
        let bad = ProviderConfig {
            provider: ProviderId::OpenAI,
            model: "not-a-model".into(),
            api_key: "k".into(),
        };
        let outcome = composer.request_script(&request(), &bad).await;
        assert!(outcome.is_fallback());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn script_success_returns_backend_text() {
        let backend = ScriptedBackend {
            script: Some(ScriptReply {
                success: true,
                script: "the generated script".into(),
                message: "Generated using openai/gpt-4".into(),
            }),
            ..Default::default()
        };
        let outcome = composer_with(backend).request_script(&request(), &cfg()).await;
        assert_eq!(outcome, Outcome::Generated("the generated script".into()));
    }

    #[tokio::test]
    async fn script_failure_returns_the_literal_fallback() {
        let outcome = composer_with(ScriptedBackend::default())
            .request_script(&request(), &cfg())
            .await;
        assert!(outcome.is_fallback());
        let script = outcome.into_inner();
        assert!(script.starts_with("🎬 HOOK:"));
        assert_eq!(script, fallback::SCRIPT);
    }

    #[tokio::test]
    async fn each_variation_kind_has_its_own_fallback() {
        let composer = composer_with(ScriptedBackend::default());
        for kind in [
            VariationKind::Shorter,
            VariationKind::Engaging,
            VariationKind::Social,
        ] {
            let outcome = composer.request_variation("script", kind, &cfg()).await;
            assert!(outcome.is_fallback());
            assert_eq!(outcome.into_inner(), fallback::variation(kind));
        }
        assert!(fallback::variation(VariationKind::Shorter).starts_with("☕ QUICK TIP"));
        assert!(fallback::variation(VariationKind::Engaging).starts_with("🚨 COFFEE LOVERS"));
        assert!(fallback::variation(VariationKind::Social).starts_with("POV:"));
    }

    #[tokio::test]
    async fn saved_artifacts_never_contain_the_key() {
        let tmp = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        let artifacts = Artifacts::new(tmp.path(), id, true, true);
        let backend = ScriptedBackend {
            script: Some(ScriptReply {
                success: true,
                script: "live".into(),
                message: String::new(),
            }),
            ..Default::default()
        };
        let composer = Composer::new(Box::new(backend), artifacts);

        let secret_cfg = ProviderConfig {
            provider: ProviderId::OpenAI,
            model: "gpt-4".into(),
            api_key: "sk-very-secret".into(),
        };
        composer.request_script(&request(), &secret_cfg).await;

        let saved = tmp
            .path()
            .join("session")
            .join(id.to_string())
            .join("script.request.json");
        let contents = std::fs::read_to_string(saved).unwrap();
        assert!(contents.contains("[redacted]"));
        assert!(!contents.contains("sk-very-secret"));
    }
}
