use tracing::debug;

/// Position in the five-step wizard sequence. Ordering is the gate for
/// which actions are enabled; the stage never moves backward except through
/// the explicit [`Session::back`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Stage {
    #[default]
    Topic,
    Hook,
    Style,
    Ready,
    Result,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::Topic => 1,
            Stage::Hook => 2,
            Stage::Style => 3,
            Stage::Ready => 4,
            Stage::Result => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::Topic => "Topic",
            Stage::Hook => "Hook",
            Stage::Style => "Style",
            Stage::Ready => "Ready",
            Stage::Result => "Result",
        }
    }
}

/// The four tones a script can be asked for. Anything outside this set is
/// unrepresentable; free-text input goes through [`Style::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Authoritative,
    Humorous,
    Casual,
    Formal,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Authoritative,
        Style::Humorous,
        Style::Casual,
        Style::Formal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Authoritative => "Authoritative",
            Style::Humorous => "Humorous",
            Style::Casual => "Casual",
            Style::Formal => "Formal",
        }
    }

    pub fn parse(input: &str) -> Option<Style> {
        match input.trim().to_lowercase().as_str() {
            "authoritative" => Some(Style::Authoritative),
            "humorous" => Some(Style::Humorous),
            "casual" => Some(Style::Casual),
            "formal" => Some(Style::Formal),
            _ => None,
        }
    }
}

/// One of the three transformations applicable to an already-generated
/// script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariationKind {
    Shorter,
    Engaging,
    Social,
}

impl VariationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariationKind::Shorter => "shorter",
            VariationKind::Engaging => "engaging",
            VariationKind::Social => "social",
        }
    }
}

/// The user-entered fields collected across the wizard. One instance per
/// session, owned exclusively by the [`Session`].
#[derive(Debug, Clone, Default)]
pub struct ScriptRequest {
    pub topic: String,
    /// Set only by selecting a suggestion; empty means unset.
    pub refined_topic: String,
    pub hook: String,
    pub style: Option<Style>,
    pub script: String,
}

impl ScriptRequest {
    /// The refined topic supersedes the raw topic once present.
    pub fn effective_topic(&self) -> &str {
        if self.refined_topic.trim().is_empty() {
            &self.topic
        } else {
            &self.refined_topic
        }
    }
}

/// Wizard state machine: the single `ScriptRequest`, the current stage, and
/// the ephemeral suggestion list. All mutation goes through the transition
/// methods below; field edits never roll the stage back on their own.
#[derive(Debug, Default)]
pub struct Session {
    request: ScriptRequest,
    stage: Stage,
    suggestions: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn request(&self) -> &ScriptRequest {
        &self.request
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn set_topic(&mut self, text: &str) {
        self.request.topic = text.trim().to_string();
    }

    /// Suggestions may be (re-)requested while the topic is still being
    /// refined, and only once there is enough of a topic to work with.
    pub fn can_request_suggestions(&self) -> bool {
        self.stage <= Stage::Hook && self.request.topic.trim().len() > 2
    }

    /// Replaces the suggestion list wholesale; the previous list is gone.
    pub fn replace_suggestions(&mut self, list: Vec<String>) {
        self.suggestions = list;
    }

    /// Topic → Hook: adopting one suggestion as the refined topic. Out of
    /// range indices are ignored. Selecting again at a later stage only
    /// swaps the refined topic; the stage stays where it is.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(choice) = self.suggestions.get(index) else {
            return false;
        };
        self.request.refined_topic = choice.clone();
        self.suggestions.clear();
        if self.stage == Stage::Topic {
            self.advance(Stage::Hook);
        }
        true
    }

    /// Topic → Hook without adopting a suggestion; the raw topic stays the
    /// effective one. Requires a non-empty topic.
    pub fn skip_refinement(&mut self) -> bool {
        if self.stage != Stage::Topic || self.request.topic.trim().is_empty() {
            return false;
        }
        self.suggestions.clear();
        self.advance(Stage::Hook);
        true
    }

    /// Hook → Style: a hook that trims to empty is rejected and nothing
    /// changes.
    pub fn confirm_hook(&mut self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.request.hook = trimmed.to_string();
        if self.stage == Stage::Hook {
            self.advance(Stage::Style);
        }
        true
    }

    /// Style → Ready. Taking a typed `Style` means there is no invalid
    /// input to reject here; parsing already happened.
    pub fn choose_style(&mut self, style: Style) {
        self.request.style = Some(style);
        if self.stage == Stage::Style {
            self.advance(Stage::Ready);
        }
    }

    pub fn can_generate(&self) -> bool {
        self.stage == Stage::Ready
    }

    /// Ready → Result on the first script; at Result the script is replaced
    /// in place (variations) and the stage stays put.
    pub fn apply_script(&mut self, script: String) {
        self.request.script = script;
        if self.stage == Stage::Ready {
            self.advance(Stage::Result);
        }
    }

    /// Explicit backward transition. Fields belonging to the stages being
    /// left behind are reset so a re-walk starts clean; at Topic this is a
    /// no-op.
    pub fn back(&mut self) {
        match self.stage {
            Stage::Topic => {}
            Stage::Hook => {
                self.request.refined_topic.clear();
                self.suggestions.clear();
                self.stage = Stage::Topic;
            }
            Stage::Style => {
                self.request.style = None;
                self.stage = Stage::Hook;
            }
            Stage::Ready => {
                self.request.style = None;
                self.stage = Stage::Style;
            }
            Stage::Result => {
                self.request.script.clear();
                self.stage = Stage::Ready;
            }
        }
    }

    fn advance(&mut self, to: Stage) {
        debug!(from = self.stage.title(), to = to.title(), "stage advanced");
        self.stage = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk_to_ready(session: &mut Session) {
        session.set_topic("How to be more productive at work");
        session.skip_refinement();
        session.confirm_hook("Anyone can master this skill");
        session.choose_style(Style::Casual);
    }

    #[test]
    fn starts_empty_at_topic() {
        let session = Session::new();
        assert_eq!(session.stage(), Stage::Topic);
        assert!(session.request().topic.is_empty());
        assert!(session.request().style.is_none());
    }

    #[test]
    fn suggestion_guard_needs_more_than_two_chars() {
        let mut session = Session::new();
        session.set_topic("  ab  ");
        assert!(!session.can_request_suggestions());
        session.set_topic("abc");
        assert!(session.can_request_suggestions());
    }

    #[test]
    fn suggestion_guard_closes_after_hook_stage() {
        let mut session = Session::new();
        walk_to_ready(&mut session);
        assert_eq!(session.stage(), Stage::Ready);
        assert!(!session.can_request_suggestions());
    }

    #[test]
    fn selecting_suggestion_sets_refined_topic_and_advances() {
        let mut session = Session::new();
        session.set_topic("coffee");
        session.replace_suggestions(vec![
            "Essential tools you need".into(),
            "Tips from professionals".into(),
        ]);
        assert!(session.select_suggestion(1));
        assert_eq!(session.request().refined_topic, "Tips from professionals");
        assert_eq!(session.request().effective_topic(), "Tips from professionals");
        assert_eq!(session.stage(), Stage::Hook);
        assert!(session.suggestions().is_empty());
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut session = Session::new();
        session.set_topic("coffee");
        session.replace_suggestions(vec!["one".into()]);
        assert!(!session.select_suggestion(5));
        assert_eq!(session.stage(), Stage::Topic);
        assert_eq!(session.suggestions().len(), 1);
    }

    #[test]
    fn skip_refinement_requires_a_topic() {
        let mut session = Session::new();
        assert!(!session.skip_refinement());
        session.set_topic("coffee");
        assert!(session.skip_refinement());
        assert_eq!(session.stage(), Stage::Hook);
        assert!(session.request().refined_topic.is_empty());
    }

    #[test]
    fn empty_hook_is_rejected() {
        let mut session = Session::new();
        session.set_topic("coffee");
        session.skip_refinement();
        assert!(!session.confirm_hook("   "));
        assert_eq!(session.stage(), Stage::Hook);
        assert!(session.confirm_hook("  a real hook  "));
        assert_eq!(session.request().hook, "a real hook");
        assert_eq!(session.stage(), Stage::Style);
    }

    #[test]
    fn only_the_four_styles_parse() {
        assert_eq!(Style::parse(" CASUAL "), Some(Style::Casual));
        assert_eq!(Style::parse("formal"), Some(Style::Formal));
        assert_eq!(Style::parse("sarcastic"), None);
        assert_eq!(Style::parse(""), None);
    }

    #[test]
    fn first_script_advances_then_variations_replace_in_place() {
        let mut session = Session::new();
        walk_to_ready(&mut session);
        assert!(session.can_generate());
        session.apply_script("first".into());
        assert_eq!(session.stage(), Stage::Result);
        session.apply_script("shorter version".into());
        assert_eq!(session.stage(), Stage::Result);
        assert_eq!(session.request().script, "shorter version");
    }

    #[test]
    fn editing_filled_fields_does_not_roll_back_stage() {
        let mut session = Session::new();
        walk_to_ready(&mut session);
        session.set_topic("a different topic");
        session.confirm_hook("a different hook");
        assert_eq!(session.stage(), Stage::Ready);
    }

    #[test]
    fn back_steps_through_stages_and_resets_later_fields() {
        let mut session = Session::new();
        session.set_topic("coffee");
        session.replace_suggestions(vec!["Essential tools you need".into()]);
        session.select_suggestion(0);
        session.confirm_hook("hook");
        session.choose_style(Style::Formal);
        session.apply_script("script".into());
        assert_eq!(session.stage(), Stage::Result);

        session.back();
        assert_eq!(session.stage(), Stage::Ready);
        assert!(session.request().script.is_empty());

        session.back();
        assert_eq!(session.stage(), Stage::Style);
        assert!(session.request().style.is_none());

        session.back();
        assert_eq!(session.stage(), Stage::Hook);

        session.back();
        assert_eq!(session.stage(), Stage::Topic);
        assert!(session.request().refined_topic.is_empty());

        session.back();
        assert_eq!(session.stage(), Stage::Topic);
        assert_eq!(session.request().topic, "coffee");
    }
}
