use crate::session::ScriptRequest;

/// Placeholder tokens shown in the preview while a field is still empty.
pub const TOPIC_PLACEHOLDER: &str = "[your topic]";
pub const HOOK_PLACEHOLDER: &str = "[your core message]";
pub const STYLE_PLACEHOLDER: &str = "[your style]";

/// The canonical generation instruction, interpolated in fixed order from
/// the current request. The UI renders this exact string as the live
/// preview after every field change, and the same rendering is what a
/// triggered generation stands for, so preview and request cannot drift.
pub fn build_initial_prompt(request: &ScriptRequest) -> String {
    let topic = non_empty_or(request.effective_topic(), TOPIC_PLACEHOLDER);
    let hook = non_empty_or(&request.hook, HOOK_PLACEHOLDER);
    let style = request
        .style
        .map(|s| s.as_str())
        .unwrap_or(STYLE_PLACEHOLDER);
    format!(
        "You are an expert scriptwriter for short-form video. \
The goal is to create a compelling script for a beginner audience. \
The topic is {topic}. \
The core message is {hook}. \
The style should be {style}. \
The call to action is to \"Follow for more tips.\" \
Using this information, write a dynamic 60-second video script with a clear hook, \
a problem, a solution, and a clear call to action. Do not include a title."
    )
}

fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}
