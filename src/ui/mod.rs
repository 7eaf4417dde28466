use colored::Colorize;
use indicatif::ProgressBar;
use std::io::{self, Write};
use std::time::Duration;

use crate::prompt;
use crate::session::{ScriptRequest, Stage, Style};

pub fn banner() {
    println!("\n{}", "60-Second Script Spinner".bold());
    println!(
        "{}",
        "Answer a few questions, get a short-form video script.".dimmed()
    );
}

pub fn stage_header(stage: Stage) {
    println!(
        "\n{}",
        format!("=== STEP {} OF 5: {} ===", stage.number(), stage.title()).bold()
    );
}

/// The live preview. Rendering always goes through
/// `prompt::build_initial_prompt` on the current request, so what is shown
/// is what a generation triggered right now would stand for.
pub fn show_preview(request: &ScriptRequest) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━ Prompt Preview ━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    for line in wrap(&prompt::build_initial_prompt(request), 72) {
        println!("  {}", line.dimmed());
    }
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

pub fn show_suggestions(suggestions: &[String]) {
    println!("\n{}", "Suggested refinements:".bold());
    for (i, s) in suggestions.iter().enumerate() {
        println!("  {}. {}", (i + 1).to_string().cyan().bold(), s);
    }
}

pub fn show_styles() {
    println!("\n{}", "Available styles:".bold());
    for (i, style) in Style::ALL.iter().enumerate() {
        println!(
            "  {}. {}",
            (i + 1).to_string().cyan().bold(),
            style.as_str()
        );
    }
}

pub fn show_script(script: &str) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━━━ Your Script ━━━━━━━━━━━━━━━━━━━━━━━┓".bold()
    );
    for line in script.lines() {
        println!("  {line}");
    }
    println!(
        "{}",
        "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold()
    );
}

pub fn show_result_actions() {
    println!("\n{}", "Spin a variation:".bold());
    println!("  {}. {}", "1".cyan().bold(), "shorter   (30-40 second cut)");
    println!("  {}. {}", "2".cyan().bold(), "engaging  (more personality and flair)");
    println!("  {}. {}", "3".cyan().bold(), "social    (post-ready, with hashtags)");
    println!("  {}  {}", "b".cyan().bold(), "back      (discard the script)");
    println!("  {}  {}", "q".cyan().bold(), "quit");
}

/// Reads one trimmed line; `None` means stdin is closed and the caller
/// should wind down.
pub fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt} ");
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim().to_string()),
    }
}

pub fn confirm(prompt: &str) -> bool {
    match read_line(&format!("{prompt} [y/N]:")) {
        Some(ans) => {
            let ans = ans.to_lowercase();
            ans == "y" || ans == "yes"
        }
        None => false,
    }
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
