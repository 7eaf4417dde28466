use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod cli;
mod composer;
mod config;
mod errors;
mod log;
mod prompt;
mod provider;
mod session;
mod ui;
mod wire;

use composer::Composer;
use provider::ProviderConfig;
use session::{Session, Stage, Style, VariationKind};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();

    let default_filter = if args.debug {
        "script_spinner=debug"
    } else {
        "script_spinner=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let cfg = config::Config::from_args(&args)?;

    if args.check {
        return check_backend(&cfg).await;
    }

    run_wizard(cfg).await
}

async fn check_backend(cfg: &config::Config) -> Result<()> {
    let backend = provider::http::HttpBackend::new(cfg.backend_url.clone(), cfg.timeout_secs);
    match backend.health().await {
        Ok(body) => {
            println!(
                "{} backend reachable at {}",
                "✓".green().bold(),
                cfg.backend_url
            );
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(e) => {
            println!("{} backend unreachable: {e}", "✗".red().bold());
            println!("The wizard still works; every call will serve canned fallback content.");
        }
    }
    Ok(())
}

async fn run_wizard(cfg: config::Config) -> Result<()> {
    let session_id = Uuid::new_v4();
    let artifacts = log::Artifacts::new(
        Path::new(&cfg.artifacts_root),
        session_id,
        cfg.save_request,
        cfg.save_response,
    );
    let backend = provider::make_backend(cfg.backend_url.clone(), cfg.timeout_secs);
    let composer = Composer::new(backend, artifacts);
    let pcfg = cfg.provider_config();
    let mut session = Session::new();

    ui::banner();

    loop {
        let before = session.stage();
        let keep_going = match before {
            Stage::Topic => topic_stage(&mut session, &composer, &cfg, &pcfg).await,
            Stage::Hook => hook_stage(&mut session),
            Stage::Style => style_stage(&mut session),
            Stage::Ready => ready_stage(&mut session, &composer, &pcfg).await,
            Stage::Result => result_stage(&mut session, &composer, &pcfg).await,
        };
        if session.stage() != before {
            log::transition(before, session.stage(), &pcfg);
        }
        if !keep_going {
            break;
        }
    }

    Ok(())
}

async fn topic_stage(
    session: &mut Session,
    composer: &Composer,
    cfg: &config::Config,
    pcfg: &ProviderConfig,
) -> bool {
    ui::stage_header(Stage::Topic);
    ui::show_preview(session.request());

    let Some(input) = ui::read_line("What is your video about? (3+ characters, or 'quit'):")
    else {
        return false;
    };
    match input.as_str() {
        "quit" | "q" => return false,
        "" => return true,
        _ => session.set_topic(&input),
    }
    ui::show_preview(session.request());

    if !session.can_request_suggestions() {
        println!("A topic needs more than 2 characters before suggestions are available.");
        return true;
    }

    let pb = ui::spinner("Fetching topic suggestions...");
    let outcome = composer
        .request_suggestions(&session.request().topic, pcfg, cfg.suggestion_limit)
        .await;
    pb.finish_and_clear();
    session.replace_suggestions(outcome.into_inner());

    ui::show_suggestions(session.suggestions());
    let Some(pick) = ui::read_line("Pick a suggestion by number, or press Enter to keep your topic:")
    else {
        return false;
    };
    if pick.is_empty() {
        session.skip_refinement();
    } else {
        let selected = pick
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .map(|i| session.select_suggestion(i))
            .unwrap_or(false);
        if !selected {
            println!("No such suggestion; staying on the topic step.");
        }
    }
    true
}

fn hook_stage(session: &mut Session) -> bool {
    ui::stage_header(Stage::Hook);
    ui::show_preview(session.request());

    let Some(input) = ui::read_line("What is the core message? ('back' to change topic, 'quit'):")
    else {
        return false;
    };
    match input.as_str() {
        "quit" | "q" => false,
        "back" | "b" => {
            session.back();
            true
        }
        _ => {
            if !session.confirm_hook(&input) {
                println!("The core message cannot be empty.");
            }
            true
        }
    }
}

fn style_stage(session: &mut Session) -> bool {
    ui::stage_header(Stage::Style);
    ui::show_preview(session.request());
    ui::show_styles();

    let Some(input) = ui::read_line("Pick a style by number or name ('back', 'quit'):") else {
        return false;
    };
    match input.as_str() {
        "quit" | "q" => false,
        "back" | "b" => {
            session.back();
            true
        }
        _ => {
            let style = input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Style::ALL.get(i).copied())
                .or_else(|| Style::parse(&input));
            match style {
                Some(s) => session.choose_style(s),
                None => println!("Styles are Authoritative, Humorous, Casual, or Formal."),
            }
            true
        }
    }
}

async fn ready_stage(session: &mut Session, composer: &Composer, pcfg: &ProviderConfig) -> bool {
    ui::stage_header(Stage::Ready);
    ui::show_preview(session.request());

    if !ui::confirm("Generate the 60-second script now?") {
        let Some(input) = ui::read_line("'back' to adjust the style, or 'quit':") else {
            return false;
        };
        return match input.as_str() {
            "quit" | "q" => false,
            "back" | "b" => {
                session.back();
                true
            }
            _ => true,
        };
    }

    let pb = ui::spinner("Writing your script...");
    let outcome = composer.request_script(session.request(), pcfg).await;
    pb.finish_and_clear();
    session.apply_script(outcome.into_inner());
    true
}

async fn result_stage(session: &mut Session, composer: &Composer, pcfg: &ProviderConfig) -> bool {
    ui::stage_header(Stage::Result);
    ui::show_script(&session.request().script);
    ui::show_result_actions();

    let Some(input) = ui::read_line("Choose an action:") else {
        return false;
    };
    let kind = match input.as_str() {
        "1" | "shorter" => VariationKind::Shorter,
        "2" | "engaging" => VariationKind::Engaging,
        "3" | "social" => VariationKind::Social,
        "back" | "b" => {
            session.back();
            return true;
        }
        "quit" | "q" => return false,
        _ => {
            println!("Pick 1-3, 'back', or 'quit'.");
            return true;
        }
    };

    let pb = ui::spinner("Spinning a variation...");
    let outcome = composer
        .request_variation(&session.request().script, kind, pcfg)
        .await;
    pb.finish_and_clear();
    session.apply_script(outcome.into_inner());
    true
}
