//! Kickoff terminal front end.
//!
//! Drives one guided interview: resume prompt, phase loop, briefing export.
//! All workflow logic lives in `kickoff-core`; this binary only renders
//! questions and collects input.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use kickoff_agents::{CatalogProvider, HttpProvider, descriptions};
use kickoff_core::answer::AnswerInput;
use kickoff_core::interview::InterviewController;
use kickoff_core::provider::QuestionProvider;
use kickoff_core::resume::ResumeController;
use kickoff_core::session::{Phase, SessionRepository};
use kickoff_infrastructure::TomlSessionRepository;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kickoff")]
#[command(about = "Kickoff - guided project intake and briefing", long_about = None)]
struct Cli {
    /// Session store path (defaults to ~/.config/kickoff/session.toml)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Base URL of a remote question service; the builtin catalog is used
    /// when absent
    #[arg(long)]
    endpoint: Option<String>,

    /// Where to write the briefing markdown
    #[arg(long, default_value = "briefing.md")]
    export: PathBuf,
}

/// Outcome of one prompt: a line, or a request to leave the session.
enum Input {
    Line(String),
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let repository: Arc<dyn SessionRepository> = match &cli.store {
        Some(path) => Arc::new(TomlSessionRepository::with_path(path.clone())),
        None => Arc::new(TomlSessionRepository::default_location()?),
    };
    let provider: Arc<dyn QuestionProvider> = match &cli.endpoint {
        Some(endpoint) => Arc::new(HttpProvider::new(endpoint.clone())),
        None => Arc::new(CatalogProvider::new()),
    };

    let mut editor = DefaultEditor::new()?;
    let mut controller = startup(&mut editor, repository, provider).await?;

    println!("{}", "kickoff - guided project intake".bold());
    run_interview(&mut editor, &mut controller, &cli.export).await
}

/// Offers resume-or-discard when a saved session exists, otherwise starts
/// fresh.
async fn startup(
    editor: &mut DefaultEditor,
    repository: Arc<dyn SessionRepository>,
    provider: Arc<dyn QuestionProvider>,
) -> Result<InterviewController> {
    let resume = ResumeController::new(repository.clone());

    if let Some(session) = resume.check().await {
        println!(
            "Found a saved session in phase {} ({} answers so far).",
            session.phase.as_str().cyan(),
            session.answers.len()
        );
        let restore = matches!(
            prompt(editor, "Resume it? [Y/n] ")?,
            Input::Line(line) if !line.trim().eq_ignore_ascii_case("n")
        );
        if restore {
            return Ok(resume
                .resume(session, provider)
                .with_descriptions(descriptions()));
        }
        resume.discard().await?;
        println!("Saved session discarded.");
    }

    Ok(InterviewController::new(provider, repository).with_descriptions(descriptions()))
}

async fn run_interview(
    editor: &mut DefaultEditor,
    controller: &mut InterviewController,
    export: &PathBuf,
) -> Result<()> {
    loop {
        match controller.phase() {
            Phase::Vision => {
                banner("Vision");
                println!("Describe the project you have in mind.");
                let Input::Line(text) = prompt(editor, "> ")? else {
                    return quit();
                };
                if let Err(err) = controller.submit_vision(&text).await {
                    report(&err);
                }
            }
            Phase::TeamSetup => {
                banner("Team setup");
                print_team(controller);
                println!(
                    "Press Enter to confirm, type agent ids (comma separated) to adjust, or /quit."
                );
                match prompt(editor, "> ")? {
                    Input::Quit => return quit(),
                    Input::Line(line) if line.trim().is_empty() => {
                        if let Err(err) = controller.confirm_team().await {
                            report(&err);
                        }
                    }
                    Input::Line(line) => {
                        let roster = line
                            .split(',')
                            .map(|part| part.trim().to_string())
                            .filter(|part| !part.is_empty())
                            .collect();
                        if let Err(err) = controller.update_team(roster).await {
                            report(&err);
                        }
                    }
                }
            }
            Phase::DynamicQuestions => {
                banner("Project questions");
                let (text, options) = {
                    let question = controller.current_dynamic_question()?;
                    (question.text.clone(), question.options.clone())
                };
                print_question(&text, &options);
                match read_answer(editor, &options)? {
                    Answered::Quit => return quit(),
                    Answered::Skip(reason) => {
                        controller.skip_dynamic(reason.as_deref()).await?;
                    }
                    Answered::Auto => {
                        println!("Auto-fill applies to specialist questions only.");
                    }
                    Answered::Input(input) => {
                        controller.answer_dynamic(input).await?;
                    }
                }
            }
            Phase::GuidedQa => {
                let agent = controller.current_agent().unwrap_or("specialist").to_string();
                banner(&format!("Questions from {}", agent));
                let (text, options) = {
                    let question = controller.current_guided_question()?;
                    (question.text.clone(), question.options.clone())
                };
                print_question(&text, &options);
                match read_answer(editor, &options)? {
                    Answered::Quit => return quit(),
                    Answered::Skip(reason) => {
                        controller.skip_guided(reason.as_deref()).await?;
                    }
                    Answered::Auto => {
                        controller.auto_fill_remaining().await?;
                        println!("Remaining questions answered with defaults.");
                    }
                    Answered::Input(input) => {
                        controller.answer_guided(input).await?;
                    }
                }
            }
            Phase::AgentFeedback => {
                let (agent, rollup) = controller.feedback_rollup()?;
                banner(&format!("Review: {}", agent));
                for answer in rollup {
                    let marker = if answer.auto_fallback { " (auto)" } else { "" };
                    println!(
                        "  {} {}{}",
                        answer.question_text.bold(),
                        answer.display_value(),
                        marker.dimmed()
                    );
                }
                println!("Press Enter to continue.");
                if matches!(prompt(editor, "> ")?, Input::Quit) {
                    return quit();
                }
                controller.continue_feedback().await?;
            }
            Phase::Summary => {
                banner("Summary");
                let session = controller.session();
                println!(
                    "{} answers collected, {} open points.",
                    session.answers.len(),
                    session.open_points.len()
                );
                for point in &session.open_points {
                    println!("  - {}", point.yellow());
                }
                println!("Press Enter to generate the briefing.");
                if matches!(prompt(editor, "> ")?, Input::Quit) {
                    return quit();
                }
                let briefing = controller.generate_briefing().await?;
                let markdown = briefing.to_markdown();
                std::fs::write(export, &markdown)?;
                println!("{}", markdown);
                println!("Briefing written to {}", export.display().to_string().green());
                return Ok(());
            }
            Phase::Briefing => return Ok(()),
        }
    }
}

/// What the user did with a question prompt.
enum Answered {
    Input(AnswerInput),
    Skip(Option<String>),
    Auto,
    Quit,
}

fn read_answer(editor: &mut DefaultEditor, options: &[String]) -> Result<Answered> {
    loop {
        let line = match prompt(editor, "> ")? {
            Input::Quit => return Ok(Answered::Quit),
            Input::Line(line) => line,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            println!("Enter an answer, /skip [reason], or /auto.");
            continue;
        }
        if let Some(reason) = trimmed.strip_prefix("/skip") {
            let reason = reason.trim();
            let reason = (!reason.is_empty()).then(|| reason.to_string());
            return Ok(Answered::Skip(reason));
        }
        if trimmed == "/auto" {
            return Ok(Answered::Auto);
        }
        if let Some(selected) = parse_selection(trimmed, options) {
            return Ok(Answered::Input(AnswerInput::Selected(selected)));
        }
        return Ok(Answered::Input(AnswerInput::Custom(trimmed.to_string())));
    }
}

/// Interprets "1" or "1,3" as option picks when every token is a valid
/// 1-based index; anything else falls through to free text.
fn parse_selection(input: &str, options: &[String]) -> Option<Vec<String>> {
    if options.is_empty() {
        return None;
    }
    let mut selected = Vec::new();
    for token in input.split(',') {
        let index: usize = token.trim().parse().ok()?;
        let option = options.get(index.checked_sub(1)?)?;
        if !selected.contains(option) {
            selected.push(option.clone());
        }
    }
    (!selected.is_empty()).then_some(selected)
}

fn prompt(editor: &mut DefaultEditor, text: &str) -> Result<Input> {
    match editor.readline(text) {
        Ok(line) => {
            let _ = editor.add_history_entry(line.as_str());
            if line.trim() == "/quit" {
                Ok(Input::Quit)
            } else {
                Ok(Input::Line(line))
            }
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(Input::Quit),
        Err(err) => Err(err.into()),
    }
}

fn banner(title: &str) {
    println!("\n{}", format!("== {} ==", title).cyan().bold());
}

fn print_question(text: &str, options: &[String]) {
    println!("{}", text.bold());
    for (index, option) in options.iter().enumerate() {
        println!("  {}. {}", index + 1, option);
    }
    if !options.is_empty() {
        println!("Pick numbers (comma separated) or type a free-text answer.");
    }
}

fn print_team(controller: &InterviewController) {
    let session = controller.session();
    println!("Recommended team:");
    for agent in &session.selected_agents {
        let reason = session
            .agent_reasons
            .get(agent)
            .map(String::as_str)
            .unwrap_or("Selected for this project.");
        println!("  {} {}", agent.green().bold(), reason);
    }
    if !session.not_needed_agents.is_empty() {
        let mut excluded: Vec<_> = session.not_needed_agents.iter().collect();
        excluded.sort();
        println!("Not recommended:");
        for (agent, reason) in excluded {
            println!("  {} {}", agent.dimmed(), reason.dimmed());
        }
    }
}

fn report(err: &kickoff_core::KickoffError) {
    if err.is_recoverable() {
        println!("{}", err.to_string().yellow());
    } else {
        println!("{}", err.to_string().red());
    }
}

fn quit() -> Result<()> {
    println!("Session saved. Run kickoff again to resume.");
    Ok(())
}
