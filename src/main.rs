//! CLI entry point for theorio-admin
//!
//! Lists subjects, exams and feedback, edits questions from JSON files,
//! exports catalog snapshots, and launches the GUI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use theorio_admin::api::ApiClient;
use theorio_admin::config::{self, Settings};
use theorio_admin::core::format::{format_timestamp, question_detail_lines, summarize, truncate_preview};
use theorio_admin::core::{Catalog, ExamCategory, FeedbackStatus, Question, QuestionParent};

#[derive(Parser)]
#[command(name = "theorio-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to theorio.toml / theorio.local.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects and their questions
    Subjects,

    /// List exams by category
    Exams,

    /// List student feedback
    Feedback {
        /// Only items with this status (open, in_progress, resolved, rejected)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show one question in full
    Show {
        /// Question id
        id: String,
    },

    /// Create a question from a JSON file
    Create {
        /// Subject title, or exam section such as "Examen 3: Kennis"
        #[arg(short, long)]
        parent: String,
        /// Question JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Replace a question from a JSON file (the file must contain its id)
    Update {
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Delete a question
    Delete {
        /// Question id
        id: String,
    },

    /// Change the moderation status of a feedback item
    SetStatus {
        /// Feedback id
        id: String,
        /// New status
        status: String,
    },

    /// Write subjects, exams and feedback to a JSON snapshot
    Export {
        #[arg(short, long, default_value = "theorio-catalog.json")]
        output: PathBuf,
    },

    /// Launch the GUI (default when no command is given)
    #[cfg(feature = "gui")]
    Gui,
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref())?;
    init_tracing(&settings);
    debug!(api = ?settings.api, "Settings loaded");

    let client = ApiClient::from_settings(&settings.api)?;

    let command = match cli.command {
        Some(command) => command,
        #[cfg(feature = "gui")]
        None => Commands::Gui,
        #[cfg(not(feature = "gui"))]
        None => anyhow::bail!("No command given (this build has no GUI); see --help"),
    };

    #[cfg(feature = "gui")]
    {
        if let Commands::Gui = command {
            info!("Launching GUI");
            let app = theorio_admin::ui::App::new(client).map_err(anyhow::Error::msg)?;
            return Ok(app.run().into());
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run_command(&client, command))?;
    Ok(ExitCode::SUCCESS)
}

/// `RUST_LOG` wins; otherwise `log.level` from the settings
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(client: &ApiClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Subjects => list_subjects(client).await,
        Commands::Exams => list_exams(client).await,
        Commands::Feedback { status } => list_feedback(client, status.as_deref()).await,
        Commands::Show { id } => show_question(client, &id).await,
        Commands::Create { parent, file } => create_question(client, &parent, &file).await,
        Commands::Update { file } => update_question(client, &file).await,
        Commands::Delete { id } => {
            let response = client.delete_question(&id).await?;
            println!("{} Deleted question {}", "✓".green(), id.cyan());
            print_message(&response.message);
            Ok(())
        }
        Commands::SetStatus { id, status } => {
            let status = FeedbackStatus::from(status.as_str());
            let response = client.update_feedback_status(&id, &status).await?;
            println!(
                "{} Feedback {} is now {}",
                "✓".green(),
                id.cyan(),
                status.label().bold()
            );
            print_message(&response.message);
            Ok(())
        }
        Commands::Export { output } => export(client, &output).await,
        #[cfg(feature = "gui")]
        Commands::Gui => Ok(()),
    }
}

fn print_message(message: &str) {
    if !message.is_empty() {
        println!("  {}", message.dimmed());
    }
}

fn print_questions(questions: &[Question]) {
    for (index, question) in questions.iter().enumerate() {
        let summary = summarize(index, question);
        println!(
            "    {} {} {} {}",
            summary.title.bold(),
            format!("[{}]", summary.kind_label()).magenta(),
            truncate_preview(&summary.text, 60),
            question.id.as_deref().unwrap_or("").dimmed()
        );
    }
}

/// Subjects with their questions
async fn list_subjects(client: &ApiClient) -> anyhow::Result<()> {
    let subjects = client.get_all_subjects().await?;

    for subject in &subjects {
        println!(
            "{} {}",
            subject.title.cyan().bold(),
            format!("({} questions)", subject.questions.len()).dimmed()
        );
        print_questions(&subject.questions);
    }

    println!("\n{} Total: {} subjects", "✓".green(), subjects.len());
    Ok(())
}

/// Exams grouped by category
async fn list_exams(client: &ApiClient) -> anyhow::Result<()> {
    let exams = client.get_all_exams().await?;

    for exam in &exams {
        println!("{}", format!("Examen {}", exam.id).cyan().bold());
        for category in ExamCategory::ALL {
            let section = exam.section(category);
            println!(
                "  {} {}",
                category.label().yellow(),
                format!("({} questions)", section.questions.len()).dimmed()
            );
            print_questions(&section.questions);
        }
    }

    println!("\n{} Total: {} exams", "✓".green(), exams.len());
    Ok(())
}

async fn list_feedback(client: &ApiClient, status: Option<&str>) -> anyhow::Result<()> {
    let status = status.map(FeedbackStatus::from);
    let items = client.get_all_feedback(status.as_ref()).await?;

    for item in &items {
        let date = item.date.as_ref().map(format_timestamp).unwrap_or_default();
        println!(
            "{} {} {} {}",
            item.subject.bold(),
            date.dimmed(),
            format!("[{}]", item.status.label()).magenta(),
            item.id.dimmed()
        );
        println!("    {}", truncate_preview(&item.body, 100));
    }

    println!("\n{} Total: {} feedback items", "✓".green(), items.len());
    Ok(())
}

async fn load_catalog(client: &ApiClient) -> anyhow::Result<Catalog> {
    let subjects = client.get_all_subjects().await?;
    let exams = client.get_all_exams().await?;
    Ok(Catalog::new(subjects, exams))
}

async fn show_question(client: &ApiClient, id: &str) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await?;
    let (parent, question) = catalog
        .find_question(id)
        .with_context(|| format!("No question with id '{}'", id))?;

    println!("{} {}", "Section:".bold(), parent.to_string().cyan());
    for (header, value) in question_detail_lines(question) {
        println!("{} {}", format!("{}:", header).bold(), value);
    }
    Ok(())
}

fn read_question(file: &Path) -> anyhow::Result<Question> {
    let path = shellexpand::tilde(
        file.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    )
    .into_owned();

    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not a valid question", path))
}

async fn create_question(client: &ApiClient, parent: &str, file: &Path) -> anyhow::Result<()> {
    let parent: QuestionParent = parent.parse()?;
    let question = read_question(file)?;

    let response = client.create_question(&question, &parent).await?;
    let id = response
        .question_id
        .or_else(|| response.question.and_then(|q| q.id))
        .unwrap_or_default();

    println!(
        "{} Created question {} in {}",
        "✓".green(),
        id.cyan(),
        parent.to_string().bold()
    );
    print_message(&response.message);
    Ok(())
}

async fn update_question(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let question = read_question(file)?;
    let response = client.update_question(&question).await?;

    println!(
        "{} Updated question {}",
        "✓".green(),
        question.id.as_deref().unwrap_or("").cyan()
    );
    print_message(&response.message);
    Ok(())
}

async fn export(client: &ApiClient, output: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(client).await?;
    let feedback = client.get_all_feedback(None).await?;

    let path = PathBuf::from(
        shellexpand::tilde(
            output
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
        )
        .as_ref(),
    );

    let bytes = config::export_snapshot(&path, &catalog, &feedback)?;
    info!(path = %path.display(), bytes, "Snapshot written");

    println!(
        "{} Exported {} questions and {} feedback items to {}",
        "✓".green(),
        catalog.question_count(),
        feedback.len(),
        path.display()
    );
    Ok(())
}
