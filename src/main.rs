use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use planner_lib::commands::{handle_line, Outcome};
use planner_lib::config::{load_config, load_config_from, Config};
use planner_lib::logger;
use planner_lib::models::Draft;
use planner_lib::Session;

/// Compose campaign proposals and export them as Word documents.
#[derive(Parser)]
#[command(name = "planner", version, about)]
struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available templates.
    Templates,
    /// Export a draft file as a proposal document.
    Export {
        /// Draft JSON file.
        #[arg(long)]
        draft: PathBuf,
        /// Template to load into the draft before exporting.
        #[arg(long)]
        template: Option<String>,
        /// Output directory (defaults to the configured one).
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Edit a proposal interactively.
    Session {
        /// Draft JSON file to start from.
        #[arg(long)]
        draft: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("failed to load configuration")?;

    logger::init_logging(&config.log_level);
    info!("Planner starting");

    match cli.command {
        Command::Templates => handle_templates(config),
        Command::Export {
            draft,
            template,
            out,
        } => handle_export(config, &draft, template.as_deref(), out.as_deref()),
        Command::Session { draft } => handle_session(config, draft.as_deref()),
    }
}

fn read_draft(path: &Path) -> Result<Draft> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid draft file {}", path.display()))
}

fn handle_templates(config: Config) -> Result<()> {
    let session = Session::new(config);
    for name in session.templates().list_names() {
        println!("{}", name);
    }
    Ok(())
}

fn handle_export(
    config: Config,
    draft_path: &Path,
    template: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let draft = read_draft(draft_path)?;
    let mut session = Session::new(config).with_draft(draft);

    if let Some(name) = template {
        session
            .load_template(name)
            .with_context(|| format!("failed to load template {}", name))?;
    }

    let path = session.export_to(out).context("failed to export proposal")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_session(config: Config, draft_path: Option<&Path>) -> Result<()> {
    let mut session = Session::new(config);
    if let Some(path) = draft_path {
        session = session.with_draft(read_draft(path)?);
    }

    println!("Type 'help' for commands.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match handle_line(&mut session, &line) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Reply(reply)) if reply.is_empty() => {}
            Ok(Outcome::Reply(reply)) => println!("{}", reply),
            Err(e) => {
                warn!("Command failed: {}", e);
                println!("error: {}", e);
            }
        }
    }

    info!("Session ended");
    Ok(())
}
