//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use super::output::{Output, OutputFormat};
use super::session::{Flow, Session};
use crate::config::Config;

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "In-memory todo lists with categories, priorities and due dates")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to `default_format` from the global config)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project config file to use instead of the nearest .todo.toml
    #[arg(long, global = true, env = "TODO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session reading commands from stdin
    Shell,

    /// Run a file of session commands, stopping at the first error
    Run {
        /// Script path
        script: PathBuf,
    },

    /// Run each argument as one session command
    Exec {
        /// Commands, e.g. "add 'Buy milk' -p high" "list"
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Show the effective configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.global.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("todo starting");
    match &config.project_file {
        Some(path) => output.verbose_ctx("config", &format!("Using {}", path.display())),
        None => output.verbose_ctx("config", "No project config found, using defaults"),
    }

    match cli.command {
        Commands::Shell => Session::new(config.project, output.clone()).run_interactive()?,

        Commands::Run { script } => {
            Session::new(config.project, output.clone()).run_script(&script)?
        }

        Commands::Exec { commands } => {
            let mut session = Session::new(config.project, output.clone());
            for (index, command) in commands.iter().enumerate() {
                let flow = session.execute_line(command).map_err(|e| {
                    e.context(format!("command {}: {}", index + 1, command.trim()))
                })?;
                if flow == Flow::Exit {
                    break;
                }
            }
        }

        Commands::Config => show_config(&output, &config)?,
    }

    output.verbose("Session finished");
    Ok(())
}

fn show_config(output: &Output, config: &Config) -> Result<()> {
    let source = config
        .project_file
        .as_ref()
        .map(|p| p.display().to_string());

    if output.is_json() {
        output.data(&serde_json::json!({
            "project_file": source,
            "project": config.project,
            "global": config.global,
        }));
    } else {
        println!("Project config: {}", source.as_deref().unwrap_or("(defaults)"));
        println!("  upcoming_days = {}", config.project.upcoming_days);
        println!("  default_color = {}", config.project.default_color);
        println!("  date_format   = {}", config.project.date_format);
        println!(
            "Global config: {}",
            Config::global_config_dir()
                .map(|d| d.join("config.toml").display().to_string())
                .unwrap_or_else(|| "(unavailable)".to_string())
        );
        println!(
            "  default_format = {}",
            serde_json::to_value(config.global.default_format)?
                .as_str()
                .unwrap_or("text")
        );
    }
    Ok(())
}
