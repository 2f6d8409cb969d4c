use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use fieldcri::CriKind;

mod cli;

#[derive(Parser)]
#[command(name = "fieldcri")]
#[command(about = "Intervention reports and dashboard for field technicians")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.fieldcri/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for a period
    Dashboard {
        /// day, week, month, quarter or year (defaults to the configured period)
        #[arg(short, long)]
        period: Option<String>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage intervention reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Rebuild the stats index from the report list
    Reindex,
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Validate and save a report from a JSON file of form fields
    New {
        /// projet or service
        #[arg(long)]
        kind: CriKind,

        /// JSON object with the form fields
        #[arg(long)]
        file: PathBuf,
    },

    /// List saved reports, newest first
    List {
        /// Only show this kind
        #[arg(long)]
        kind: Option<CriKind>,
    },

    /// Print one report as JSON
    Show { id: String },

    /// Delete a report
    Delete { id: String },

    /// Show the number the next report of a kind would get today
    Number {
        #[arg(long)]
        kind: CriKind,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Init { force } = cli.command {
        return cli::init::init_command(cli.config, force);
    }

    let ctx = cli::AppContext::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Dashboard { period, json } => {
            cli::dashboard::dashboard_command(&ctx, period, json).await?;
        }
        Commands::Report { command } => match command {
            ReportCommands::New { kind, file } => cli::report::new_command(&ctx, kind, &file)?,
            ReportCommands::List { kind } => cli::report::list_command(&ctx, kind)?,
            ReportCommands::Show { id } => cli::report::show_command(&ctx, &id)?,
            ReportCommands::Delete { id } => cli::report::delete_command(&ctx, &id)?,
            ReportCommands::Number { kind } => cli::report::number_command(&ctx, kind)?,
        },
        Commands::Reindex => cli::reindex::reindex_command(&ctx)?,
        Commands::Init { .. } => {}
    }

    Ok(())
}
