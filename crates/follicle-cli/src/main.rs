use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use follicle_cli::commands::{self, AnalyzeOptions};
use follicle_cli::config::{self, BACKEND_URL_ENV};

#[derive(Parser, Debug)]
#[command(
    name = "follicle",
    about = "Hair fall questionnaire and prediction client",
    version
)]
struct Cli {
    /// Prediction service base URL (overrides config and environment)
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the prediction service is reachable
    Health,
    /// Print the questionnaire
    Questions {
        /// Emit a blank answer sheet instead
        #[arg(long)]
        template: bool,
    },
    /// Score the stress scale from an answer sheet
    Score {
        #[arg(long)]
        answers: PathBuf,
    },
    /// Run an analysis against the prediction service
    Analyze(AnalyzeArgs),
    /// Show or edit the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Answer sheet JSON (see `questions --template`)
    #[arg(long)]
    answers: Option<PathBuf>,
    /// Medical report file (pdf, txt, png, jpg, jpeg; at most 16 MB)
    #[arg(long, conflicts_with = "text")]
    report: Option<PathBuf>,
    /// Text file with report contents to send as manual input
    #[arg(long)]
    text: Option<PathBuf>,
    /// Write the result JSON to this file, or into this directory
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print a readable summary instead of JSON
    #[arg(long)]
    summary: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Save the backend base URL
    SetUrl { url: String },
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let backend_url =
        config::backend_override(cli.backend_url, std::env::var(BACKEND_URL_ENV).ok());

    match cli.command {
        Command::Health => commands::health(client_config(backend_url.as_deref())?),
        Command::Questions { template } => commands::questions(template),
        Command::Score { answers } => commands::score(&answers),
        Command::Analyze(args) => commands::analyze(
            AnalyzeOptions {
                answers: args.answers,
                report: args.report,
                text: args.text,
                export: args.export,
                summary: args.summary,
            },
            client_config(backend_url.as_deref())?,
        ),
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::config_show(backend_url.as_deref()),
            ConfigCommand::SetUrl { url } => commands::config_set_url(&url),
            ConfigCommand::Init { force } => commands::config_init(force),
        },
    }
}

fn client_config(backend_url: Option<&str>) -> Result<follicle_predict::ClientConfig> {
    Ok(config::load_or_default()?.client_config(backend_url))
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
