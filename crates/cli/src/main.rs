//! Disease Outbreak Predictor CLI
//!
//! A command-line front end for the prediction server: list tasks, inspect
//! their input fields and submit values for a verdict.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{predict, status, tasks};

/// Disease Outbreak Predictor CLI
#[derive(Parser)]
#[command(name = "outbreak")]
#[command(author, version, about = "CLI for the Disease Outbreak Predictor", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via OUTBREAK_API_URL env var)
    #[arg(long, env = "OUTBREAK_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Prediction task
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaskArg {
    Diabetes,
    HeartDisease,
    Parkinsons,
}

impl TaskArg {
    /// Identifier used by the server API
    fn slug(self) -> &'static str {
        match self {
            TaskArg::Diabetes => "diabetes",
            TaskArg::HeartDisease => "heart_disease",
            TaskArg::Parkinsons => "parkinsons",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available prediction tasks
    Tasks,

    /// Show the ordered input fields of a task
    Schema {
        /// Task to describe
        task: TaskArg,
    },

    /// Submit values and get a verdict
    Predict {
        /// Task to run
        task: TaskArg,

        /// Field values in schema order; prompts for each field when omitted
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },

    /// Show server health and readiness
    Status,
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;
    let format = config.resolve_format(cli.format);
    let client = client::ApiClient::new(&config.resolve_api_url(cli.api_url))?;

    match cli.command {
        Commands::Tasks => tasks::list_tasks(&client, format).await,
        Commands::Schema { task } => tasks::show_schema(&client, task.slug(), format).await,
        Commands::Predict { task, values } => {
            predict::run_prediction(&client, task.slug(), values, format).await
        }
        Commands::Status => status::show_status(&client, format).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Result and error are mutually exclusive: exactly one line reports the outcome
    if let Err(e) = run(cli).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
