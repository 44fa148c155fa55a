//! `wheelhouse`: terminal front end for the shop API.
//!
//! Loads configuration from the environment (and `.env`), then prints
//! transaction views, transaction details, the whiteboard summary, or
//! drives a retrospec bike's workflow.

mod commands;
mod sink;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wheelhouse_client::{ApiClient, ClientConfig, QueryCache, Repository, WorkflowService};
use wheelhouse_core::models::StepName;
use wheelhouse_core::types::DbId;

use sink::ConfiguredSink;

#[derive(Parser)]
#[command(name = "wheelhouse")]
#[command(about = "Bike shop point-of-sale client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the transactions in a whiteboard view
    Transactions {
        /// View name: main, retrospec, pickup, paid, completed, employee,
        /// refurb or "beer bike"
        #[arg(long, default_value = "main")]
        view: String,

        /// Search text (completed view only)
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show one transaction with its lines and totals
    Transaction {
        /// Transaction number
        num: DbId,
    },

    /// Print the whiteboard header counts
    Summary,

    /// Inspect or change a retrospec bike's workflow
    Workflow {
        /// Transaction number
        num: DbId,

        /// Netid of the user performing the action
        #[arg(long)]
        user: String,

        #[command(subcommand)]
        action: WorkflowAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum WorkflowAction {
    /// Print the steps and the current one
    Show,
    /// Create the workflow
    Init,
    /// Delete and recreate the workflow (admin)
    Reinit,
    /// Delete the workflow (admin)
    Reset,
    /// Complete a step: BikeSpec, Build, Creation or Checkout
    Complete {
        step: StepName,

        /// Note appended to the notification
        #[arg(long)]
        note: Option<String>,
    },
    /// Revert a completed step
    Uncomplete { step: StepName },
}

fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "wheelhouse=debug,wheelhouse_client=debug"
    } else {
        "wheelhouse=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ClientConfig::from_env();
    init_tracing(config.debug);
    tracing::debug!(api_url = %config.api_url, "Loaded client configuration");

    let cli = Cli::parse();

    // --- Data access ---
    let api = ApiClient::from_config(&config)?;
    let cache = Arc::new(QueryCache::new(config.stale_window()));
    let repo = Repository::new(api.clone(), Arc::clone(&cache));

    match cli.command {
        Commands::Transactions { view, search } => {
            commands::transactions(&repo, &view, &search).await?;
        }
        Commands::Transaction { num } => commands::transaction(&repo, num).await?,
        Commands::Summary => commands::summary(&repo).await?,
        Commands::Workflow { num, user, action } => {
            let actor = api.fetch_user(&user).await?;
            let sink = Arc::new(ConfiguredSink::from_config(&config)?);
            let service = WorkflowService::new(api, sink).with_cache(cache);
            commands::workflow(&service, num, &actor, action).await?;
        }
    }

    Ok(())
}
