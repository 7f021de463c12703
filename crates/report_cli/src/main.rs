mod client;
mod commands;
mod config;

use clap::{Parser, Subcommand};
use client::LeadSourceClient;
use commands::FilterArgs;
use contracts::dashboards::d400_lead_report::source::request_url;
use contracts::dashboards::d400_lead_report::RecordStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Lead report over the sheet data source")]
struct Cli {
    /// Data source endpoint, overrides config.toml
    #[arg(long, global = true)]
    url: Option<String>,
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Status counts and branch distribution
    Summary {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Status -> branch -> sector drill-down
    Drill {
        /// "Total", "Interested", "Follow-up", "Not Interested", ...
        status: String,
        /// Branch row to open
        into_branch: Option<String>,
        /// Sector row to open (requires a branch)
        into_sector: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Write the filtered leads to a CSV file
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let settings = config::load_settings(cli.config.as_deref())?;
    let url = match &cli.url {
        Some(base) => request_url(base, &settings.data_source.action),
        None => settings.request_url(),
    };
    let dates = settings.date_reader();

    let client = LeadSourceClient::new(url)?;
    tracing::info!("Fetching leads from {}", client.url());
    let records = client.fetch_leads().await?;
    let store = RecordStore::new(records);
    tracing::info!(
        "Loaded {} lead records (status field: {})",
        store.len(),
        store.schema().status_key()
    );

    match &cli.command {
        Commands::Summary { filters } => {
            print!("{}", commands::summary(&store, &filters.selection()?, &dates));
        }
        Commands::Drill {
            status,
            into_branch,
            into_sector,
            filters,
        } => {
            let report = commands::drill(
                &store,
                &filters.selection()?,
                &dates,
                status,
                into_branch.as_deref(),
                into_sector.as_deref(),
            )?;
            print!("{}", report);
        }
        Commands::Export { out_dir, filters } => {
            match commands::export(
                &store,
                &filters.selection()?,
                &dates,
                &settings.export.file_prefix,
                out_dir,
            )? {
                Some(path) => println!("{}", path.display()),
                None => tracing::warn!("Nothing to export: no leads match the filters"),
            }
        }
    }

    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("lead-report.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}
