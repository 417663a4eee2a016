//! Intervention statistics command-line tool.
//!
//! Loads interventions from the configured repository and prints statistics as
//! pretty JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Statistics over a JSON export
//! intervention-stats --data data/interventions.json stats --team equipe1
//!
//! # A technician's dashboard as of a given day
//! intervention-stats dashboard --user 3 --today 2025-03-20
//! ```
//!
//! # Environment Variables
//!
//! - `INTERVENTION_STATS_CONFIG`: Configuration file (default: search for `intervention-stats.toml`)
//! - `INTERVENTION_STATS_DATA`: JSON dataset, overrides `repository.data_path`
//! - `INTERVENTION_STATS_INVERTED_RANGE`: `reject`, `clamp` or `wrap`
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use intervention_stats::api::{StatisticsData, StatisticsFilter, SubmissionStatus, UserId};
use intervention_stats::config::AppConfig;
use intervention_stats::db::{services, RepositoryFactory};
use intervention_stats::services::{display_labels, DisplayLabels, StatisticsAggregator};

/// Maintenance intervention statistics
#[derive(Parser, Debug)]
#[command(name = "intervention-stats", version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, env = "INTERVENTION_STATS_CONFIG")]
    config: Option<PathBuf>,

    /// JSON dataset to load (overrides the configuration)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Add display labels next to maintenance type and month keys
    #[arg(long, global = true)]
    labels: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Administrator statistics
    Stats(FilterArgs),

    /// Technician dashboard counters
    Dashboard {
        /// Technician id
        #[arg(long)]
        user: i64,

        /// Reference day for "this month" (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    #[arg(long)]
    team: Option<String>,

    #[arg(long)]
    section: Option<String>,

    /// Maintenance type (cooperative, preventive, corrective, urgent, ...)
    #[arg(long = "type")]
    maintenance_type: Option<String>,

    /// Case-insensitive text searched in reference, post, team, section and type
    #[arg(long)]
    search: Option<String>,

    /// all, sent or saved
    #[arg(long)]
    submission: Option<SubmissionStatus>,

    #[arg(long)]
    validated: Option<bool>,

    /// Only interventions created by this technician
    #[arg(long)]
    user: Option<i64>,
}

impl FilterArgs {
    fn into_filter(self) -> StatisticsFilter {
        StatisticsFilter {
            date_from: self.from,
            date_to: self.to,
            team: self.team,
            section: self.section,
            maintenance_type: self.maintenance_type,
            search: self.search,
            submission: self.submission,
            validated: self.validated,
            user_id: self.user.map(UserId::new),
        }
    }
}

#[derive(Serialize)]
struct LabelledStatistics {
    #[serde(flatten)]
    statistics: StatisticsData,
    labels: DisplayLabels,
}

fn init_logging() {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.repository.data_path = Some(data);
    }

    let repository = RepositoryFactory::from_config(&config).context("Failed to open repository")?;
    if !services::health_check(repository.as_ref()).await? {
        bail!("Repository is not healthy");
    }
    info!("Repository initialized successfully");

    let aggregator = StatisticsAggregator::new(config.aggregator_config());

    let output = match cli.command {
        Command::Stats(args) => {
            let filter = args.into_filter();
            let statistics = services::get_statistics(repository.as_ref(), &aggregator, &filter)
                .await
                .context("Failed to compute statistics")?;
            if cli.labels {
                serde_json::to_value(LabelledStatistics {
                    labels: display_labels(&statistics),
                    statistics,
                })?
            } else {
                serde_json::to_value(statistics)?
            }
        }
        Command::Dashboard { user, today } => {
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let dashboard = services::get_user_dashboard(
                repository.as_ref(),
                &aggregator,
                UserId::new(user),
                &StatisticsFilter::default(),
                today,
            )
            .await
            .context("Failed to compute dashboard")?;
            serde_json::to_value(dashboard)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
