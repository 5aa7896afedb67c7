use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use peerbench_core::IndustryDefaults;
use peerbench_db::PgMetricsStore;
use peerbench_engine::{BenchmarkResolver, Segment};

#[derive(Debug, Parser)]
#[command(name = "peerbench")]
#[command(about = "Peer benchmark and scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a full analysis for one stored profile and print the JSON report.
    Analyze {
        /// Internal ID of the subject profile.
        #[arg(long)]
        profile_id: i64,
        /// Industry the peer population shares.
        #[arg(long)]
        industry: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Verify database connectivity.
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = peerbench_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = peerbench_db::PoolConfig::from_app_config(&config);
    let pool = peerbench_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Analyze {
            profile_id,
            industry,
            city,
            state,
            country,
        } => {
            let defaults = match &config.defaults_path {
                Some(path) => IndustryDefaults::load(path)?,
                None => IndustryDefaults::builtin(),
            };
            let resolver = BenchmarkResolver::new(defaults);
            let store = PgMetricsStore::new(pool);
            let segment = Segment {
                industry,
                city,
                state,
                country,
            };

            let report =
                peerbench_engine::analyze(&store, &resolver, profile_id, &segment, Utc::now())
                    .await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Ping => {
            peerbench_db::health_check(&pool).await?;
            println!("database ok");
        }
    }

    Ok(())
}
