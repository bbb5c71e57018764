mod ingest;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "newsdesk-cli")]
#[command(about = "Newsdesk RSS ingestion and enrichment pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the ingestion pipeline over the configured feeds
    Ingest {
        /// Restrict ingestion to a single feed (by name)
        #[arg(long)]
        feed: Option<String>,

        /// Preview which feeds would be ingested without fetching or writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Inspect the configured feed map
    Feeds {
        #[command(subcommand)]
        command: FeedsCommands,
    },
    /// Database maintenance helpers
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Show recent ingestion runs
    Runs {
        /// Maximum number of runs to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
}

#[derive(Debug, Subcommand)]
enum FeedsCommands {
    /// Validate and print config/feeds.yaml
    List,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("no command given; try `newsdesk-cli ingest` or `newsdesk-cli --help`");
        return Ok(());
    };

    let config = newsdesk_core::load_app_config()?;

    match command {
        Commands::Ingest { feed, dry_run } => {
            let pool = connect(&config).await?;
            ingest::run_ingest(&pool, &config, feed.as_deref(), dry_run).await
        }
        Commands::Feeds {
            command: FeedsCommands::List,
        } => {
            let feeds_file = newsdesk_core::load_feeds(&config.feeds_path)?;
            for feed in &feeds_file.feeds {
                println!("{:<14} {}", feed.name, feed.url);
            }
            Ok(())
        }
        Commands::Db { command } => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    newsdesk_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = newsdesk_db::run_migrations(&pool).await?;
                    println!("applied {applied} migrations");
                }
            }
            Ok(())
        }
        Commands::Runs { limit } => {
            let pool = connect(&config).await?;
            let runs = newsdesk_db::list_ingest_runs(&pool, limit.clamp(1, 200)).await?;
            for run in runs {
                println!(
                    "{} {:<9} feeds {}/{} entries {} actors {} {}",
                    run.public_id,
                    run.status,
                    run.feeds_total - run.feeds_failed,
                    run.feeds_total,
                    run.entries_ingested,
                    run.actor_rows,
                    run.error_message.as_deref().unwrap_or(""),
                );
            }
            Ok(())
        }
    }
}

async fn connect(config: &newsdesk_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = newsdesk_db::PoolConfig::from_app_config(config);
    let pool = newsdesk_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

/// Marks a run as failed, logging (not propagating) any bookkeeping error so
/// the original failure stays the one reported to the user.
async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: String) {
    if let Err(error) = newsdesk_db::fail_ingest_run(pool, run_id, &message).await {
        tracing::error!(run_id, %error, "failed to record ingest run failure");
    }
}
