use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use reviewkit::config::StoreConfig;
use reviewkit::export::{backfill, merge, reviews, sample};
use reviewkit::store::MongoStore;

/// Reshape review data living in a document store
#[derive(Parser)]
#[command(name = "reviewkit")]
#[command(about = "reviewkit - One-off migrations for a review dataset", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// MongoDB connection string
    #[arg(long, global = true, default_value = "mongodb://localhost:29017")]
    uri: String,

    /// Database holding the review collections
    #[arg(long, global = true, default_value = "yelp")]
    database: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge each restaurant with the text of all its reviews
    #[command(name = "merge")]
    Merge {
        /// Collection of restaurants
        #[arg(long, default_value = "restaurants")]
        restaurants: String,

        /// Collection of reviews, joined on business_id
        #[arg(long, default_value = "review2")]
        reviews: String,

        /// File receiving one merged JSON record per line
        #[arg(short = 'o', long, default_value = "RestaurantReviews.json")]
        output: PathBuf,
    },

    /// Export business id and text for every review
    #[command(name = "reviews")]
    Reviews {
        /// Collection of reviews
        #[arg(long, default_value = "review2")]
        reviews: String,

        /// File receiving one JSON record per line
        #[arg(short = 'o', long, default_value = "BusinessReviews.json")]
        output: PathBuf,
    },

    /// Export the first N labeled reviews as a JSON array
    #[command(name = "sample")]
    Sample {
        /// Collection of reviews
        #[arg(long, default_value = "review2")]
        reviews: String,

        /// File receiving the JSON array
        #[arg(short = 'o', long, default_value = "TrainingReviews_2.json")]
        output: PathBuf,

        /// Number of samples to export
        #[arg(long)]
        size: u64,
    },

    /// Copy reviews into a new collection with sequence numbers
    #[command(name = "backfill")]
    Backfill {
        /// Collection to read reviews from
        #[arg(long, default_value = "review2")]
        source: String,

        /// Collection receiving the sequenced copies
        #[arg(long, default_value = "review_counter")]
        target: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("reviewkit started with verbosity level: {}", cli.verbose);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = StoreConfig {
        uri: cli.uri,
        database: cli.database,
    };
    let store = MongoStore::connect(&config)
        .await
        .context("Failed to connect to the document store")?;

    match cli.command {
        Commands::Merge {
            restaurants,
            reviews,
            output,
        } => {
            let mut out = create_output(&output)?;
            let params = merge::MergeParams {
                restaurants,
                reviews,
            };
            let count = merge::run(&store, &params, &mut out).await?;
            out.flush()?;
            println!("Wrote {} merged records to {}", count, output.display());
        }
        Commands::Reviews { reviews, output } => {
            let mut out = create_output(&output)?;
            let params = reviews::ReviewsParams { reviews };
            let count = reviews::run(&store, &params, &mut out).await?;
            out.flush()?;
            println!("Wrote {} review records to {}", count, output.display());
        }
        Commands::Sample {
            reviews,
            output,
            size,
        } => {
            let mut out = create_output(&output)?;
            let params = sample::SampleParams { reviews, size };
            let count = sample::run(&store, &params, &mut out).await?;
            out.flush()?;
            println!("Wrote {} training samples to {}", count, output.display());
        }
        Commands::Backfill { source, target } => {
            let params = backfill::BackfillParams { source, target };
            let count = backfill::run(&store, &params).await?;
            println!("Inserted {} sequenced records into {}", count, params.target);
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}
