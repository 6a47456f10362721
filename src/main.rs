use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_channel_grouper::{
    config::Config,
    errors::AppResult,
    grouping::ChannelGroupingOrchestrator,
    models::{NormalizationOptions, RawStream, TimezonePreference},
    services::InMemoryChannelApi,
};

#[derive(Parser)]
#[command(name = "m3u-channel-grouper")]
#[command(version)]
#[command(about = "Normalize IPTV stream names and group them into channels")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (overrides config file)
    #[arg(short = 'v', long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical key and quality score of each name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        overrides: OptionOverrides,
    },
    /// Show how a stream list would be grouped, without creating anything
    Preview {
        /// JSON file containing an array of streams
        #[arg(short, long)]
        streams: String,

        #[command(flatten)]
        overrides: OptionOverrides,
    },
    /// Dry-run bulk channel creation against an in-memory channel API
    Import {
        /// JSON file containing an array of streams
        #[arg(short, long)]
        streams: String,

        #[arg(short = 'n', long)]
        starting_number: Option<u32>,

        #[arg(short, long)]
        group_id: Option<i64>,

        #[command(flatten)]
        overrides: OptionOverrides,
    },
}

/// Command line overrides of the `[normalization]` section
#[derive(Args)]
struct OptionOverrides {
    /// east, west or both
    #[arg(long, value_parser = parse_timezone)]
    timezone: Option<TimezonePreference>,

    #[arg(long)]
    strip_country: bool,

    #[arg(long)]
    keep_country: bool,

    /// Strip built-in network prefixes and suffixes
    #[arg(long)]
    strip_network: bool,
}

impl OptionOverrides {
    fn apply(&self, mut options: NormalizationOptions) -> NormalizationOptions {
        if let Some(timezone) = self.timezone {
            options.timezone_preference = timezone;
        }
        options.strip_country_prefix |= self.strip_country;
        options.keep_country_prefix |= self.keep_country;
        options.strip_network_prefix |= self.strip_network;
        options.strip_network_suffix |= self.strip_network;
        options
    }
}

fn parse_timezone(value: &str) -> Result<TimezonePreference, String> {
    match value.to_ascii_lowercase().as_str() {
        "east" => Ok(TimezonePreference::East),
        "west" => Ok(TimezonePreference::West),
        "both" => Ok(TimezonePreference::Both),
        other => Err(format!("unknown timezone preference '{}'", other)),
    }
}

fn read_streams(path: &str) -> AppResult<Vec<RawStream>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config))?;

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("m3u_channel_grouper={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("M3U Channel Grouper v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", cli.config);

    let normalizer = Arc::new(config.build_normalizer()?);

    match cli.command {
        Command::Normalize { names, overrides } => {
            let options = overrides.apply(config.normalization.clone());
            let pipeline = normalizer.compile(&options)?;
            for name in names {
                println!(
                    "{}\t{}\t{}",
                    normalizer.score_quality(&name),
                    pipeline.normalize(&name),
                    name.trim()
                );
            }
        }
        Command::Preview { streams, overrides } => {
            let streams = read_streams(&streams)?;
            let options = overrides.apply(config.normalization.clone());
            let orchestrator = ChannelGroupingOrchestrator::with_normalizer(
                Arc::new(InMemoryChannelApi::new()),
                normalizer,
            );
            let preview = orchestrator.preview_groups(&streams, &options)?;
            info!(
                "{} streams -> {} channels ({} merged)",
                preview.filtered_count,
                preview.groups.len(),
                preview.merged_count
            );
            println!("{}", serde_json::to_string_pretty(&preview)?);
        }
        Command::Import {
            streams,
            starting_number,
            group_id,
            overrides,
        } => {
            let streams = read_streams(&streams)?;
            let mut options = config.bulk_options();
            options.normalization = overrides.apply(options.normalization);
            let starting_number = starting_number.unwrap_or(config.import.starting_number);
            let group_id = group_id.or(config.import.channel_group_id);

            let api = Arc::new(InMemoryChannelApi::new());
            let orchestrator = ChannelGroupingOrchestrator::with_normalizer(api, normalizer);
            let outcome = orchestrator
                .bulk_create_channels(&streams, starting_number, group_id, &options)
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if outcome.created.is_empty() && outcome.has_errors() {
                bail!("No channels created ({} errors)", outcome.errors.len());
            }
        }
    }

    Ok(())
}
