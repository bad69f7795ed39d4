//! tgfeed CLI
//!
//! Crawls public channel feeds and emits one JSON record per logical post.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tgfeed::{
    error::Result,
    metrics::PostCounter,
    models::{ChannelList, Config},
    pipeline,
    storage::{ConsoleSink, JsonlSink, PostSink},
};

/// tgfeed - Telegram channel feed crawler
#[derive(Parser, Debug)]
#[command(name = "tgfeed", version, about = "Telegram channel feed crawler")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the configured channels into post records
    Crawl {
        /// Channel names to crawl instead of the configured list file
        channels: Vec<String>,

        /// Path to the channel list file (default: from config)
        #[arg(long)]
        channels_file: Option<PathBuf>,

        /// Posts to fetch per channel (default: from config)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output JSONL file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Crawl {
            channels,
            channels_file,
            limit,
            output,
        } => {
            if let Some(limit) = limit {
                config.crawler.posts_per_channel = limit;
            }
            if let Some(path) = channels_file {
                config.paths.channels_file = path.display().to_string();
            }
            if let Some(path) = output {
                config.paths.output_file = Some(path.display().to_string());
            }
            config.validate()?;

            let channel_list = if channels.is_empty() {
                ChannelList::load(&config.paths.channels_file)?
            } else {
                ChannelList::from_names(channels)
            };
            if channel_list.is_empty() {
                log::warn!("channel list is empty, nothing to crawl");
                return Ok(());
            }

            let mut sink: Box<dyn PostSink> = match &config.paths.output_file {
                Some(path) => Box::new(JsonlSink::open(path).await?),
                None => Box::new(ConsoleSink),
            };

            let counter = PostCounter::new();
            pipeline::run_crawler(&config, &channel_list, sink.as_mut(), &counter).await?;
        }

        Command::Validate => {
            config.validate()?;
            log::info!("configuration OK");
        }
    }

    Ok(())
}
