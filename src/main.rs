use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use reltime::app;
use reltime::display::TimeNode;
use reltime::util::clock::SystemClock;
use reltime::util::config::AppConfig;
use reltime::util::instant::Instant;

#[derive(Parser, Debug)]
#[command(name = "reltime", version, about = "Self-refreshing relative timestamps")]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging to file
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal demo (default)
    Demo,
    /// Render a single time node once and exit
    Render {
        /// ISO-8601 timestamp or epoch milliseconds
        when: String,
        /// Render against this time instead of the current clock
        #[arg(long)]
        now: Option<String>,
        /// Print the node as JSON instead of markup
        #[arg(long)]
        json: bool,
    },
    /// Print the relative time each time it changes
    Watch {
        /// ISO-8601 timestamp or epoch milliseconds
        when: String,
        /// Text to show until the first scheduled refresh
        #[arg(long)]
        initial_text: Option<String>,
        /// Exit after this many visible changes
        #[arg(long)]
        max_updates: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    // Setup logging
    let _guard = setup_logging(&config, cli.debug)?;

    info!("reltime starting");

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let selected = match config.demo.initial_time.as_deref() {
                Some(s) => Instant::parse(s).context("Invalid demo.initial_time in config")?,
                None => Instant::now(),
            };
            app::event_loop::run(config, selected).await
        }
        Command::Render { when, now, json } => {
            let instant = Instant::parse_loose(&when)?;
            let now = match now {
                Some(s) => Instant::parse_loose(&s)?.as_datetime(),
                None => Utc::now(),
            };
            let node = TimeNode::render(&instant, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&node)?);
            } else {
                println!("{}", node.to_markup());
            }
            Ok(())
        }
        Command::Watch {
            when,
            initial_text,
            max_updates,
        } => {
            let instant = Instant::parse_loose(&when)?;
            let mut stdout = std::io::stdout();
            app::watch::run(instant, initial_text, max_updates, &SystemClock, &mut stdout).await
        }
    }
}

fn setup_logging(
    config: &AppConfig,
    debug: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    if !debug {
        return Ok(None);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "reltime.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter("reltime=debug")
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
