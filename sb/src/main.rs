use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use sharebridge::cli::{Cli, Command};
use sharebridge::config::Config;
use sharebridge::replay::{self, StepResult};
use sharebridge::timestamp;
use sharebridge::{ShareBridge, ShareConsumer, ShareNotification};

/// Log to stderr at INFO unless `RUST_LOG` says otherwise
fn setup_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .context("Invalid RUST_LOG filter")?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

/// Consumer that writes each push to stdout as a JSON line
struct StdoutConsumer;

impl ShareConsumer for StdoutConsumer {
    fn notify(&self, notification: &ShareNotification) {
        match serde_json::to_string(notification) {
            Ok(line) => println!("{} {}", "push".green(), line),
            Err(e) => eprintln!("{} failed to encode notification: {}", "✗".red(), e),
        }
    }
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("sharebridge starting");

    match cli.command {
        Command::Replay { script } => {
            let steps = replay::load_script(&script)?;
            let bridge = ShareBridge::from_config(&config);
            let report = replay::run_script(&bridge, &steps, || StdoutConsumer);

            for result in &report.results {
                if let StepResult::Pulled(pending) = result {
                    match pending {
                        Some(text) => println!("{} {:?}", "pull".cyan(), text),
                        None => println!("{} {}", "pull".cyan(), "(empty)".dimmed()),
                    }
                }
            }

            let stats = bridge.stats();
            println!(
                "{} {} steps, {} accepted, {} ignored, {} pushed, {} replayed",
                "✓".green(),
                report.results.len(),
                stats.accepted,
                stats.ignored,
                stats.pushed,
                stats.replays
            );
        }
        Command::Parse { text } => match timestamp::parse_shared_text(&text) {
            Ok(link) => {
                println!("{} {} at {}", "✓".green(), link.video_id.cyan(), link.formatted_time);
                println!("{}", link.canonical_watch_url);
            }
            Err(e) => {
                println!("{} {}: {}", "✗".red(), e.code().yellow(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
