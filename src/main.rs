use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use snail::banner::Banner;
use snail::config::Config;
use snail::shutdown::{announce_shutdown, ExitOutcome, TerminationFlag};
use snail::ui::runtime;
use snail::ui::terminal_guard::setup_terminal;
use snail::webhook::server::WebhookServer;

#[derive(Parser)]
#[command(name = "snail", version, about = "A harmless process that just waits to be killed")]
struct Cli {
    /// Path to an alternate config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scroll the banner until cancelled locally or killed (default).
    Crawl,
    /// Run the webhook listener.
    Webhook,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let command = cli.command.unwrap_or(Command::Crawl);
    init_tracing(&command);

    match command {
        Command::Crawl => crawl(&config),
        Command::Webhook => webhook(&config),
    }
}

/// Diagnostics stay quiet in crawl mode so nothing writes into the
/// alternate screen; `RUST_LOG` overrides either default.
fn init_tracing(command: &Command) {
    let default_directive = match command {
        Command::Crawl => "error",
        Command::Webhook => "info",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn crawl(config: &Config) -> anyhow::Result<()> {
    let banner = Banner::standard(config.snail.color());

    // Termination handling is installed once, explicitly, before the
    // terminal is taken over.
    let termination = TerminationFlag::register().context("failed to install SIGTERM handler")?;
    let (mut terminal, guard) = setup_terminal().context("failed to prepare terminal")?;

    let outcome = runtime::run(
        &mut terminal,
        &banner,
        config.snail.frame_interval(),
        &termination,
    )?;

    // Restore the screen before the farewell so it stays readable.
    drop(guard);
    let grace = match outcome {
        ExitOutcome::TerminatedBySignal => config.snail.grace_period(),
        ExitOutcome::UserInterrupt => Duration::ZERO,
    };
    announce_shutdown(&mut io::stdout(), outcome, grace)?;
    Ok(())
}

fn webhook(config: &Config) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    rt.block_on(async {
        let mut server = WebhookServer::new(&config.webhook)?;
        server.try_bind().await?;
        server.run().await?;
        Ok(())
    })
}
