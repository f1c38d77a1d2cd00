use std::io::Write as _;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, BookHubSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod render;
mod shell;

use shell::{execute, parse_line, Flow};

#[derive(Parser, Debug)]
#[command(about = "Browse and add books on a Book Hub backend")]
struct Args {
    /// Backend base address; overrides BOOK_HUB_BACKEND_URL.
    #[arg(long)]
    backend_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to read backend settings")?;
    if let Some(url) = args.backend_url.as_deref() {
        settings = settings
            .with_backend_url(url)
            .context("invalid --backend-url")?;
    }

    info!(backend_url = %settings.backend_url, "connecting to book hub backend");
    let session = BookHubSession::start(&settings).await;
    println!(
        "{}",
        render::catalog(
            &session.catalog().snapshot().await,
            session.banner().await.as_deref()
        )
    );
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                debug!(?command, "running shell command");
                match execute(&session, command).await {
                    Flow::Continue(output) => println!("{}", output.trim_end()),
                    Flow::Quit => break,
                }
            }
            Err(message) => println!("{}", message.trim_end()),
        }
    }

    Ok(())
}
