#![warn(clippy::all)]

use clap::Parser;
use tracing_subscriber::fmt::format::FmtSpan;

use trivia::config::{Config, Overrides};
use trivia::server;
use trivia::store::Store;

/// Serves the trivia API
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(flatten)]
    overrides: Overrides,
}

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let args = Args::parse();
    let config = Config::load(&args.overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        // Record an event when each span closes.
        // This shows how long the route handlers took.
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = if config.seed {
        Store::seeded()?
    } else {
        Store::default()
    };
    let addr = config.socket_addr()?;

    tracing::info!(
        "Trivia API listening on {}, {} questions loaded",
        addr,
        store.count_questions().await
    );
    warp::serve(server::routes(store)).run(addr).await;

    Ok(())
}
