//! Daily Concept - glossary concept of the day
//!
//! Serves one glossary concept per day without repeats, plus a searchable library.

use daily_concept::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (INFO for this crate by default, override with RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("daily_concept=info".parse()?)
        )
        .init();

    cli::run().await
}
