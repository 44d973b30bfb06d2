use clap::Parser;
use stem_cli::cli::EventsCli;
use stem_cli::{events, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error listing events: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = EventsCli::parse();
    logging::init_tracing(cli.log)?;
    events::run(&cli).await
}
