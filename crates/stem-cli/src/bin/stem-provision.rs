use clap::Parser;
use stem_cli::cli::ProvisionCli;
use stem_cli::{logging, provision};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("stem-provision error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = ProvisionCli::parse();
    logging::init_tracing(cli.log)?;
    provision::run(&cli).await
}
