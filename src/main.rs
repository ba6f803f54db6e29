use clap::Parser;

use itemdesk::cli::{self, Cli};
use itemdesk::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli::run(cli).await
}
