//! Safe Swim CLI - builds and inspects the map's GeoJSON dataset.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "swim-cli",
    version,
    about = "California Safe Swim dataset toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: swim_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    swim_cmd::run(cli.command).await
}
