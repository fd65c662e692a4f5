use anyhow::Result;
use ticket_router::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run_cli().await
}
