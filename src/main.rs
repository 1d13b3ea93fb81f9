use anyhow::Result;

mod aggregator;
mod config;
mod property_client;
mod sanitize;
mod server;
mod stats;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    log::info!("Property dashboard aggregator starting");

    let settings = config::Settings::load()?;
    server::run(settings).await?;

    log::info!("Property dashboard aggregator stopped");
    Ok(())
}
