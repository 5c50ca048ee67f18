use anyhow::{bail, Result};
use ferry::client::EngineRequest;
use ferry::{EngineClient, EngineTransport, GatewayConfig};
use std::path::Path;

/// Hit the engine root endpoint and report its banner
pub async fn run_ping(config_path: &str) -> Result<()> {
    let config = GatewayConfig::load_or_create(Path::new(config_path))?;
    let client = EngineClient::new(&config.engine)?;

    match client.execute(EngineRequest::get("/")).await {
        Ok(response) if response.status == 200 => {
            println!("{}", response.body);
            Ok(())
        }
        Ok(response) => bail!(
            "engine at {} answered with status {}",
            config.engine.base_url,
            response.status
        ),
        Err(err) => bail!("engine at {} unreachable: {err}", config.engine.base_url),
    }
}
