use anyhow::{bail, Result};
use ferry::{EngineClient, GatewayConfig, Provisioner};
use std::path::Path;
use std::sync::Arc;

/// Create the default template, then the index it applies to
pub async fn run_init(config_path: &str) -> Result<()> {
    let config = GatewayConfig::load_or_create(Path::new(config_path))?;
    tracing::info!(
        "Provisioning '{}' on {}",
        config.engine.index,
        config.engine.base_url
    );

    let transport: Arc<dyn ferry::EngineTransport> = Arc::new(EngineClient::new(&config.engine)?);
    let report = Provisioner::new(transport, &config).run().await;

    println!("template: {}", serde_json::to_string_pretty(&report.template)?);
    println!("index: {}", serde_json::to_string_pretty(&report.index)?);

    if !report.template.is_ok() || !report.index.is_ok() {
        bail!("provisioning failed");
    }
    println!("Provisioning complete.");
    Ok(())
}
