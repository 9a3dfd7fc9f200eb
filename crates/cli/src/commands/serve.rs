//! `lappybot serve`: start the HTTP API server.

use std::path::PathBuf;

pub async fn run(
    catalog: Option<PathBuf>,
    port_override: Option<u16>,
    host_override: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(catalog)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if let Some(host) = host_override {
        config.gateway.host = host;
    }

    println!("💻 LappyBot Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Catalog:   {}", config.catalog.path.display());
    if !config.has_api_key() {
        println!("   ⚠️  No API key configured, chat replies will be apologies");
    }

    lappybot_gateway::start(config).await?;

    Ok(())
}
