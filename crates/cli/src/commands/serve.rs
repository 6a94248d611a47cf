//! `leetmentor serve` — Start the HTTP API server.

use leetmentor_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    if !config.has_api_key() {
        return Err(
            "No API key configured — set LEETMENTOR_API_KEY or run `leetmentor onboard`".into(),
        );
    }

    println!("🦀 LeetMentor Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model:     {}", config.model);

    leetmentor_gateway::start(config).await?;

    Ok(())
}
