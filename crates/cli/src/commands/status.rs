//! `leetmentor status` — Show configuration status.

use leetmentor_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("🦀 LeetMentor Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Model:        {}", config.model);
    println!("  Temperature:  {}", config.temperature);
    println!("  Max tokens:   {}", config.max_tokens);
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "  API key:      {}",
        if config.has_api_key() {
            "configured"
        } else {
            "missing"
        }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `leetmentor onboard` first");
    }

    Ok(())
}
