// Exchange and workspace command implementations
use chrono::{TimeZone, Utc};
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use trading_bot::retry::RetryPolicy;
use trading_bot::{Config, ExchangeClient, MockExchange, TradingError, TradingResult};

pub fn init_workspace(config_path: &str, force: bool) -> TradingResult<()> {
    info!("🔧 Initializing workspace...");

    let config = if Path::new(config_path).exists() && !force {
        warn!("⚠️  {} already exists, skipping (use --force to overwrite)", config_path);
        Config::from_file(config_path)?
    } else {
        let config = Config::default();
        config.to_file(config_path)?;
        info!("📝 Created {}", config_path);
        config
    };

    fs::create_dir_all(&config.logging.log_directory).map_err(|e| {
        TradingError::DirectoryCreate(format!("{}: {}", config.logging.log_directory, e))
    })?;

    info!("✅ Workspace initialized successfully!");
    info!("💡 Next steps:");
    info!("   1. Run: trading-bot serve");
    info!("   2. Run: trading-bot order --remote --symbol BTCUSDT --side BUY --type MARKET --quantity 0.01");
    Ok(())
}

pub async fn serve(config: &Config) -> TradingResult<()> {
    MockExchange::from_config(config)
        .run(&config.server.bind_address())
        .await
}

pub async fn show_time(config: &Config) -> TradingResult<()> {
    let client = ExchangeClient::new(&config.exchange)?;
    let server_time = RetryPolicy::default()
        .execute(|| client.server_time())
        .await?;

    let local = Utc::now().timestamp_millis();
    match Utc.timestamp_millis_opt(server_time).single() {
        Some(time) => println!("Server time: {} ({})", server_time, time.to_rfc3339()),
        None => println!("Server time: {}", server_time),
    }
    info!("Clock offset vs local: {} ms", server_time - local);
    Ok(())
}
