mod analyzer;
mod config;
mod loader;
mod model;
mod normalizer;
mod notifier;
mod parser;
mod pipeline;
mod utils;

use chrono::Local;
use config::{load_config, AppConfig};
use loader::YahooLoader;
use notifier::{LogNotifier, Notifier, TelegramNotifier};
use pipeline::process_symbol;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("😱 Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting SMA crossover check for {} ({}D / {}D)...",
        config.symbol, config.short_window, config.long_window
    );

    let loader = match YahooLoader::new(&config.provider) {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to initialize series loader: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let notifier = match build_notifier(&config) {
        Ok(n) => n,
        Err(e) => {
            error!("Failed to initialize notifier: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let today = Local::now().date_naive();
    let code = match process_symbol(&config, &loader, notifier.as_ref(), today).await {
        Ok(outcome) => {
            if let Some(alert) = &outcome.alert {
                info!(
                    "Alert: {} close {:.2}, SMA{} {:.2}, SMA{} {:.2}",
                    alert.symbol,
                    alert.close,
                    alert.short_window,
                    alert.short_sma,
                    alert.long_window,
                    alert.long_sma
                );
            }
            info!("Finished: {:?} (notified: {})", outcome.state, outcome.notified);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Crossover check for {} failed: {}", config.symbol, e);
            ExitCode::FAILURE
        }
    };

    info!("Program finished.");
    code
}

/// Telegram when configured, otherwise alerts only go to the log.
fn build_notifier(config: &AppConfig) -> Result<Box<dyn Notifier>, Box<dyn std::error::Error>> {
    match &config.telegram {
        Some(telegram) => {
            let token = telegram.resolve_token(|var| std::env::var(var).ok())?;
            let notifier = TelegramNotifier::new(token, telegram.chat_id, &telegram.api_base_url)?;
            Ok(Box::new(notifier))
        }
        None => {
            warn!("No telegram section configured, alerts will only be logged");
            Ok(Box::new(LogNotifier))
        }
    }
}
