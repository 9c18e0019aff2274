use std::env;

use serde::Deserialize;
use tracing::{info, Level};

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub env: String, // file / server
    pub database_url: String,
    pub log_dir: Option<String>,
}

pub fn get_config() -> Config {
    let env_var = env::var("env").unwrap_or("file".to_string());
    if env_var == "file" {
        info!("loading environment variables from .env file");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environment variables");
    }
    envy::from_env::<Config>().unwrap()
}

/// Set up file logging. The returned guard must stay alive for as long as the
/// application logs, dropping it stops the background writer.
pub fn init_logging(config: &Config) -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = config.log_dir.clone().unwrap_or("./logs".to_string());
    let file_appender = tracing_appender::rolling::daily(log_dir, "account.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(Level::INFO)
        .init();
    guard
}
