use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub llm_provider: String,
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub minute_limit: u32,
    pub hour_limit: u32,
    pub day_limit: u32,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            llm_provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "gemini".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            minute_limit: get_env_parse_or("RATE_LIMIT_PER_MINUTE", 15)?,
            hour_limit: get_env_parse_or("RATE_LIMIT_PER_HOUR", 250)?,
            day_limit: get_env_parse_or("RATE_LIMIT_PER_DAY", 500)?,
        };

        match config.llm_provider.as_str() {
            "gemini" if config.gemini_api_key.is_none() => Err(Error::Config(
                "GEMINI_API_KEY is required when LLM_PROVIDER=gemini".to_string(),
            )),
            "openai" if config.openai_api_key.is_none() => Err(Error::Config(
                "OPENAI_API_KEY is required when LLM_PROVIDER=openai".to_string(),
            )),
            "gemini" | "openai" => Ok(config),
            other => Err(Error::Config(format!("Unknown LLM_PROVIDER: {}", other))),
        }
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
