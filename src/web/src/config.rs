use log::warn;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 18000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_OLLAMA_HOST: &str = "http://localhost";
const DEFAULT_OLLAMA_PORT: u16 = 11434;
const DEFAULT_OLLAMA_MODEL: &str = "llama3";
const DEFAULT_CONTEXT_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Snapshot directory. `None` keeps the store in memory only.
    pub data_dir: Option<PathBuf>,
    pub ollama_host: String,
    pub ollama_port: u16,
    pub ollama_model: String,
    pub context_retries: u32,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        ServerConfig {
            port: parse_var("LEAGUE_PORT", DEFAULT_PORT),
            data_dir: Some(PathBuf::from(
                env::var("LEAGUE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
            )),
            ollama_host: env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string()),
            ollama_port: parse_var("OLLAMA_PORT", DEFAULT_OLLAMA_PORT),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
            context_retries: parse_var("LEAGUE_CONTEXT_RETRIES", DEFAULT_CONTEXT_RETRIES),
        }
    }

    pub fn in_memory() -> Self {
        ServerConfig {
            data_dir: None,
            ..Default::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            data_dir: Some(PathBuf::from(DEFAULT_DATA_DIR)),
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            ollama_port: DEFAULT_OLLAMA_PORT,
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            context_retries: DEFAULT_CONTEXT_RETRIES,
        }
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(name: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("{} = '{}' is invalid, using {}", name, raw, default);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_falls_back() {
        assert_eq!(parse_or("LEAGUE_PORT", "abc", 18000u16), 18000);
        assert_eq!(parse_or("LEAGUE_PORT", " 8080 ", 18000u16), 8080);
    }

    #[test]
    fn test_in_memory_has_no_data_dir() {
        let config = ServerConfig::in_memory();

        assert!(config.data_dir.is_none());
        assert_eq!(config.ollama_model, "llama3");
    }
}
