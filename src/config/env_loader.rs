use crate::config::model::Config;
use crate::evento::api::DEFAULT_EVENTS_URL;
use reqwest::Url;
use std::env;
use thiserror::Error;

const API_URL_VAR: &str = "EVENTO_API_URL";
const LOKI_URL_VAR: &str = "LOKI_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid config '{name}'. Expected a URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

pub fn load_config() -> Result<Config, ConfigError> {
    config_from(|name| env::var(name).ok())
}

/// Builds the config from any variable lookup
pub fn config_from<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_url = load_url_config(&lookup, API_URL_VAR)?
        .map_or_else(|| parse_url(API_URL_VAR, DEFAULT_EVENTS_URL), Ok)?;
    let loki_url = load_url_config(&lookup, LOKI_URL_VAR)?;

    Ok(Config { api_url, loki_url })
}

fn load_url_config<F>(lookup: &F, name: &'static str) -> Result<Option<Url>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => parse_url(name, value.trim()).map(Some),
        _ => Ok(None),
    }
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    })
}
