use reqwest::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Collection endpoint of the events backend
    pub api_url: Url,
    pub loki_url: Option<Url>,
}
