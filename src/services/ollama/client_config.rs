use std::time::Duration;

use crate::{
    config::Config,
    services::ollama::{models::errors::OllamaError, OllamaClient},
};

/// Construction-time overrides for an [`OllamaClient`]. Anything left as
/// `None` falls back to [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

pub trait ClientBuilder {
    fn base_url(self, base_url: Option<impl Into<String>>) -> Self;
    fn model(self, model: Option<impl Into<String>>) -> Self;
    fn timeout(self, timeout: Option<Duration>) -> Self;
    fn build(self) -> Result<OllamaClient, OllamaError>;
}

impl ClientBuilder for ClientConfig {
    fn base_url(mut self, base_url: Option<impl Into<String>>) -> Self {
        self.base_url = base_url.map(|s| s.into());
        self
    }

    fn model(mut self, model: Option<impl Into<String>>) -> Self {
        self.model = model.map(|s| s.into());
        self
    }

    fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn build(self) -> Result<OllamaClient, OllamaError> {
        OllamaClient::try_from(self)
    }
}

impl From<&Config> for ClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: Some(config.ollama_url.clone()),
            model: Some(config.llm_model.clone()),
            timeout: Some(config.request_timeout),
        }
    }
}
