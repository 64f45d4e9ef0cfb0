use std::{
    fmt,
    time::{Duration, Instant},
};

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info_span, instrument, trace, Instrument};

use crate::config::Config;

use super::{
    client_config::ClientConfig,
    models::{
        errors::OllamaError,
        generate::{GenerateRequest, GenerateResponse, GenerationResult},
        health::HealthStatus,
        options::GenerationOptions,
        tags::TagsResponse,
    },
};

/// Timeout for the listing calls behind the status checks.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(5);

const TAGS_ENDPOINT: &str = "/api/tags";
const GENERATE_ENDPOINT: &str = "/api/generate";

/// Client for a local Ollama server.
///
/// Holds no per-call state: every operation is a single attempt (two for
/// [`OllamaClient::health_check`]) with its own timeout and no retries.
/// Clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
    defaults: GenerationOptions,
}

impl OllamaClient {
    /// Creates a client from the connection and generation settings in
    /// `config`.
    pub fn new(config: &Config) -> Result<Self, OllamaError> {
        Self::with_overrides(config, ClientConfig::default())
    }

    /// Like [`OllamaClient::new`], with any value set in `overrides` taking
    /// precedence over `config`.
    pub fn with_overrides(config: &Config, overrides: ClientConfig) -> Result<Self, OllamaError> {
        let client = Client::builder()
            .build()
            .map_err(|e| OllamaError::Config(e.to_string()))?;

        let base_url = overrides
            .base_url
            .unwrap_or_else(|| config.ollama_url.clone());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: overrides.model.unwrap_or_else(|| config.llm_model.clone()),
            timeout: overrides.timeout.unwrap_or(config.request_timeout),
            defaults: config.model_config(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Timeout applied to generation requests.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Options every generation starts from before overrides are applied.
    pub fn default_options(&self) -> &GenerationOptions {
        &self.defaults
    }

    #[instrument(name = "ollama.get", skip(self))]
    async fn get(&self, endpoint: &str, timeout: Duration) -> Result<Response, OllamaError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let span = info_span!("http.request", %url);
        async {
            let response = self
                .client
                .get(&url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| OllamaError::from_reqwest(e, timeout))?;

            debug!(status = %response.status(), "received response");
            Ok(response)
        }
        .instrument(span)
        .await
    }

    /// Executes a POST request against an Ollama endpoint and decodes the
    /// JSON answer.
    #[instrument(name = "ollama.post", skip(self, request_body))]
    async fn post<T, R>(
        &self,
        endpoint: &str,
        request_body: &T,
        timeout: Duration,
    ) -> Result<R, OllamaError>
    where
        T: serde::Serialize + fmt::Debug,
        R: DeserializeOwned + fmt::Debug,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        let span = info_span!("http.request", %url);
        async {
            let response = self
                .client
                .post(&url)
                .timeout(timeout)
                .json(request_body)
                .send()
                .await
                .map_err(|e| OllamaError::from_reqwest(e, timeout))?;

            debug!(status = %response.status(), "received response");
            read_json(response, timeout).await
        }
        .instrument(span)
        .await
    }

    /// Fetches the model listing.
    pub async fn list_models(&self) -> Result<TagsResponse, OllamaError> {
        let response = self.get(TAGS_ENDPOINT, STATUS_TIMEOUT).await?;
        read_json(response, STATUS_TIMEOUT).await
    }

    /// True iff the listing endpoint answers with a 2xx status.
    pub async fn test_connection(&self) -> bool {
        match self.get(TAGS_ENDPOINT, STATUS_TIMEOUT).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                error!(error = %e, base_url = %self.base_url, "could not connect to Ollama");
                false
            }
        }
    }

    /// True iff the configured model (or `<model>:latest`) is installed.
    pub async fn is_model_available(&self) -> bool {
        match self.list_models().await {
            Ok(tags) => tags.contains_model(&self.model),
            Err(e) => {
                error!(error = %e, model = %self.model, "could not verify model");
                false
            }
        }
    }

    /// Names of the installed models; empty if the server can't be queried.
    pub async fn available_models(&self) -> Vec<String> {
        match self.list_models().await {
            Ok(tags) => tags.names(),
            Err(e) => {
                error!(error = %e, "could not list models");
                Vec::new()
            }
        }
    }

    /// Checks connectivity, then model availability. The second call is only
    /// made once the first succeeds.
    #[instrument(name = "ollama.health_check", skip(self), fields(model = %self.model))]
    pub async fn health_check(&self) -> HealthStatus {
        let connected = self.test_connection().await;
        let available = connected && self.is_model_available().await;

        let health = HealthStatus::new(&self.model, &self.base_url, connected, available);
        debug!(status = %health.status, "health check finished");
        health
    }

    /// Sends one non-streaming generation request.
    ///
    /// The options are the client defaults with `overrides` merged on top.
    /// An empty `system_prompt` is treated as absent.
    pub async fn try_generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        overrides: GenerationOptions,
    ) -> Result<GenerateResponse, OllamaError> {
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: self.defaults.clone().merge(overrides),
            system: system_prompt
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };

        self.post(GENERATE_ENDPOINT, &request, self.timeout).await
    }

    /// Generates a completion, folding every failure into the returned
    /// [`GenerationResult`].
    #[instrument(name = "ollama.generate", skip_all, fields(model = %self.model))]
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        overrides: GenerationOptions,
    ) -> GenerationResult {
        let start = Instant::now();

        match self.try_generate(prompt, system_prompt, overrides).await {
            Ok(response) => {
                let elapsed = start.elapsed();
                debug!(
                    elapsed_secs = elapsed.as_secs_f64(),
                    prompt_tokens = ?response.prompt_eval_count,
                    completion_tokens = ?response.eval_count,
                    "generation finished"
                );
                GenerationResult::succeeded(response, &self.model, elapsed)
            }
            Err(e) => {
                error!(error = %e, kind = %e.kind(), "generation failed");
                GenerationResult::failed(&e)
            }
        }
    }
}

impl TryFrom<ClientConfig> for OllamaClient {
    type Error = OllamaError;

    fn try_from(cfg: ClientConfig) -> Result<Self, Self::Error> {
        Self::with_overrides(&Config::default(), cfg)
    }
}

/// Maps a non-2xx status to [`OllamaError::Api`], otherwise decodes the body.
async fn read_json<R>(response: Response, timeout: Duration) -> Result<R, OllamaError>
where
    R: DeserializeOwned + fmt::Debug,
{
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".into());

        error!(%status, body = %error_text, "request failed");

        return Err(OllamaError::Api {
            status: status.as_u16(),
            body: error_text,
        });
    }

    let response_text = response
        .text()
        .await
        .map_err(|e| OllamaError::from_reqwest(e, timeout))?;

    match serde_json::from_str::<R>(&response_text) {
        Ok(parsed) => {
            trace!(?parsed, "deserialized response");
            Ok(parsed)
        }
        Err(e) => {
            error!(%e, raw = %response_text, "deserialization error");
            Err(OllamaError::Serialization(format!(
                "{e}. Raw body was: '{response_text}'"
            )))
        }
    }
}
