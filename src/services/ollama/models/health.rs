use serde::Serialize;

/// Overall state reported by a health check.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    Healthy,
    ModelNotFound,
    OllamaNotRunning,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Healthy => "healthy",
            HealthState::ModelNotFound => "model_not_found",
            HealthState::OllamaNotRunning => "ollama_not_running",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connectivity and model availability of an Ollama server.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub ollama_connected: bool,
    pub model_available: bool,
    pub model_name: String,
    pub base_url: String,
    pub status: HealthState,
}

impl HealthStatus {
    /// `model_available` only counts when the server is reachable.
    pub fn new(
        model_name: impl Into<String>,
        base_url: impl Into<String>,
        connected: bool,
        model_available: bool,
    ) -> Self {
        let model_available = connected && model_available;
        let status = match (connected, model_available) {
            (false, _) => HealthState::OllamaNotRunning,
            (true, false) => HealthState::ModelNotFound,
            (true, true) => HealthState::Healthy,
        };

        Self {
            ollama_connected: connected,
            model_available,
            model_name: model_name.into(),
            base_url: base_url.into(),
            status,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}
