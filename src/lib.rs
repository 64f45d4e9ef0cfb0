//! Configuration and a thin client for a locally hosted Ollama server.
//!
//! ```no_run
//! use ollama_rag::{Config, GenerationOptions, OllamaClient};
//!
//! # async fn run() -> Result<(), ollama_rag::OllamaError> {
//! let config = Config::default();
//! let client = OllamaClient::new(&config)?;
//!
//! if client.health_check().await.is_healthy() {
//!     let result = client
//!         .generate("¿Qué dice el contrato?", Some(config.system_prompt()), GenerationOptions::default())
//!         .await;
//!     println!("{}", result.response);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod observability;
pub mod services;

pub use config::{Config, SYSTEM_PROMPT};
pub use observability::logging::init_default_tracing;
pub use services::ollama::diagnostics::test_ollama_setup;
pub use services::ollama::{
    ClientBuilder, ClientConfig, GenerateResponse, GenerationErrorKind, GenerationOptions,
    GenerationResult, HealthState, HealthStatus, ModelDescriptor, OllamaClient, OllamaError,
    TagsResponse,
};
