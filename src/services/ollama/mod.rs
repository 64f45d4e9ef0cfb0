pub mod client;
pub mod client_config;
pub mod diagnostics;
pub mod models;

pub use client::{OllamaClient, STATUS_TIMEOUT};
pub use client_config::{ClientBuilder, ClientConfig};
pub use models::*;
