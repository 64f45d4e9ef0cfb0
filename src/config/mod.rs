//! Settings shared by the inference client and the (external) retrieval
//! pipeline.
//!
//! [`Config::default`] carries the stock values. Only the client reads the
//! Ollama and generation settings; the chunking, retrieval, collection and UI
//! values are declared here for the rest of the RAG stack.

mod prompts;

use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::info;

use crate::services::ollama::models::GenerationOptions;

pub use prompts::SYSTEM_PROMPT;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "openhermes";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Root of the on-disk layout; the other directories live below it.
    pub data_dir: PathBuf,

    pub ollama_url: String,
    pub llm_model: String,
    pub embedding_model: String,

    /// Characters per document chunk.
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub max_retrieval_docs: usize,
    pub similarity_threshold: f64,

    pub temperature: f64,
    pub max_tokens: u32,
    pub context_length: u32,
    /// Timeout for generation requests.
    pub request_timeout: Duration,

    pub collection_name: String,

    pub ui_port: u16,
    pub enable_wide_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            ollama_url: DEFAULT_OLLAMA_URL.into(),
            llm_model: DEFAULT_LLM_MODEL.into(),
            embedding_model: "sentence-transformers/all-MiniLM-L6-v2".into(),
            chunk_size: 800,
            chunk_overlap: 150,
            max_retrieval_docs: 4,
            similarity_threshold: 0.6,
            temperature: 0.1,
            max_tokens: 512,
            context_length: 4096,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            collection_name: "lucas_rag_documents".into(),
            ui_port: 8501,
            enable_wide_mode: true,
        }
    }
}

impl Config {
    /// Defaults with `OLLAMA_URL`, `LLM_MODEL` and `RAG_DATA_DIR` applied
    /// when set to a non-empty value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("OLLAMA_URL") {
            config.ollama_url = url;
        }
        if let Some(model) = get("LLM_MODEL") {
            config.llm_model = model;
        }
        if let Some(dir) = get("RAG_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Rebases the on-disk layout on `data_dir`.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }

    pub fn chromadb_dir(&self) -> PathBuf {
        self.data_dir.join("chromadb")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.data_dir.join("cache")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Every directory [`Config::setup_directories`] creates.
    pub fn directories(&self) -> [PathBuf; 5] {
        [
            self.data_dir.clone(),
            self.uploads_dir(),
            self.chromadb_dir(),
            self.cache_dir(),
            self.logs_dir(),
        ]
    }

    /// Creates the data directories. Existing directories are left alone,
    /// so calling this repeatedly is fine. Any other I/O failure is returned.
    pub fn setup_directories(&self) -> io::Result<()> {
        for dir in self.directories() {
            std::fs::create_dir_all(&dir)?;
        }
        info!(data_dir = %self.data_dir.display(), "data directories ready");
        Ok(())
    }

    /// Default generation options sent with every request.
    pub fn model_config(&self) -> GenerationOptions {
        GenerationOptions::default()
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .top_p(0.9)
            .top_k(40)
            .repeat_penalty(1.1)
    }

    pub fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }
}
