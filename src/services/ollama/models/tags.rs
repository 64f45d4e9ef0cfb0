use serde::Deserialize;

/// Response from the `/api/tags` endpoint.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TagsResponse {
    /// Locally installed models. A body without the key is an empty list.
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
}

/// One entry of the model listing. Only `name` is required.
#[derive(Deserialize, Debug, Clone)]
pub struct ModelDescriptor {
    /// Model name including its tag, e.g. `openhermes:latest`.
    pub name: String,
    #[serde(default)]
    pub modified_at: Option<String>,
    /// Size on disk in bytes.
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub digest: Option<String>,
}

impl TagsResponse {
    pub fn names(&self) -> Vec<String> {
        self.models.iter().map(|m| m.name.clone()).collect()
    }

    /// True if `model` is listed verbatim or with the implicit `:latest` tag.
    pub fn contains_model(&self, model: &str) -> bool {
        let latest = format!("{model}:latest");
        self.models
            .iter()
            .any(|m| m.name == model || m.name == latest)
    }
}
