pub mod errors;
pub mod generate;
pub mod health;
pub mod options;
pub mod tags;

pub use errors::{GenerationErrorKind, OllamaError};
pub use generate::{GenerateRequest, GenerateResponse, GenerationResult};
pub use health::{HealthState, HealthStatus};
pub use options::GenerationOptions;
pub use tags::{ModelDescriptor, TagsResponse};
