//! Console self-test for a local Ollama setup.

use super::{models::options::GenerationOptions, OllamaClient};

const SAMPLE_PROMPT: &str = "Hola! Responde brevemente: ¿estás funcionando?";

fn mark(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Prints connectivity, model availability, a sample generation and the
/// installed models. Returns true iff the server is healthy.
pub async fn test_ollama_setup(client: &OllamaClient) -> bool {
    println!("🔍 Checking Ollama setup...");

    let health = client.health_check().await;

    println!("📡 Ollama connection: {}", mark(health.ollama_connected));
    println!("🤖 Model '{}': {}", health.model_name, mark(health.model_available));
    println!("🔗 URL: {}", health.base_url);
    println!("📊 Status: {}", health.status);

    if health.is_healthy() {
        println!("\n🧪 Testing generation...");
        let result = client
            .generate(SAMPLE_PROMPT, None, GenerationOptions::default())
            .await;

        if result.success {
            println!("✅ Response: {}", result.response);
            if let Some(secs) = result.generation_time {
                println!("⏱️ Time: {secs:.2}s");
            }
        } else {
            println!("❌ Error: {}", result.response);
        }
    }

    let models = client.available_models().await;
    if !models.is_empty() {
        println!("\n📋 Available models: {}", models.join(", "));
    }

    health.is_healthy()
}

#[cfg(test)]
mod tests {
    use mockito::Server;

    use super::*;
    use crate::services::ollama::{ClientBuilder, ClientConfig};

    #[tokio::test]
    async fn healthy_setup_passes() {
        let mut server = Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models":[{"name":"openhermes:latest"}]}"#)
            .expect(3)
            .create_async()
            .await;
        let generate = server
            .mock("POST", "/api/generate")
            .with_status(200)
            .with_body(r#"{"response":"sí","eval_count":1}"#)
            .create_async()
            .await;

        let client = ClientConfig::default()
            .base_url(Some(server.url()))
            .build()
            .unwrap();

        assert!(test_ollama_setup(&client).await);
        generate.assert_async().await;
    }

    #[tokio::test]
    async fn missing_model_fails_without_generating() {
        let mut server = Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_body(r#"{"models":[{"name":"llama3:latest"}]}"#)
            .create_async()
            .await;
        let generate = server
            .mock("POST", "/api/generate")
            .expect(0)
            .create_async()
            .await;

        let client = ClientConfig::default()
            .base_url(Some(server.url()))
            .build()
            .unwrap();

        assert!(!test_ollama_setup(&client).await);
        generate.assert_async().await;
    }
}
