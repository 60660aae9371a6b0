//! Client for the optional text-generation backend.
//!
//! The engine is fully functional without it; when `GENERATOR_URL` is set,
//! low-quality template replies can be upgraded by a generated one. Every
//! failure mode (disabled, timeout, HTTP error, empty completion) degrades
//! to `None` at the call site, never to a user-facing error.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tokio::time::timeout;
use tracing::warn;

use crate::brain::AnalysisReport;
use crate::error::AppError;
use crate::models::VocabularyEntry;
use std::collections::HashMap;

/// Default request timeout when `GENERATOR_TIMEOUT_SECS` is unset.
const DEFAULT_TIMEOUT_SECS: u64 = 8;
/// At most this many vocabulary entries are quoted in the prompt.
const PROMPT_VOCAB_LIMIT: usize = 5;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    content: String,
}

/// HTTP client for the generation backend. Cheap to clone.
#[derive(Clone)]
pub struct GeneratorClient {
    client: Client,
    base_url: Option<String>,
    request_timeout: Duration,
}

impl GeneratorClient {
    pub fn new(base_url: Option<String>, request_timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            request_timeout,
        }
    }

    /// Reads `GENERATOR_URL` and `GENERATOR_TIMEOUT_SECS`. A missing URL
    /// yields a disabled client, not an error.
    pub fn from_env() -> Self {
        let base_url = env::var("GENERATOR_URL").ok().filter(|url| !url.is_empty());
        let request_timeout = env::var("GENERATOR_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        if base_url.is_none() {
            warn!("GENERATOR_URL not set; replies will come from templates only");
        }

        Self::new(base_url, request_timeout)
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    /// Assembles the generation prompt from the analysis and tenant data.
    pub fn build_prompt(
        report: &AnalysisReport,
        vocabulary: &HashMap<String, VocabularyEntry>,
        prior_context: Option<&str>,
    ) -> String {
        let mut prompt = String::new();
        prompt.push_str("Você é um assistente de atendimento de uma empresa brasileira.\n");
        prompt.push_str(&format!("Mensagem do cliente: {}\n", report.message));
        prompt.push_str(&format!("Intenção detectada: {}\n", report.intent.intent.label()));

        if let Some(topic) = &report.semantics.dominant_topic {
            prompt.push_str(&format!("Assunto principal: {topic}\n"));
        }
        if !report.semantics.recognized.is_empty() {
            let concepts: Vec<&str> = report
                .semantics
                .recognized
                .iter()
                .map(|c| c.concept.as_str())
                .collect();
            prompt.push_str(&format!("Conceitos reconhecidos: {}\n", concepts.join(", ")));
        }
        for entry in vocabulary.values().take(PROMPT_VOCAB_LIMIT) {
            prompt.push_str(&format!("Vocabulário da empresa: {} = {}\n", entry.word, entry.definition));
        }
        if let Some(context) = prior_context {
            prompt.push_str(&format!("Contexto anterior: {context}\n"));
        }
        prompt.push_str("Responda em português, de forma curta e cordial.");
        prompt
    }

    /// Requests a completion. `Ok(None)` when the client is disabled or the
    /// backend returned an empty completion.
    pub async fn generate(&self, prompt: &str) -> Result<Option<String>, AppError> {
        let Some(base_url) = &self.base_url else {
            return Ok(None);
        };

        let request = self
            .client
            .post(format!("{base_url}/generate"))
            .json(&GenerateRequest { prompt })
            .send();

        let response = timeout(self.request_timeout, request).await??;
        let response = response.error_for_status()?;
        let body: GenerateResponse = response.json().await?;

        let content = body.content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        Ok(Some(content.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn enabled_client(url: &str) -> GeneratorClient {
        GeneratorClient::new(Some(url.to_string()), Duration::from_secs(2))
    }

    #[test]
    fn test_from_env_without_url_is_disabled() {
        temp_env::with_vars([("GENERATOR_URL", None::<&str>)], || {
            assert!(!GeneratorClient::from_env().is_enabled());
        });
    }

    #[test]
    fn test_from_env_with_url_is_enabled() {
        temp_env::with_vars([("GENERATOR_URL", Some("http://localhost:9000"))], || {
            assert!(GeneratorClient::from_env().is_enabled());
        });
    }

    #[tokio::test]
    async fn test_disabled_client_returns_none() {
        let client = GeneratorClient::new(None, Duration::from_secs(1));
        let result = client.generate("qualquer prompt").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_successful_generation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": "Claro, posso ajudar!" })),
            )
            .mount(&server)
            .await;

        let client = enabled_client(&server.uri());
        let result = client.generate("prompt").await.unwrap();
        assert_eq!(result.as_deref(), Some("Claro, posso ajudar!"));
    }

    #[tokio::test]
    async fn test_empty_completion_returns_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "content": "  " })),
            )
            .mount(&server)
            .await;

        let client = enabled_client(&server.uri());
        let result = client.generate("prompt").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_http_error_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = enabled_client(&server.uri());
        assert!(client.generate("prompt").await.is_err());
    }

    #[tokio::test]
    async fn test_timeout_is_propagated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "content": "tarde demais" }))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = GeneratorClient::new(Some(server.uri()), Duration::from_millis(100));
        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AppError::Timeout(_))));
    }
}
