//! HTTP client for a Gemini-style `generateContent` endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::AssistError;
use crate::generator::{Prompt, TextGenerator};

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// HTTP client for one model on one provider.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, model, api_key)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        model: String,
        api_key: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(prompt: &Prompt) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt.user }] }],
        });
        if let Some(system) = &prompt.system {
            body["systemInstruction"] = serde_json::json!({ "parts": [{ "text": system }] });
        }
        if let Some(schema) = &prompt.response_schema {
            body["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        body
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, AssistError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AssistError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &Prompt) -> Result<String, AssistError> {
        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        let parsed: GenerateResponse = Self::ensure_success(response).await?.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(AssistError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prompt_has_only_contents() {
        let body = GeminiClient::request_body(&Prompt::text("hello"));
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn json_prompt_requests_schema() {
        let schema = serde_json::json!({ "type": "OBJECT" });
        let prompt = Prompt::json("list tasks", schema.clone()).with_system("be brief");
        let body = GeminiClient::request_body(&prompt);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GeminiClient::new("http://localhost:9/".into(), DEFAULT_MODEL.into(), "k".into());
        assert_eq!(client.base_url, "http://localhost:9");
        assert_eq!(client.model(), DEFAULT_MODEL);
    }
}
