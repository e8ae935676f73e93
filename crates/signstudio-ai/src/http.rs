//! HTTP client for the external generation service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::InsightError;
use crate::service::{GenerateRequest, GenerateResponse, InsightService};

/// Talks to a `POST {base_url}/v1/generate` endpoint with bearer auth.
pub struct HttpInsightClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct WireResponse {
    text: String,
    #[serde(default)]
    tokens_used: u32,
}

impl HttpInsightClient {
    /// `base_url` should be like `https://insights.example.org` (a trailing
    /// slash is tolerated).
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn wire_request<'a>(&'a self, request: &'a GenerateRequest) -> WireRequest<'a> {
        WireRequest {
            model: &self.model,
            system: request.system_prompt.as_deref(),
            prompt: &request.user_prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl InsightService for HttpInsightClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InsightError> {
        let url = format!("{}/v1/generate", self.base_url);

        debug!(url = %url, model = %self.model, "requesting insight");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.wire_request(request))
            .send()
            .await?;
        let status = resp.status();
        if status.as_u16() == 429 {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightError::RateLimited(body));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InsightError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body: WireResponse = resp.json().await?;
        info!(tokens_used = body.tokens_used, "insight response received");
        Ok(GenerateResponse {
            text: body.text,
            tokens_used: body.tokens_used,
        })
    }
}
