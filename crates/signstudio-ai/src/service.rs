//! Boundary to the external text-generation service.

use async_trait::async_trait;

use crate::error::InsightError;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_prompt: Option<String>,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    pub text: String,
    pub tokens_used: u32,
}

/// A text-generation backend. Implemented over HTTP behind the `http`
/// feature, and by scripted services in tests.
#[async_trait]
pub trait InsightService: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InsightError>;
}
