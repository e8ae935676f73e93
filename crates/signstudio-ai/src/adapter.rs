//! Insight adapter with graceful degradation.
//!
//! Every flow returns a usable value. Without a configured service the
//! adapter answers with demo content after a simulated delay; quota or rate
//! limit failures and all other failures each get their own canned answer.
//! Failures are logged, never returned.

use std::sync::Arc;

use signstudio_core::{AuditResult, AuditStatus};
use tracing::{info, warn};

use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::prompts::{self, ChatTurn, TemplateContext};
use crate::service::{GenerateRequest, InsightService};

/// Why a canned answer was used instead of a generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// No service credential is configured.
    Unconfigured,
    /// The service rejected the call for quota or rate limit reasons.
    RateLimited,
    /// Any other failure, including unparsable responses and timeouts.
    Failed,
}

/// A flow's answer and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight<T> {
    pub value: T,
    pub fallback: Option<Fallback>,
}

impl<T> Insight<T> {
    fn generated(value: T) -> Self {
        Self {
            value,
            fallback: None,
        }
    }

    fn canned(reason: Fallback, value: T) -> Self {
        Self {
            value,
            fallback: Some(reason),
        }
    }

    pub fn is_generated(&self) -> bool {
        self.fallback.is_none()
    }
}

const BRIEFING_DEMO: &str = "Demo briefing: this template collects signatures from each \
signer role. Connect an insight service to get a briefing tailored to its fields.";
const BRIEFING_RATE_LIMITED: &str = "Briefings are temporarily unavailable because the insight \
service quota has been reached. Please try again in a few minutes.";
const BRIEFING_FAILED: &str = "A briefing could not be generated right now.";

const CHAT_DEMO: &str = "I'm running in demo mode, so I can't look at live data yet. \
Once an insight service is connected I can answer questions about your giving.";
const CHAT_RATE_LIMITED: &str = "I'm getting a lot of questions right now. \
Please try again in a minute.";
const CHAT_FAILED: &str = "Sorry, I couldn't reach the insights service. Please try again.";

fn audit_fallback(reason: Fallback) -> AuditResult {
    match reason {
        Fallback::Unconfigured => AuditResult {
            score: 85.0,
            status: AuditStatus::Secure,
            issues: vec!["Demo audit: no insight service is configured.".to_string()],
            suggestions: vec![
                "Add a date field next to each signature.".to_string(),
                "Configure an insight service credential to run a live audit.".to_string(),
            ],
        },
        Fallback::RateLimited => AuditResult {
            score: 0.0,
            status: AuditStatus::MediumRisk,
            issues: vec!["Audit quota reached; the template was not reviewed.".to_string()],
            suggestions: vec!["Run the audit again in a few minutes.".to_string()],
        },
        Fallback::Failed => AuditResult {
            score: 0.0,
            status: AuditStatus::MediumRisk,
            issues: vec!["The audit could not be completed.".to_string()],
            suggestions: vec!["Review field assignments manually before sending.".to_string()],
        },
    }
}

fn text_fallback(reason: Fallback, demo: &str, rate_limited: &str, failed: &str) -> String {
    match reason {
        Fallback::Unconfigured => demo,
        Fallback::RateLimited => rate_limited,
        Fallback::Failed => failed,
    }
    .to_string()
}

/// Parse the audit JSON the service was asked for. Tolerates a markdown
/// code fence around the object.
pub fn parse_audit(text: &str) -> Result<AuditResult, InsightError> {
    let body = strip_code_fence(text);
    let mut audit: AuditResult = serde_json::from_str(body).map_err(|e| {
        let raw: String = body.chars().take(200).collect();
        InsightError::Malformed(format!("{e}; raw: {raw}"))
    })?;
    audit.score = audit.score.clamp(0.0, 100.0);
    Ok(audit)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop the info string ("json") after the opening fence.
    inner
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

pub struct InsightAdapter {
    service: Option<Arc<dyn InsightService>>,
    config: InsightConfig,
}

impl InsightAdapter {
    pub fn new(service: Option<Arc<dyn InsightService>>, config: InsightConfig) -> Self {
        Self { service, config }
    }

    /// Build an adapter from configuration, connecting over HTTP when a
    /// credential is present.
    #[cfg(feature = "http")]
    pub fn from_config(config: InsightConfig) -> Self {
        let service = config.credential().map(|key| {
            Arc::new(crate::http::HttpInsightClient::new(
                config.base_url.clone(),
                key.to_string(),
                config.model.clone(),
            )) as Arc<dyn InsightService>
        });
        Self::new(service, config)
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Structured risk audit of a template.
    pub async fn audit(&self, ctx: &TemplateContext) -> Insight<AuditResult> {
        let request = self.request(prompts::AUDIT_SYSTEM_PROMPT, prompts::build_audit_prompt(ctx), 0.0);
        self.run("audit", request, |text| parse_audit(&text), audit_fallback).await
    }

    /// Short free-text briefing of a template.
    pub async fn briefing(&self, ctx: &TemplateContext) -> Insight<String> {
        let request = self.request(
            prompts::BRIEFING_SYSTEM_PROMPT,
            prompts::build_briefing_prompt(ctx),
            0.3,
        );
        self.run("briefing", request, non_empty, |reason| {
            text_fallback(reason, BRIEFING_DEMO, BRIEFING_RATE_LIMITED, BRIEFING_FAILED)
        })
        .await
    }

    /// Answer a chat question given free-text context and prior turns.
    pub async fn chat(&self, context: &str, history: &[ChatTurn], question: &str) -> Insight<String> {
        let request = self.request(
            prompts::CHAT_SYSTEM_PROMPT,
            prompts::build_chat_prompt(context, history, question),
            0.7,
        );
        self.run("chat", request, non_empty, |reason| {
            text_fallback(reason, CHAT_DEMO, CHAT_RATE_LIMITED, CHAT_FAILED)
        })
        .await
    }

    fn request(&self, system: &str, user_prompt: String, temperature: f32) -> GenerateRequest {
        GenerateRequest {
            system_prompt: Some(system.to_string()),
            user_prompt,
            max_tokens: self.config.max_tokens,
            temperature,
        }
    }

    async fn run<T>(
        &self,
        flow: &'static str,
        request: GenerateRequest,
        parse: impl FnOnce(String) -> Result<T, InsightError>,
        fallback: impl FnOnce(Fallback) -> T,
    ) -> Insight<T> {
        let Some(service) = &self.service else {
            tokio::time::sleep(self.config.fallback_delay).await;
            info!(flow, "no insight service configured, answering with demo content");
            return Insight::canned(Fallback::Unconfigured, fallback(Fallback::Unconfigured));
        };

        let timeout = self.config.timeout;
        let outcome = match tokio::time::timeout(timeout, service.generate(&request)).await {
            Ok(result) => result.and_then(|resp| {
                info!(flow, tokens_used = resp.tokens_used, "insight generated");
                parse(resp.text)
            }),
            Err(_) => Err(InsightError::Timeout(timeout)),
        };

        match outcome {
            Ok(value) => Insight::generated(value),
            Err(e) if e.is_rate_limit() => {
                warn!(flow, error = %e, "insight service rate limited");
                Insight::canned(Fallback::RateLimited, fallback(Fallback::RateLimited))
            }
            Err(e) => {
                warn!(flow, error = %e, "insight call failed");
                Insight::canned(Fallback::Failed, fallback(Fallback::Failed))
            }
        }
    }
}

fn non_empty(text: String) -> Result<String, InsightError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(InsightError::Malformed("empty response".to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}
