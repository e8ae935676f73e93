//! Insight layer: AI-assisted template audits, briefings and the
//! giving-insights chat, with canned fallbacks when the service is absent,
//! rate limited or failing.

mod adapter;
mod config;
mod error;
pub mod prompts;
mod service;

#[cfg(feature = "http")]
pub mod http;

pub use adapter::{Fallback, Insight, InsightAdapter, parse_audit};
pub use config::InsightConfig;
pub use error::InsightError;
pub use prompts::{ChatTurn, Speaker, TemplateContext};
pub use service::{GenerateRequest, GenerateResponse, InsightService};

#[cfg(feature = "http")]
pub use http::HttpInsightClient;
