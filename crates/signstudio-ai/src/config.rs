use std::time::Duration;

/// Insight adapter settings, usually filled from CLI flags or the environment.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    /// Base URL of the generation service, without trailing slash.
    pub base_url: String,
    /// Service credential. Without one the adapter answers with demo content.
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Upper bound on a single service call.
    pub timeout: Duration,
    /// Simulated latency of demo responses when no credential is configured.
    pub fallback_delay: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787".to_string(),
            api_key: None,
            model: "insight-default".to_string(),
            max_tokens: 1024,
            timeout: Duration::from_secs(30),
            fallback_delay: Duration::from_millis(1500),
        }
    }
}

impl InsightConfig {
    /// The credential, if one is set and not blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}
