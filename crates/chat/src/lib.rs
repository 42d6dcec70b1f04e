mod adapter;

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};
use yatra_core::{respond, RankedMonument};
use yatra_observability::AppMetrics;

pub use adapter::CompletionAdapter;

#[derive(Debug, Clone)]
pub struct GuideReply {
    pub text: String,
    pub ai_powered: bool,
}

/// Two-tier responder: one AI completion attempt, one rule-engine fallback,
/// no retries within either tier.
pub struct GuideAgent {
    adapter: Option<CompletionAdapter>,
    metrics: Arc<AppMetrics>,
}

impl GuideAgent {
    pub fn new(adapter: Option<CompletionAdapter>, metrics: Arc<AppMetrics>) -> Self {
        Self { adapter, metrics }
    }

    pub fn from_env(metrics: Arc<AppMetrics>) -> Self {
        let adapter = CompletionAdapter::from_env();
        if adapter.is_none() {
            info!("no completion credential configured, chat replies are rule-based");
        }
        Self::new(adapter, metrics)
    }

    pub fn ai_enabled(&self) -> bool {
        self.adapter.is_some()
    }

    #[instrument(skip(self, message, nearby))]
    pub async fn respond(&self, message: &str, nearby: &[RankedMonument]) -> GuideReply {
        let started = Instant::now();
        self.metrics.inc_chat();

        if let Some(adapter) = &self.adapter {
            match adapter.complete(message, nearby).await {
                Ok(text) => {
                    self.metrics.inc_ai_reply();
                    self.metrics.observe_latency(started.elapsed());
                    info!(ai_powered = true, nearby = nearby.len(), "chat handled");
                    return GuideReply {
                        text,
                        ai_powered: true,
                    };
                }
                Err(error) => {
                    warn!(error = %error, "completion unavailable, using rule engine");
                }
            }
        }

        self.metrics.inc_fallback();
        let text = respond(message, nearby);
        self.metrics.observe_latency(started.elapsed());
        info!(ai_powered = false, nearby = nearby.len(), "chat handled");

        GuideReply {
            text,
            ai_powered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_adapter_falls_back_to_rule_engine() {
        let agent = GuideAgent::new(None, AppMetrics::shared());

        let reply = agent.respond("hello", &[]).await;

        assert!(!reply.ai_powered);
        assert_eq!(reply.text, respond("hello", &[]));
    }

    #[tokio::test]
    async fn fallback_is_counted() {
        let metrics = AppMetrics::shared();
        let agent = GuideAgent::new(None, metrics.clone());

        agent.respond("any scams here?", &[]).await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.chat_total, 1);
        assert_eq!(snapshot.fallback_total, 1);
        assert_eq!(snapshot.ai_replies_total, 0);
    }
}
