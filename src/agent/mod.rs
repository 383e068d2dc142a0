//! The Super Agent orchestrator — ties analysis, narration, and composition
//! into one request/response cycle.
//!
//! The composed response is available immediately (everything is a table
//! lookup), but delivery is held back by a per-tier delay so the narration has
//! something to narrate. Overlapping submissions resolve with an explicit
//! latest-wins policy: every query gets a monotonically increasing sequence
//! number, and a resolution whose sequence is no longer current is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::analysis::{self, Complexity, QueryAnalysis};
use crate::catalog::{Catalog, Department};
use crate::composer::{self, AgentResponse};
use crate::narrator::{self, StatusUpdate};

// Response resolution delay per complexity tier (milliseconds). Separate from
// the per-step narration pacing.
const RESPONSE_DELAY_SIMPLE: u64 = 800;
const RESPONSE_DELAY_MEDIUM: u64 = 1500;
const RESPONSE_DELAY_COMPLEX: u64 = 2400;

/// Everything produced for one submitted query. The response is held inside
/// and delivered through [`SuperAgent::resolve`], which enforces the
/// latest-wins policy.
#[derive(Debug)]
pub struct QueryOutcome {
    pub seq: u64,
    pub analysis: QueryAnalysis,
    pub narration: Vec<StatusUpdate>,
    response: AgentResponse,
}

impl QueryOutcome {
    /// The pending response, bypassing sequencing. Test and display helpers
    /// only — normal delivery goes through [`SuperAgent::resolve`].
    pub fn peek_response(&self) -> &AgentResponse {
        &self.response
    }
}

/// Stateless apart from the request sequence counter. Cheap to clone via
/// `Arc`; the catalog is shared, never mutated.
pub struct SuperAgent {
    catalog: Arc<Catalog>,
    delay_scale: f32,
    fallback: Department,
    seq: AtomicU64,
}

impl SuperAgent {
    pub fn new(catalog: Arc<Catalog>, delay_scale: f32) -> Self {
        Self::with_fallback(catalog, delay_scale, Department::Gov)
    }

    pub fn with_fallback(catalog: Arc<Catalog>, delay_scale: f32, fallback: Department) -> Self {
        Self {
            catalog,
            delay_scale,
            fallback,
            seq: AtomicU64::new(0),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Analyze a query and stage its narration plan and response. Pure table
    /// work — returns immediately.
    pub fn submit(&self, query: &str) -> QueryOutcome {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let analysis = analysis::analyze_with_fallback(&self.catalog, query, self.fallback);
        let narration = narrator::narration_plan(&analysis);
        let response = composer::compose(&self.catalog, query, &analysis);
        debug!(
            seq,
            primary = %analysis.primary,
            secondaries = analysis.secondaries.len(),
            complexity = %analysis.complexity,
            "query staged"
        );
        QueryOutcome {
            seq,
            analysis,
            narration,
            response,
        }
    }

    /// Deliver the staged response after its tier delay. Returns `None` when
    /// a newer query was submitted in the meantime — the stale response is
    /// dropped, never displayed out of order.
    pub async fn resolve(&self, outcome: QueryOutcome) -> Option<AgentResponse> {
        let delay = self
            .response_delay(outcome.analysis.complexity)
            .mul_f32(self.delay_scale.max(0.0));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.seq.load(Ordering::SeqCst) != outcome.seq {
            debug!(seq = outcome.seq, "stale response dropped");
            return None;
        }
        Some(outcome.response)
    }

    /// Handle an action button press. No analysis or narration phase — the
    /// response is returned directly.
    pub fn handle_action(&self, department: Department, action: &str) -> AgentResponse {
        debug!(%department, action, "action requested");
        composer::compose_action(&self.catalog, department, action)
    }

    /// Pacing scale applied to narration and response delays (0 = no delays).
    pub fn delay_scale(&self) -> f32 {
        self.delay_scale
    }

    fn response_delay(&self, complexity: Complexity) -> Duration {
        let ms = match complexity {
            Complexity::Simple => RESPONSE_DELAY_SIMPLE,
            Complexity::Medium => RESPONSE_DELAY_MEDIUM,
            Complexity::Complex => RESPONSE_DELAY_COMPLEX,
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> SuperAgent {
        SuperAgent::new(Arc::new(Catalog::builtin().clone()), 0.0)
    }

    #[tokio::test]
    async fn current_response_resolves() {
        let agent = agent();
        let outcome = agent.submit("pay my water bill");
        let response = agent.resolve(outcome).await;
        assert!(response.is_some());
    }

    #[tokio::test]
    async fn superseded_response_is_dropped() {
        let agent = agent();
        let first = agent.submit("pay my water bill");
        let second = agent.submit("pothole on my street");

        assert!(agent.resolve(first).await.is_none());
        assert!(agent.resolve(second).await.is_some());
    }

    #[tokio::test]
    async fn sequence_numbers_increase() {
        let agent = agent();
        let a = agent.submit("water");
        let b = agent.submit("water");
        assert!(b.seq > a.seq);
    }

    #[test]
    fn action_path_skips_narration() {
        let agent = agent();
        let response = agent.handle_action(Department::Water, "pay_now");
        assert!(response.text.contains("$78.45"));
        assert!(response.operations.is_empty());
    }
}
