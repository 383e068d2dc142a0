//! Status narration — the cosmetic "processing" messages shown while a
//! response resolves.
//!
//! The plan is a deterministic function of the analysis: a fixed ordered list
//! of `(message, delay)` steps with optional branches for complexity, account
//! access, and secondary agents. Delays pace UI animation only — they are not
//! work durations. The producer yields the full plan up front; the consumer
//! owns the timing and may abandon the sequence mid-way.

use std::time::Duration;

use serde::Serialize;

use crate::analysis::{Complexity, DataNeed, QueryAnalysis};
use crate::catalog::Department;

// Per-step pacing constants (milliseconds).
const DELAY_ANALYZING: u64 = 600;
const DELAY_COORDINATION: u64 = 800;
const DELAY_AGENT_CALL: u64 = 500;
const DELAY_ACCOUNT: u64 = 700;
const DELAY_DATABASE: u64 = 900;
const DELAY_CROSS_REFERENCE: u64 = 600;
const DELAY_MCP: u64 = 800;
const DELAY_VERIFY: u64 = 500;
const DELAY_GENERATE: u64 = 400;

/// What a status step represents, for UI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Analyzing,
    Coordination,
    AgentCall,
    AccountAccess,
    DatabaseQuery,
    CrossReference,
    McpCoordination,
    Verification,
    Generation,
}

/// One narration step. Purely presentational; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub step: usize,
    pub message: String,
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
    pub kind: StatusKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Department>,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Build the full narration plan for an analysis. Deterministic: the same
/// analysis always produces the same sequence.
pub fn narration_plan(analysis: &QueryAnalysis) -> Vec<StatusUpdate> {
    let mut plan = Vec::new();
    let mut push = |message: String, delay_ms: u64, kind: StatusKind, agent: Option<Department>| {
        let step = plan.len() + 1;
        plan.push(StatusUpdate {
            step,
            message,
            delay: Duration::from_millis(delay_ms),
            kind,
            agent,
        });
    };

    push(
        "Analyzing your request...".to_string(),
        DELAY_ANALYZING,
        StatusKind::Analyzing,
        None,
    );

    if analysis.complexity == Complexity::Complex {
        push(
            "Complex request detected — coordinating across multiple domains...".to_string(),
            DELAY_COORDINATION,
            StatusKind::Coordination,
            None,
        );
    }

    push(
        format!("Contacting the {}...", analysis.primary.display_name()),
        DELAY_AGENT_CALL,
        StatusKind::AgentCall,
        Some(analysis.primary),
    );

    if analysis.needs(DataNeed::Account) {
        push(
            "Accessing your account information...".to_string(),
            DELAY_ACCOUNT,
            StatusKind::AccountAccess,
            Some(analysis.primary),
        );
    }

    push(
        format!("Querying {} records...", analysis.primary.display_name()),
        DELAY_DATABASE,
        StatusKind::DatabaseQuery,
        Some(analysis.primary),
    );

    for secondary in &analysis.secondaries {
        push(
            format!("Cross-referencing with the {}...", secondary.display_name()),
            DELAY_CROSS_REFERENCE,
            StatusKind::CrossReference,
            Some(*secondary),
        );
    }

    if analysis.complexity == Complexity::Complex {
        push(
            "Coordinating results through the municipal integration hub...".to_string(),
            DELAY_MCP,
            StatusKind::McpCoordination,
            None,
        );
    }

    push(
        "Verifying data across departments...".to_string(),
        DELAY_VERIFY,
        StatusKind::Verification,
        None,
    );
    push(
        "Generating your response...".to_string(),
        DELAY_GENERATE,
        StatusKind::Generation,
        None,
    );

    plan
}

/// Play a narration plan, invoking `on_step` for each update and sleeping its
/// delay (scaled) before the next. A `delay_scale` of 0.0 disables pacing.
/// Dropping the future abandons the sequence; nothing else observes it.
pub async fn play<F>(plan: &[StatusUpdate], delay_scale: f32, mut on_step: F)
where
    F: FnMut(&StatusUpdate),
{
    for update in plan {
        on_step(update);
        let scaled = update.delay.mul_f32(delay_scale.max(0.0));
        if !scaled.is_zero() {
            tokio::time::sleep(scaled).await;
        }
    }
}
