//! Response composition.
//!
//! Two paths: a literal query string that exists in the canned table is
//! returned verbatim, bypassing the analysis entirely; anything else gets a
//! synthesized paragraph built from a fixed template skeleton and the static
//! per-department phrase table. Neither path can fail — unknown departments
//! degrade to a generic processing line.

use serde::{Deserialize, Serialize};

use crate::analysis::{DataNeed, QueryAnalysis};
use crate::catalog::{AccountData, Catalog, Department};

// ─── Response types ───────────────────────────────────────────────────────────

/// Visual weight of an option button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Primary,
    Secondary,
}

/// A follow-up action button attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    pub text: String,
    pub action: String,
    #[serde(rename = "type")]
    pub kind: OptionKind,
}

/// One simulated backend operation recorded on a synthesized response. Pure
/// set dressing — there is no real backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedOperation {
    #[serde(rename = "type")]
    pub op_type: String,
    pub target: String,
    pub status: String,
    pub result: String,
}

/// The final composed payload delivered to the UI. Rendered into a chat
/// message and stored only as inert display content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub text: String,
    pub sources: Vec<String>,
    pub operations: Vec<SimulatedOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_data: Option<AccountData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ResponseOption>>,
}

/// A canned follow-up for a department-scoped action button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub text: String,
    pub options: Vec<ResponseOption>,
    /// Whether the UI should show the feedback prompt after this reply.
    pub show_feedback: bool,
}

impl ActionResponse {
    /// Shape an action follow-up as a displayable response.
    pub fn to_agent_response(&self, department: Department) -> AgentResponse {
        AgentResponse {
            text: self.text.clone(),
            sources: vec![source_for(department)],
            operations: vec![],
            account_data: None,
            options: if self.options.is_empty() {
                None
            } else {
                Some(self.options.clone())
            },
        }
    }
}

// ─── Composition ──────────────────────────────────────────────────────────────

const INTEGRATION_HUB_SOURCE: &str = "Municipal Data Integration Hub";

fn source_for(department: Department) -> String {
    format!("St. Louis {}", department.display_name())
}

/// The fixed default option set attached to every synthesized response.
pub fn default_options() -> Vec<ResponseOption> {
    vec![
        ResponseOption {
            text: "Pay a bill".to_string(),
            action: "pay_now".to_string(),
            kind: OptionKind::Primary,
        },
        ResponseOption {
            text: "Check a request status".to_string(),
            action: "check_status".to_string(),
            kind: OptionKind::Secondary,
        },
        ResponseOption {
            text: "Start an application".to_string(),
            action: "start_application".to_string(),
            kind: OptionKind::Secondary,
        },
        ResponseOption {
            text: "Ask something else".to_string(),
            action: "new_query".to_string(),
            kind: OptionKind::Secondary,
        },
    ]
}

/// Compose the response for a query: canned exact match if one exists,
/// synthesized template otherwise.
pub fn compose(catalog: &Catalog, query: &str, analysis: &QueryAnalysis) -> AgentResponse {
    if let Some(canned) = catalog.canned_response(query) {
        return canned.clone();
    }
    synthesize(catalog, analysis)
}

/// Build the templated multi-department response from the analysis.
fn synthesize(catalog: &Catalog, analysis: &QueryAnalysis) -> AgentResponse {
    let involved = analysis.involved_departments();
    let account_data = analysis
        .needs(DataNeed::Account)
        .then(|| catalog.account().clone());

    let mut text = String::new();
    if involved.len() > 1 {
        text.push_str(&format!(
            "I've coordinated with {} municipal offices regarding your request:\n\n",
            involved.len()
        ));
    } else {
        text.push_str("Here's what I found for your request:\n\n");
    }

    if let Some(account) = &account_data {
        text.push_str(&format!(
            "Account information:\n  Account: {}\n  Service address: {}\n  Balance due: {} (due {})\n\n",
            account.account_id, account.service_address, account.balance_due, account.due_date
        ));
    }

    for (i, dept) in involved.iter().enumerate() {
        let line = match catalog.phrase(*dept) {
            Some(phrase) => phrase.to_string(),
            // Unknown department — degrade, never fail.
            None => format!("{}: Processing your request...", dept.display_name()),
        };
        text.push_str(&format!("{}. {}\n", i + 1, line));
    }

    text.push_str(
        "\nAll information has been verified across municipal systems. \
         Is there anything else I can help you with?",
    );

    let mut sources: Vec<String> = involved.iter().map(|d| source_for(*d)).collect();
    sources.push(INTEGRATION_HUB_SOURCE.to_string());

    let operations = involved
        .iter()
        .map(|dept| SimulatedOperation {
            op_type: "database_query".to_string(),
            target: dept.as_str().to_string(),
            status: "completed".to_string(),
            result: format!("{} records retrieved", dept.display_name()),
        })
        .collect();

    AgentResponse {
        text,
        sources,
        operations,
        account_data,
        options: Some(default_options()),
    }
}

/// Look up a department-scoped action. Unknown actions degrade to a generic
/// acknowledgement rather than failing.
pub fn compose_action(catalog: &Catalog, department: Department, action: &str) -> AgentResponse {
    match catalog.action_response(department, action) {
        Some(found) => found.to_agent_response(department),
        None => AgentResponse {
            text: format!(
                "{}: Processing your request...",
                department.display_name()
            ),
            sources: vec![source_for(department)],
            operations: vec![],
            account_data: None,
            options: Some(default_options()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::catalog::Catalog;

    #[test]
    fn canned_exact_match_returned_verbatim() {
        let catalog = Catalog::builtin();
        let query = "What are City Hall hours?";
        let analysis = analyze(catalog, query);
        let response = compose(catalog, query, &analysis);
        assert_eq!(
            response.text,
            catalog.canned_response(query).unwrap().text
        );
        assert!(response.operations.is_empty());
    }

    #[test]
    fn synthesized_response_numbers_each_department() {
        let catalog = Catalog::builtin();
        let query = "Coordinate my business license application across county and city departments";
        let analysis = analyze(catalog, query);
        let response = compose(catalog, query, &analysis);

        assert!(response.text.contains("1. Business Licensing Office"));
        assert!(response.text.contains("2. St. Louis County Records"));
        assert!(response.text.contains("3. City Services"));
        assert!(response.text.contains("verified across municipal systems"));
        assert_eq!(response.operations.len(), 3);
        assert_eq!(response.options.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn sources_include_integration_hub_last() {
        let catalog = Catalog::builtin();
        let analysis = analyze(catalog, "water leak on my street");
        let response = compose(catalog, "water leak on my street", &analysis);
        assert_eq!(
            response.sources.last().map(String::as_str),
            Some(INTEGRATION_HUB_SOURCE)
        );
        assert_eq!(response.sources.len(), analysis.involved_departments().len() + 1);
    }

    #[test]
    fn account_section_present_only_for_account_queries() {
        let catalog = Catalog::builtin();

        let paying = analyze(catalog, "pay my water bill today");
        let with_account = compose(catalog, "pay my water bill today", &paying);
        assert!(with_account.account_data.is_some());
        assert!(with_account.text.contains("Account information:"));

        let browsing = analyze(catalog, "pothole on my street");
        let without = compose(catalog, "pothole on my street", &browsing);
        assert!(without.account_data.is_none());
        assert!(!without.text.contains("Account information:"));
    }

    #[test]
    fn missing_phrase_degrades_to_processing_line() {
        let mut catalog = Catalog::builtin().clone();
        catalog.clear_phrases_for_test();
        let analysis = analyze(&catalog, "water leak");
        let response = synthesize(&catalog, &analysis);
        assert!(response.text.contains("Water Division: Processing your request..."));
    }

    #[test]
    fn known_action_carries_show_feedback_flag() {
        let catalog = Catalog::builtin();
        let action = catalog
            .action_response(Department::Water, "pay_now")
            .expect("pay_now is built in");
        assert!(action.text.contains("$78.45"));
        assert!(!action.show_feedback);
        assert_eq!(action.options.len(), 2);
    }

    #[test]
    fn unknown_action_degrades_gracefully() {
        let catalog = Catalog::builtin();
        let response = compose_action(catalog, Department::Fire, "no_such_action");
        assert!(response.text.contains("Processing your request..."));
        assert_eq!(response.sources, vec!["St. Louis Fire Department".to_string()]);
    }
}
