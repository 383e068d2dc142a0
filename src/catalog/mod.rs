//! Static table registry for the municipal assistant.
//!
//! Every piece of "knowledge" the assistant has lives here: keyword lists per
//! department, intent trigger lists, per-department response fragments, canned
//! responses keyed by exact query text, and department-scoped action responses.
//! The tables are immutable after construction — the built-in catalog is built
//! once and shared by reference, never mutated.

mod builtin;
mod overlay;

pub use overlay::CatalogError;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::composer::{ActionResponse, AgentResponse};

// ─── Department ───────────────────────────────────────────────────────────────

/// The simulated municipal service domains a query can route to.
///
/// `Gov` is the fallback — it carries no keywords and is only selected when no
/// other department scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Water,
    Property,
    Business,
    Utilities,
    County,
    City,
    Fire,
    Police,
    Health,
    Gov,
}

/// Canonical table order for the scored departments. This order is the
/// tie-break for primary/secondary selection, so it must never be shuffled.
pub const SCORED_DEPARTMENTS: [Department; 9] = [
    Department::Water,
    Department::Property,
    Department::Business,
    Department::Utilities,
    Department::County,
    Department::City,
    Department::Fire,
    Department::Police,
    Department::Health,
];

impl Department {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Property => "property",
            Self::Business => "business",
            Self::Utilities => "utilities",
            Self::County => "county",
            Self::City => "city",
            Self::Fire => "fire",
            Self::Police => "police",
            Self::Health => "health",
            Self::Gov => "gov",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "water" => Some(Self::Water),
            "property" => Some(Self::Property),
            "business" => Some(Self::Business),
            "utilities" => Some(Self::Utilities),
            "county" => Some(Self::County),
            "city" => Some(Self::City),
            "fire" => Some(Self::Fire),
            "police" => Some(Self::Police),
            "health" => Some(Self::Health),
            "gov" => Some(Self::Gov),
            _ => None,
        }
    }

    /// Human-facing name used in response text and source attributions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Water => "Water Division",
            Self::Property => "Assessor's Office",
            Self::Business => "Business Licensing Office",
            Self::Utilities => "Utilities Coordination Office",
            Self::County => "St. Louis County Records",
            Self::City => "City Services",
            Self::Fire => "Fire Department",
            Self::Police => "Metropolitan Police Department",
            Self::Health => "Department of Health",
            Self::Gov => "General Government Services",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Intent ───────────────────────────────────────────────────────────────────

/// Coarse classification of the user's goal, detected by trigger words only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Payment,
    Inquiry,
    Application,
    Dispute,
    Coordination,
    Emergency,
}

/// Detection order for intents. Matched intents are reported in this order.
pub const INTENTS: [Intent; 6] = [
    Intent::Payment,
    Intent::Inquiry,
    Intent::Application,
    Intent::Dispute,
    Intent::Coordination,
    Intent::Emergency,
];

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Inquiry => "inquiry",
            Self::Application => "application",
            Self::Dispute => "dispute",
            Self::Coordination => "coordination",
            Self::Emergency => "emergency",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "payment" => Some(Self::Payment),
            "inquiry" => Some(Self::Inquiry),
            "application" => Some(Self::Application),
            "dispute" => Some(Self::Dispute),
            "coordination" => Some(Self::Coordination),
            "emergency" => Some(Self::Emergency),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Simulated account fixture ────────────────────────────────────────────────

/// Fake resident account data attached to responses that touch billing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub account_id: String,
    pub service_address: String,
    pub balance_due: String,
    pub due_date: String,
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// The immutable table registry. Constructed once (built-in or built-in plus a
/// TOML overlay) and injected by reference everywhere.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Keyword lists in canonical department order. Order matters: it is the
    /// stable-sort tie-break during primary/secondary selection.
    pub(crate) keywords: Vec<(Department, Vec<String>)>,
    /// Intent trigger lists in detection order.
    pub(crate) intents: Vec<(Intent, Vec<String>)>,
    /// One synthesized response line per department.
    pub(crate) phrases: HashMap<Department, String>,
    /// Canned responses keyed by the literal query string.
    pub(crate) canned: HashMap<String, AgentResponse>,
    /// Department-scoped action responses, keyed by (department, action id).
    pub(crate) actions: HashMap<(Department, String), ActionResponse>,
    /// Simulated resident account.
    pub(crate) account: AccountData,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(builtin::build);

impl Catalog {
    /// The built-in catalog, constructed on first use and shared process-wide.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Built-in catalog with keyword/intent tables replaced by entries from a
    /// TOML overlay file. See [`CatalogError`] for the failure modes.
    pub fn with_overlay(path: &std::path::Path) -> Result<Catalog, CatalogError> {
        overlay::apply(Self::builtin().clone(), path)
    }

    /// Keyword lists in canonical department order.
    pub fn keyword_table(&self) -> &[(Department, Vec<String>)] {
        &self.keywords
    }

    /// Intent trigger lists in detection order.
    pub fn intent_table(&self) -> &[(Intent, Vec<String>)] {
        &self.intents
    }

    /// The synthesized response line for a department, if one is defined.
    pub fn phrase(&self, department: Department) -> Option<&str> {
        self.phrases.get(&department).map(String::as_str)
    }

    /// Canned response for a literal query string.
    pub fn canned_response(&self, query: &str) -> Option<&AgentResponse> {
        self.canned.get(query)
    }

    /// Action response for a department-scoped action id.
    pub fn action_response(&self, department: Department, action: &str) -> Option<&ActionResponse> {
        self.actions.get(&(department, action.to_string()))
    }

    pub fn account(&self) -> &AccountData {
        &self.account
    }

    #[cfg(test)]
    pub(crate) fn clear_phrases_for_test(&mut self) {
        self.phrases.clear();
    }
}
