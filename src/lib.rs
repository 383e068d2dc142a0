//! munibot — a demo assistant for St. Louis municipal services.
//!
//! All "intelligence" is rule-based lookup over immutable tables: keyword
//! matching routes a query to simulated departments, a complexity tier picks
//! how elaborate the cosmetic status narration looks, and responses are canned
//! or templated text. See `catalog` for the tables, `analysis` for the routing
//! pipeline, and `agent` for the orchestrator.

pub mod agent;
pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod composer;
pub mod config;
pub mod narrator;
pub mod session;

pub use agent::SuperAgent;
pub use analysis::QueryAnalysis;
pub use catalog::Catalog;
pub use composer::AgentResponse;
