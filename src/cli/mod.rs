//! Terminal front-ends: the interactive chat REPL and the one-shot
//! `ask` / `analyze` commands.

pub mod ask;
pub mod chat;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::agent::SuperAgent;
use crate::catalog::Catalog;
use crate::config::MunibotConfig;

/// Build the agent from config: built-in catalog, plus the overlay file when
/// one is configured.
pub fn build_agent(config: &MunibotConfig) -> Result<SuperAgent> {
    let catalog = match &config.catalog_overlay {
        Some(path) => Catalog::with_overlay(path)
            .with_context(|| format!("loading catalog overlay '{}'", path.display()))?,
        None => Catalog::builtin().clone(),
    };
    Ok(SuperAgent::with_fallback(
        Arc::new(catalog),
        config.delay_scale,
        config.fallback_department,
    ))
}
