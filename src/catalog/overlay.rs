//! Optional TOML overlay for the keyword and intent tables.
//!
//! Lets a deployment replace individual keyword/intent lists without a
//! rebuild. Only the routing tables are overridable — response text stays
//! built-in. This is the only fallible construction path in the crate; query
//! analysis itself never fails.
//!
//! File shape:
//!
//! ```toml
//! [keywords]
//! water = ["water", "bill", "leak"]
//!
//! [intents]
//! payment = ["pay", "owe"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{Catalog, Department, Intent};

/// Failure modes when loading a catalog overlay file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read overlay file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse overlay TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown department id '{0}' in [keywords]")]
    UnknownDepartment(String),
    #[error("unknown intent id '{0}' in [intents]")]
    UnknownIntent(String),
    #[error("empty keyword list for '{0}' — remove the entry or add keywords")]
    EmptyList(String),
    #[error("the fallback department 'gov' cannot carry keywords")]
    GovKeywords,
}

#[derive(Debug, Default, Deserialize)]
struct OverlayFile {
    #[serde(default)]
    keywords: HashMap<String, Vec<String>>,
    #[serde(default)]
    intents: HashMap<String, Vec<String>>,
}

/// Apply an overlay file on top of a catalog, replacing the listed entries.
pub(super) fn apply(mut catalog: Catalog, path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let overlay: OverlayFile = toml::from_str(&contents)?;

    for (id, words) in &overlay.keywords {
        let dept = Department::from_str(id)
            .ok_or_else(|| CatalogError::UnknownDepartment(id.clone()))?;
        if dept == Department::Gov {
            return Err(CatalogError::GovKeywords);
        }
        if words.is_empty() {
            return Err(CatalogError::EmptyList(id.clone()));
        }
        let slot = catalog
            .keywords
            .iter_mut()
            .find(|(d, _)| *d == dept)
            .map(|(_, list)| list)
            .expect("scored departments always present in keyword table");
        *slot = words.iter().map(|w| w.to_lowercase()).collect();
    }

    for (id, words) in &overlay.intents {
        let intent =
            Intent::from_str(id).ok_or_else(|| CatalogError::UnknownIntent(id.clone()))?;
        if words.is_empty() {
            return Err(CatalogError::EmptyList(id.clone()));
        }
        let slot = catalog
            .intents
            .iter_mut()
            .find(|(i, _)| *i == intent)
            .map(|(_, list)| list)
            .expect("all intents always present in intent table");
        *slot = words.iter().map(|w| w.to_lowercase()).collect();
    }

    info!(
        path = %path.display(),
        keyword_overrides = overlay.keywords.len(),
        intent_overrides = overlay.intents.len(),
        "catalog overlay applied"
    );
    Ok(catalog)
}
