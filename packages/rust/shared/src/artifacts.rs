//! JSON artifacts passed between the pipeline stages.
//!
//! - `drive_links.json`: written by discovery, read by extraction.
//! - `curricula.json`: written by extraction, read by the advisor at startup.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AdvisorError, Result};
use crate::types::{CurriculumStore, DocumentLinkSet};

/// Write `value` as pretty-printed UTF-8 JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AdvisorError::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| AdvisorError::parse(format!("failed to serialize {}: {e}", path.display())))?;

    std::fs::write(path, content).map_err(|e| AdvisorError::io(path, e))?;
    tracing::debug!(?path, "artifact written");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| AdvisorError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| AdvisorError::parse(format!("failed to parse {}: {e}", path.display())))
}

/// Load the link set produced by discovery. The file must exist.
pub fn load_link_set(path: &Path) -> Result<DocumentLinkSet> {
    if !path.exists() {
        return Err(AdvisorError::config(format!(
            "{} not found. Run `itmo-advisor discover` first.",
            path.display()
        )));
    }
    read_json(path)
}

/// Load the curriculum store. A missing file yields an empty store.
pub fn load_curricula(path: &Path) -> Result<CurriculumStore> {
    if !path.exists() {
        tracing::warn!(?path, "curriculum file not found, starting with an empty store");
        return Ok(CurriculumStore::new());
    }
    read_json(path)
}
