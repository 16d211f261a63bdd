use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{ActiveSites, IntersectionSet, SiteCatalog};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What survives between runs: the cell being viewed and its selection.
/// The column filter is derived again from `highlight` on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cell: String,
    pub active_sites: ActiveSites,
    pub highlight: Option<IntersectionSet>,
}

pub fn save(path: &Path, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), cell = %snapshot.cell, "saved session");
    Ok(())
}

/// Best-effort load. Anything unreadable or inconsistent with `catalog` is
/// dropped with a warning and the caller starts fresh.
pub fn load(path: &Path, catalog: &SiteCatalog) -> Option<SessionSnapshot> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot read session; starting fresh");
            return None;
        }
    };
    let snapshot: SessionSnapshot = match serde_json::from_str(&text) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot parse session; starting fresh");
            return None;
        }
    };
    if let Err(reason) = validate(&snapshot, catalog) {
        warn!(path = %path.display(), reason = %reason, "discarding stale session");
        return None;
    }
    Some(snapshot)
}

fn validate(snapshot: &SessionSnapshot, catalog: &SiteCatalog) -> Result<(), String> {
    if snapshot.active_sites.is_empty() {
        return Err("no active sites".to_string());
    }
    if let Some(site) = snapshot.active_sites.iter().find(|s| !catalog.contains(s)) {
        return Err(format!("unknown active site {site}"));
    }
    if let Some(highlight) = &snapshot.highlight {
        if highlight.members().is_empty() {
            return Err("highlight without members".to_string());
        }
        if let Some(site) = highlight.members().iter().find(|s| !catalog.contains(s)) {
            return Err(format!("unknown highlighted site {site}"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/session.rs"]
mod tests;
