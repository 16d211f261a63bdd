use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a tissue interrogation site, e.g. `UCSF`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SiteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: SiteId,
    #[serde(default)]
    pub name: String,
}

/// Ordered, duplicate-free list of every site of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SiteCatalog {
    sites: Vec<Site>,
}

impl SiteCatalog {
    /// Callers go through `input::sites`, which rejects empty and duplicate catalogs.
    pub(crate) fn new(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn ids(&self) -> impl Iterator<Item = &SiteId> + '_ {
        self.sites.iter().map(|s| &s.id)
    }

    pub fn contains(&self, id: &SiteId) -> bool {
        self.sites.iter().any(|s| &s.id == id)
    }

    pub fn display_name(&self, id: &SiteId) -> Option<&str> {
        self.sites
            .iter()
            .find(|s| &s.id == id)
            .map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

pub fn avg_log_fc_column(site: &SiteId) -> String {
    format!("f_{}_avgLogFc", site)
}

pub fn p_val_adj_column(site: &SiteId) -> String {
    format!("f_{}_p_val_adj", site)
}
