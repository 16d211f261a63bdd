use serde::{Deserialize, Serialize};

use crate::model::site::SiteId;

/// One Venn segment: the genes measured by exactly this combination of sites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSet {
    #[serde(rename = "sets")]
    members: Vec<SiteId>,
    size: u64,
}

impl IntersectionSet {
    pub fn new(members: Vec<SiteId>, size: u64) -> Self {
        Self { members, size }
    }

    pub fn members(&self) -> &[SiteId] {
        &self.members
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn contains(&self, site: &SiteId) -> bool {
        self.members.iter().any(|m| m == site)
    }

    /// Order-insensitive comparison of member sets.
    pub fn has_members(&self, sites: &[SiteId]) -> bool {
        self.members.len() == sites.len() && sites.iter().all(|s| self.contains(s))
    }

    pub fn label(&self) -> String {
        self.members
            .iter()
            .map(SiteId::as_str)
            .collect::<Vec<_>>()
            .join(" & ")
    }
}
