use std::collections::BTreeMap;

use crate::model::site::{SiteId, p_val_adj_column};
use crate::model::{IntersectionSet, SortColumn, SortDirection, SortSpec};

/// Per-site sum of the sizes of every intersection the site belongs to.
///
/// Genes shared by several sites count once for each of them, so the totals
/// do not sum to the number of distinct genes. Iteration follows the order in
/// which sites first appear in the sets; equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct SiteTotals {
    totals: BTreeMap<SiteId, u64>,
    first_seen: Vec<SiteId>,
}

impl PartialEq for SiteTotals {
    fn eq(&self, other: &Self) -> bool {
        self.totals == other.totals
    }
}

impl Eq for SiteTotals {}

impl SiteTotals {
    pub fn get(&self, site: &SiteId) -> Option<u64> {
        self.totals.get(site).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SiteId, u64)> + '_ {
        self.first_seen
            .iter()
            .filter_map(|site| self.totals.get(site).map(|total| (site, *total)))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

pub fn compute_site_totals(sets: &[IntersectionSet]) -> SiteTotals {
    let mut totals: BTreeMap<SiteId, u64> = BTreeMap::new();
    let mut first_seen = Vec::new();
    for set in sets {
        for site in set.members() {
            let total = totals.entry(site.clone()).or_insert_with(|| {
                first_seen.push(site.clone());
                0
            });
            *total += set.size();
        }
    }
    SiteTotals { totals, first_seen }
}

/// Descending p-value sort per site, largest total first. Equal totals keep
/// the order in which the sites first appeared in the sets.
pub fn derive_default_sort(totals: &SiteTotals) -> SortSpec {
    let mut ranked: Vec<(&SiteId, u64)> = totals.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let columns = ranked
        .into_iter()
        .enumerate()
        .map(|(priority, (site, total))| SortColumn {
            id: p_val_adj_column(site),
            site: site.clone(),
            total,
            direction: SortDirection::Desc,
            priority,
        })
        .collect();

    SortSpec::new(columns)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/aggregate.rs"]
mod tests;
