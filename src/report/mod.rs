pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::{SiteCatalog, SiteId, SortSpec};
use crate::pipeline::SiteTotals;

/// Counts shown next to a projection in the summary outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    pub total_rows: usize,
    pub visible_rows: usize,
    pub intersection_sets: usize,
    pub active_sites: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteTotalEntry<'a> {
    pub site: &'a SiteId,
    pub name: &'a str,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsReport<'a> {
    pub cell: &'a str,
    pub totals: Vec<SiteTotalEntry<'a>>,
    pub default_sort: &'a SortSpec,
}

/// Totals in catalog order; sites absent from every intersection are left out.
pub fn build_totals_report<'a>(
    cell: &'a str,
    totals: &SiteTotals,
    sort: &'a SortSpec,
    catalog: &'a SiteCatalog,
) -> TotalsReport<'a> {
    let totals = catalog
        .sites()
        .iter()
        .filter_map(|site| {
            totals.get(&site.id).map(|total| SiteTotalEntry {
                site: &site.id,
                name: site.name.as_str(),
                total,
            })
        })
        .collect();
    TotalsReport {
        cell,
        totals,
        default_sort: sort,
    }
}

pub fn format_fraction(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.000000".to_string();
    }
    format!("{:.6}", part as f64 / whole as f64)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
