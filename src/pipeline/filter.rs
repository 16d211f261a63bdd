use crate::model::site::avg_log_fc_column;
use crate::model::{ColumnFilter, ColumnMark, FilterMark, IntersectionSet, Row, SiteId};

/// Marks every site's log-fold-change column `+` when the site belongs to
/// `clicked`, `-` otherwise. One entry per site, in `all_sites` order.
pub fn derive_filter<'a, I>(clicked: &IntersectionSet, all_sites: I) -> ColumnFilter
where
    I: IntoIterator<Item = &'a SiteId>,
{
    let marks = all_sites
        .into_iter()
        .map(|site| ColumnMark {
            id: avg_log_fc_column(site),
            site: site.clone(),
            value: if clicked.contains(site) {
                FilterMark::Include
            } else {
                FilterMark::Exclude
            },
        })
        .collect();
    ColumnFilter::new(marks)
}

/// Table row-visibility predicate: `+` needs a value, `-` needs none.
pub fn row_passes(row: &Row, filter: &ColumnFilter) -> bool {
    filter.marks().iter().all(|mark| match mark.value {
        FilterMark::Include => row.is_measured(&mark.site),
        FilterMark::Exclude => !row.is_measured(&mark.site),
    })
}

pub fn visible_rows<'a>(
    rows: &'a [Row],
    filter: &'a ColumnFilter,
) -> impl Iterator<Item = &'a Row> + 'a {
    rows.iter().filter(move |row| row_passes(row, filter))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/filter.rs"]
mod tests;
