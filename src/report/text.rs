use crate::model::SiteCatalog;
use crate::pipeline::ViewProjection;
use crate::report::json::projection_stats;
use crate::report::{TotalsReport, format_fraction};

pub fn render_projection_text(projection: &ViewProjection<'_>, catalog: &SiteCatalog) -> String {
    let mut out = String::new();
    let stats = projection_stats(projection);

    out.push_str(&format!("Cell type: {}\n", projection.cell));
    if projection.placeholder {
        out.push_str("Unknown cell type; nothing to display.\n");
        return out;
    }
    out.push_str("==========\n\n");

    out.push_str("Venn diagram\n");
    for set in projection.intersection_sets {
        let marker = if projection.highlight == Some(set) {
            "*"
        } else {
            " "
        };
        out.push_str(&format!("{} {}: {}\n", marker, set.label(), set.size()));
    }
    out.push('\n');

    out.push_str("Active sites: ");
    let active: Vec<&str> = projection
        .active_sites
        .iter()
        .map(|id| catalog.display_name(id).unwrap_or(id.as_str()))
        .collect();
    out.push_str(&active.join(", "));
    out.push_str("\n\n");

    out.push_str("Data table\n");
    if projection.visibility_filter.is_empty() {
        out.push_str("Filter: none\n");
    } else {
        let marks: Vec<String> = projection
            .visibility_filter
            .marks()
            .iter()
            .map(|m| format!("{}{}", m.value.symbol(), m.site))
            .collect();
        out.push_str(&format!("Filter: {}\n", marks.join(" ")));
    }
    out.push_str("Default sort: ");
    let sort: Vec<String> = projection
        .sort_order
        .columns()
        .iter()
        .map(|c| format!("{} (total {})", c.id, c.total))
        .collect();
    out.push_str(&sort.join(", "));
    out.push('\n');
    out.push_str(&format!(
        "Visible rows: {} of {} ({})\n",
        stats.visible_rows,
        stats.total_rows,
        format_fraction(stats.visible_rows, stats.total_rows)
    ));

    out
}

pub fn render_totals_text(report: &TotalsReport<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Site totals for {}\n", report.cell));
    for entry in &report.totals {
        out.push_str(&format!("{}\t{}\t{}\n", entry.site, entry.name, entry.total));
    }
    out.push_str("Default sort:\n");
    for column in report.default_sort.columns() {
        out.push_str(&format!("{}\t{}\n", column.priority, column.id));
    }
    out
}
