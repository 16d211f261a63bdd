use serde::Serialize;

use crate::pipeline::ViewProjection;
use crate::report::{ProjectionStats, TotalsReport};

#[derive(Debug, Serialize)]
struct ProjectionDocument<'p, 'a> {
    tool: &'static str,
    version: &'static str,
    stats: ProjectionStats,
    projection: &'p ViewProjection<'a>,
}

pub fn projection_stats(projection: &ViewProjection<'_>) -> ProjectionStats {
    ProjectionStats {
        total_rows: projection.rows.len(),
        visible_rows: projection.visible_rows().count(),
        intersection_sets: projection.intersection_sets.len(),
        active_sites: projection.active_sites.len(),
    }
}

pub fn render_projection_json(projection: &ViewProjection<'_>) -> serde_json::Result<String> {
    let doc = ProjectionDocument {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        stats: projection_stats(projection),
        projection,
    };
    serde_json::to_string_pretty(&doc)
}

pub fn render_totals_json(report: &TotalsReport<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
