use super::*;
use crate::input::atlas::parse_atlas;
use crate::input::events::ScriptEvent;
use crate::report::json::{render_projection_json, render_totals_json};
use crate::report::text::{render_projection_text, render_totals_text};
use crate::viewer::Viewer;

const ATLAS: &str = r#"{
    "sites": [{"id": "A", "name": "Site A"}, {"id": "B", "name": "Site B"}, {"id": "C", "name": "Site C"}],
    "result": {"cells": {"Podocyte": {
        "rows": [
            {"gene": "G1", "f_A_avgLogFc": 1.0},
            {"gene": "G2", "f_A_avgLogFc": 1.0, "f_B_avgLogFc": 0.5}
        ],
        "sets": [{"sets": ["A"], "size": 10}, {"sets": ["B"], "size": 5}, {"sets": ["A", "B"], "size": 3}]
    }}}
}"#;

#[test]
fn test_format_fraction() {
    assert_eq!(format_fraction(1, 4), "0.250000");
    assert_eq!(format_fraction(0, 0), "0.000000");
}

#[test]
fn test_totals_report_catalog_order_skips_absent_sites() {
    let atlas = parse_atlas(ATLAS, None).unwrap();
    let viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, "Podocyte");
    let report = build_totals_report(
        "Podocyte",
        viewer.totals(),
        viewer.sort(),
        &atlas.catalog,
    );

    let rows: Vec<(&str, u64)> = report
        .totals
        .iter()
        .map(|e| (e.site.as_str(), e.total))
        .collect();
    assert_eq!(rows, vec![("A", 13), ("B", 8)]);

    let text = render_totals_text(&report);
    assert!(text.contains("A\tSite A\t13"));
    assert!(text.contains("0\tf_A_p_val_adj"));

    let json: serde_json::Value =
        serde_json::from_str(&render_totals_json(&report).unwrap()).unwrap();
    assert_eq!(json["default_sort"][1]["id"], "f_B_p_val_adj");
}

#[test]
fn test_projection_text_summary() {
    let atlas = parse_atlas(ATLAS, None).unwrap();
    let mut viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, "Podocyte");
    viewer
        .apply_script(&ScriptEvent::ClickIntersection {
            sets: vec!["A".into()],
        })
        .unwrap();

    let text = render_projection_text(&viewer.projection(), &atlas.catalog);
    assert!(text.contains("Cell type: Podocyte"));
    assert!(text.contains("* A: 10"));
    assert!(text.contains("Filter: +A -B -C"));
    assert!(text.contains("Active sites: Site A, Site B, Site C"));
    assert!(text.contains("Visible rows: 1 of 2 (0.500000)"));
}

#[test]
fn test_projection_text_placeholder() {
    let atlas = parse_atlas(ATLAS, None).unwrap();
    let viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, "Nope");
    let text = render_projection_text(&viewer.projection(), &atlas.catalog);
    assert!(text.contains("Unknown cell type"));
}

#[test]
fn test_projection_json_document() {
    let atlas = parse_atlas(ATLAS, None).unwrap();
    let viewer = Viewer::mount(&atlas.dataset, &atlas.catalog, "Podocyte");
    let json: serde_json::Value =
        serde_json::from_str(&render_projection_json(&viewer.projection()).unwrap()).unwrap();

    assert_eq!(json["tool"], "atlas-dataviz");
    assert_eq!(json["stats"]["total_rows"], 2);
    assert_eq!(json["stats"]["visible_rows"], 2);
    assert_eq!(json["stats"]["active_sites"], 3);
    assert_eq!(json["projection"]["cell"], "Podocyte");
    assert_eq!(json["projection"]["placeholder"], false);
}
