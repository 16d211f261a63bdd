use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::events::{ScriptEvent, load_events, parse_events};
use super::sites::{build_catalog, builtin_sites};
use super::*;
use crate::model::{Site, SiteId};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("atlas_dataviz_input_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const ATLAS: &str = r#"{
    "sites": [{"id": "A", "name": "Site A"}, {"id": "B"}],
    "result": {"cells": {
        "Podocyte": {
            "rows": {"G1": {"gene": "G1", "f_A_avgLogFc": 1.0}},
            "sets": [{"sets": ["A"], "size": 10}, {"sets": ["B"], "size": 5}, {"sets": ["A", "B"], "size": 3}]
        },
        "Endothelial": {"rows": [], "sets": []}
    }}
}"#;

#[test]
fn test_load_plain_json() {
    let dir = make_temp_dir();
    let path = dir.join("atlas.json");
    fs::write(&path, ATLAS).unwrap();

    let atlas = load_atlas(&path, None).unwrap();
    let names: Vec<&str> = atlas.dataset.cell_names().collect();
    assert_eq!(names, vec!["Endothelial", "Podocyte"]);
    assert_eq!(atlas.catalog.display_name(&SiteId::from("B")), Some("B"));
}

#[test]
fn test_load_gzip_json() {
    let dir = make_temp_dir();
    let path = dir.join("atlas.json.gz");
    let mut enc = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    enc.write_all(ATLAS.as_bytes()).unwrap();
    enc.finish().unwrap();

    let atlas = load_atlas(&path, None).unwrap();
    assert_eq!(atlas.dataset.len(), 2);
    assert_eq!(atlas.dataset.cell("Podocyte").unwrap().sets.len(), 3);
}

#[test]
fn test_sites_file_overrides_embedded_catalog() {
    let dir = make_temp_dir();
    let path = dir.join("atlas.json");
    fs::write(&path, ATLAS).unwrap();
    let sites = dir.join("sites.json");
    fs::write(
        &sites,
        r#"[{"id": "B", "name": "Second"}, {"id": "A", "name": "First"}]"#,
    )
    .unwrap();

    let atlas = load_atlas(&path, Some(&sites)).unwrap();
    let ids: Vec<&str> = atlas.catalog.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
}

#[test]
fn test_load_reports_path_on_bad_json() {
    let dir = make_temp_dir();
    let path = dir.join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_atlas(&path, None).unwrap_err();
    assert!(matches!(err, InputError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = load_atlas(&dir.join("absent.json"), None).unwrap_err();
    assert!(matches!(err, InputError::Io(_)));
}

#[test]
fn test_build_catalog_validation() {
    assert!(matches!(
        build_catalog(Vec::new()),
        Err(InputError::InvalidCatalog(_))
    ));
    let dup = vec![
        Site {
            id: SiteId::from("A"),
            name: "x".to_string(),
        },
        Site {
            id: SiteId::from("A"),
            name: "y".to_string(),
        },
    ];
    assert!(matches!(
        build_catalog(dup),
        Err(InputError::InvalidCatalog(_))
    ));
    let blank = vec![Site {
        id: SiteId::from(" "),
        name: String::new(),
    }];
    assert!(build_catalog(blank).is_err());
}

#[test]
fn test_builtin_sites_are_unique() {
    let defs = builtin_sites();
    assert!(!defs.is_empty());
    let sites = defs
        .iter()
        .map(|d| Site {
            id: SiteId::from(d.id),
            name: d.name.to_string(),
        })
        .collect();
    assert!(build_catalog(sites).is_ok());
}

#[test]
fn test_parse_event_script() {
    let events = parse_events(
        r#"[
            {"type": "click_intersection", "sets": ["A", "B"]},
            {"type": "click_site", "site": "A"},
            {"type": "select_cell", "cell": "Endothelial"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        events,
        vec![
            ScriptEvent::ClickIntersection {
                sets: vec![SiteId::from("A"), SiteId::from("B")]
            },
            ScriptEvent::ClickSite {
                site: SiteId::from("A")
            },
            ScriptEvent::SelectCell {
                cell: "Endothelial".to_string()
            },
        ]
    );
    assert!(parse_events(r#"[{"type": "double_click"}]"#).is_err());
}

#[test]
fn test_load_event_script_file() {
    let dir = make_temp_dir();
    let path = dir.join("events.json");
    fs::write(&path, r#"[{"type": "click_site", "site": "B"}]"#).unwrap();
    assert_eq!(load_events(&path).unwrap().len(), 1);
}
