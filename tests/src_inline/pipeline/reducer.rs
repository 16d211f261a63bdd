use super::*;
use crate::input::sites::build_catalog;
use crate::model::{ActiveSites, FilterMark, Site};

fn catalog() -> SiteCatalog {
    build_catalog(vec![
        Site {
            id: SiteId::from("A"),
            name: "Site A".to_string(),
        },
        Site {
            id: SiteId::from("B"),
            name: "Site B".to_string(),
        },
    ])
    .unwrap()
}

fn click(members: &[&str], size: u64) -> Event {
    Event::ClickIntersection(IntersectionSet::new(
        members.iter().map(|m| SiteId::from(*m)).collect(),
        size,
    ))
}

#[test]
fn test_initial_state() {
    let state = SelectionState::initial(&catalog());
    assert_eq!(state.active_sites.len(), 2);
    assert!(!state.is_highlighted());
    assert!(state.filter.is_empty());
}

#[test]
fn test_click_intersection_highlights_and_filters() {
    let catalog = catalog();
    let state = reduce(&SelectionState::initial(&catalog), &click(&["A"], 10), &catalog);
    assert_eq!(state.highlight.as_ref().map(|h| h.size()), Some(10));
    assert_eq!(state.filter.get("f_A_avgLogFc"), Some(FilterMark::Include));
    assert_eq!(state.filter.get("f_B_avgLogFc"), Some(FilterMark::Exclude));
    assert_eq!(state.active_sites, ActiveSites::all(&catalog));
}

#[test]
fn test_click_same_intersection_is_idempotent() {
    let catalog = catalog();
    let once = reduce(&SelectionState::initial(&catalog), &click(&["A", "B"], 3), &catalog);
    let twice = reduce(&once, &click(&["A", "B"], 3), &catalog);
    assert_eq!(once, twice);
}

#[test]
fn test_click_site_keeps_highlight() {
    let catalog = catalog();
    let highlighted = reduce(&SelectionState::initial(&catalog), &click(&["B"], 5), &catalog);
    let toggled = reduce(&highlighted, &Event::ClickSite(SiteId::from("A")), &catalog);
    assert_eq!(toggled.highlight, highlighted.highlight);
    assert_eq!(toggled.filter, highlighted.filter);
    assert_eq!(toggled.active_sites.len(), 1);
    assert!(toggled.active_sites.contains(&SiteId::from("B")));
}

#[test]
fn test_click_unknown_site_is_ignored() {
    let catalog = catalog();
    let state = SelectionState::initial(&catalog);
    let next = reduce(&state, &Event::ClickSite(SiteId::from("Z")), &catalog);
    assert_eq!(next, state);
}

#[test]
fn test_select_cell_resets() {
    let catalog = catalog();
    let mut state = SelectionState::initial(&catalog);
    state = reduce(&state, &click(&["A"], 10), &catalog);
    state = reduce(&state, &Event::ClickSite(SiteId::from("A")), &catalog);
    let reset = reduce(&state, &Event::SelectCell("Podocyte".to_string()), &catalog);
    assert_eq!(reset, SelectionState::initial(&catalog));
}
