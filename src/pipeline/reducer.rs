use tracing::warn;

use crate::model::{IntersectionSet, SelectionState, SiteCatalog, SiteId};
use crate::pipeline::filter::derive_filter;
use crate::pipeline::toggle::toggle_site;

/// User interactions the two views can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ClickIntersection(IntersectionSet),
    ClickSite(SiteId),
    SelectCell(String),
}

/// Next selection state. Pure: the same state and event always give the same
/// result.
pub fn reduce(state: &SelectionState, event: &Event, catalog: &SiteCatalog) -> SelectionState {
    match event {
        Event::ClickIntersection(set) => SelectionState {
            active_sites: state.active_sites.clone(),
            highlight: Some(set.clone()),
            filter: derive_filter(set, catalog.ids()),
        },
        Event::ClickSite(site) => {
            if !catalog.contains(site) {
                warn!(site = %site, "ignoring click on a site outside the catalog");
                return state.clone();
            }
            SelectionState {
                active_sites: toggle_site(&state.active_sites, site),
                ..state.clone()
            }
        }
        Event::SelectCell(_) => SelectionState::initial(catalog),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/reducer.rs"]
mod tests;
