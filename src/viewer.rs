use thiserror::Error;
use tracing::{debug, info, warn};

use crate::input::events::ScriptEvent;
use crate::input::{CellData, Dataset};
use crate::model::{IntersectionSet, SelectionState, SiteCatalog, SiteId, SortSpec};
use crate::pipeline::{
    Event, ProjectionInputs, SiteTotals, ViewProjection, compute_site_totals, derive_default_sort,
    project, reduce,
};
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown cell type {0:?}")]
    UnknownCellType(String),
}

/// One mounted data view: the selection state of a single cell type plus the
/// totals and default sort cached for it.
#[derive(Debug, Clone)]
pub struct Viewer<'d> {
    dataset: &'d Dataset,
    catalog: &'d SiteCatalog,
    cell_name: String,
    cell: Option<&'d CellData>,
    totals: SiteTotals,
    sort: SortSpec,
    state: SelectionState,
}

impl<'d> Viewer<'d> {
    /// Mounting an unknown cell still yields a viewer; it projects a
    /// placeholder and `check_scope` reports the problem.
    pub fn mount(dataset: &'d Dataset, catalog: &'d SiteCatalog, cell_name: &str) -> Self {
        let mut viewer = Self {
            dataset,
            catalog,
            cell_name: String::new(),
            cell: None,
            totals: SiteTotals::default(),
            sort: SortSpec::default(),
            state: SelectionState::initial(catalog),
        };
        viewer.enter_cell(cell_name);
        viewer
    }

    fn enter_cell(&mut self, name: &str) {
        self.cell_name = name.to_string();
        self.cell = self.dataset.cell(name);
        match self.cell {
            Some(cell) => {
                self.totals = compute_site_totals(&cell.sets);
                self.sort = derive_default_sort(&self.totals);
                info!(
                    cell = name,
                    rows = cell.rows.len(),
                    sets = cell.sets.len(),
                    "selected cell type"
                );
            }
            None => {
                self.totals = SiteTotals::default();
                self.sort = SortSpec::default();
                warn!(cell = name, "unknown cell type; showing placeholder view");
            }
        }
    }

    pub fn check_scope(&self) -> Result<(), EngineError> {
        match self.cell {
            Some(_) => Ok(()),
            None => Err(EngineError::UnknownCellType(self.cell_name.clone())),
        }
    }

    /// Reduces one event and commits the result before returning.
    pub fn dispatch(&mut self, event: Event) -> Result<(), EngineError> {
        debug!(?event, cell = %self.cell_name, "dispatch");
        let next = reduce(&self.state, &event, self.catalog);
        self.state = next;
        match &event {
            Event::SelectCell(name) => {
                self.enter_cell(name);
                self.check_scope()
            }
            _ => Ok(()),
        }
    }

    /// Applies the cell named by the navigation route if it differs from the
    /// current one.
    pub fn sync_route(&mut self, route_cell: &str) -> Result<(), EngineError> {
        if route_cell == self.cell_name {
            return self.check_scope();
        }
        self.dispatch(Event::SelectCell(route_cell.to_string()))
    }

    pub fn apply_script(&mut self, event: &ScriptEvent) -> Result<(), EngineError> {
        match event {
            ScriptEvent::ClickIntersection { sets } => match self.find_intersection(sets) {
                Some(set) => self.dispatch(Event::ClickIntersection(set.clone())),
                None => {
                    warn!(
                        cell = %self.cell_name,
                        members = ?sets,
                        "no intersection with these members; click ignored"
                    );
                    Ok(())
                }
            },
            ScriptEvent::ClickSite { site } => self.dispatch(Event::ClickSite(site.clone())),
            ScriptEvent::SelectCell { cell } => self.dispatch(Event::SelectCell(cell.clone())),
        }
    }

    pub fn find_intersection(&self, members: &[SiteId]) -> Option<&'d IntersectionSet> {
        self.cell
            .and_then(|cell| cell.sets.iter().find(|set| set.has_members(members)))
    }

    pub fn projection(&self) -> ViewProjection<'_> {
        project(&ProjectionInputs {
            cell_name: &self.cell_name,
            cell: self.cell,
            state: &self.state,
            sort: &self.sort,
            catalog: self.catalog,
        })
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cell: self.cell_name.clone(),
            active_sites: self.state.active_sites.clone(),
            highlight: self.state.highlight.clone(),
        }
    }

    /// Re-applies a saved selection. Snapshots taken on another cell are
    /// skipped; returns whether anything was restored.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> bool {
        if snapshot.cell != self.cell_name {
            debug!(
                saved = %snapshot.cell,
                current = %self.cell_name,
                "session belongs to another cell; not restoring"
            );
            return false;
        }
        if snapshot.active_sites.is_empty() {
            return false;
        }
        self.state = SelectionState::initial(self.catalog);
        self.state.active_sites = snapshot.active_sites.clone();
        if let Some(highlight) = &snapshot.highlight {
            match self.find_intersection(highlight.members()) {
                Some(set) => {
                    self.state = reduce(
                        &self.state,
                        &Event::ClickIntersection(set.clone()),
                        self.catalog,
                    );
                }
                None => warn!(
                    cell = %self.cell_name,
                    intersection = %highlight.label(),
                    "saved highlight is not an intersection of this cell; dropping it"
                ),
            }
        }
        true
    }

    pub fn cell_name(&self) -> &str {
        &self.cell_name
    }

    pub fn catalog(&self) -> &'d SiteCatalog {
        self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn totals(&self) -> &SiteTotals {
        &self.totals
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/viewer.rs"]
mod tests;
