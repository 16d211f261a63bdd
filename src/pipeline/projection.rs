use serde::Serialize;

use crate::input::CellData;
use crate::model::{
    ColumnFilter, IntersectionSet, Row, SelectionState, SiteCatalog, SiteId, SortSpec,
};
use crate::pipeline::filter::visible_rows;

#[derive(Debug, Clone, Copy)]
pub struct ProjectionInputs<'a> {
    pub cell_name: &'a str,
    pub cell: Option<&'a CellData>,
    pub state: &'a SelectionState,
    pub sort: &'a SortSpec,
    pub catalog: &'a SiteCatalog,
}

/// Everything both surfaces render from after one interaction.
#[derive(Debug, Clone, Serialize)]
pub struct ViewProjection<'a> {
    pub cell: &'a str,
    pub placeholder: bool,
    pub rows: &'a [Row],
    pub visibility_filter: &'a ColumnFilter,
    pub sort_order: &'a SortSpec,
    pub intersection_sets: &'a [IntersectionSet],
    pub active_sites: Vec<&'a SiteId>,
    pub highlight: Option<&'a IntersectionSet>,
}

impl<'a> ViewProjection<'a> {
    pub fn visible_rows(&self) -> impl Iterator<Item = &'a Row> + 'a {
        visible_rows(self.rows, self.visibility_filter)
    }
}

/// An unknown cell projects to empty rows and sets rather than failing.
pub fn project<'a>(inputs: &ProjectionInputs<'a>) -> ViewProjection<'a> {
    let rows = inputs.cell.map_or(&[][..], |c| c.rows.as_slice());
    let intersection_sets = inputs.cell.map_or(&[][..], |c| c.sets.as_slice());
    ViewProjection {
        cell: inputs.cell_name,
        placeholder: inputs.cell.is_none(),
        rows,
        visibility_filter: &inputs.state.filter,
        sort_order: inputs.sort,
        intersection_sets,
        active_sites: inputs.state.active_sites.in_catalog_order(inputs.catalog),
        highlight: inputs.state.highlight.as_ref(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/projection.rs"]
mod tests;
