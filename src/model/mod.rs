pub mod intersection;
pub mod row;
pub mod selection;
pub mod site;
pub mod sort;

pub use intersection::IntersectionSet;
pub use row::{Measurement, Row};
pub use selection::{ActiveSites, ColumnFilter, ColumnMark, FilterMark, SelectionState};
pub use site::{Site, SiteCatalog, SiteId};
pub use sort::{SortColumn, SortDirection, SortSpec};
