pub mod aggregate;
pub mod filter;
pub mod projection;
pub mod reducer;
pub mod toggle;

pub use aggregate::{SiteTotals, compute_site_totals, derive_default_sort};
pub use filter::{derive_filter, row_passes, visible_rows};
pub use projection::{ProjectionInputs, ViewProjection, project};
pub use reducer::{Event, reduce};
pub use toggle::toggle_site;
