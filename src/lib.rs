//! Derived-state engine behind the coordinated Venn diagram and gene table of
//! a multi-site expression atlas.
//!
//! The dataset is loaded and validated once ([`input`]); a [`viewer::Viewer`]
//! then owns the selection state of one cell type and folds user events
//! through the pure functions in [`pipeline`] into a
//! [`pipeline::ViewProjection`].

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod route;
pub mod session;
pub mod viewer;
