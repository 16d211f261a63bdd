use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::info;

pub mod atlas;
pub mod events;
pub mod sites;

use crate::model::{IntersectionSet, Row, SiteCatalog};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid site catalog: {0}")]
    InvalidCatalog(String),
    #[error("malformed intersection set #{index} in cell {cell:?}: {reason}")]
    MalformedIntersectionSet {
        cell: String,
        index: usize,
        reason: String,
    },
    #[error("malformed row {gene:?} in cell {cell:?}: {reason}")]
    MalformedRow {
        cell: String,
        gene: String,
        reason: String,
    },
}

/// Rows and Venn segments of one cell type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    pub rows: Vec<Row>,
    pub sets: Vec<IntersectionSet>,
}

/// Immutable atlas keyed by cell-type name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    cells: BTreeMap<String, CellData>,
}

impl Dataset {
    pub fn new(cells: BTreeMap<String, CellData>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, name: &str) -> Option<&CellData> {
        self.cells.get(name)
    }

    pub fn cell_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Atlas {
    pub catalog: SiteCatalog,
    pub dataset: Dataset,
}

/// Loads and validates an atlas file. `sites_path` overrides any catalog
/// embedded in the dataset.
pub fn load_atlas(path: &Path, sites_path: Option<&Path>) -> Result<Atlas, InputError> {
    let mut text = String::new();
    open_maybe_gz(path)?.read_to_string(&mut text)?;
    let override_sites = match sites_path {
        Some(p) => Some(sites::read_sites_file(p)?),
        None => None,
    };
    let atlas = atlas::parse_atlas(&text, override_sites).map_err(|e| match e {
        atlas::ParseFailure::Json(source) => InputError::Json {
            path: path.to_path_buf(),
            source,
        },
        atlas::ParseFailure::Input(err) => err,
    })?;
    info!(
        path = %path.display(),
        cells = atlas.dataset.len(),
        sites = atlas.catalog.len(),
        "loaded atlas"
    );
    Ok(atlas)
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
