use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::intersection::IntersectionSet;
use crate::model::site::{SiteCatalog, SiteId};

/// Sites currently shown in the table. Never empty once built from a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveSites(BTreeSet<SiteId>);

impl ActiveSites {
    pub fn all(catalog: &SiteCatalog) -> Self {
        Self(catalog.ids().cloned().collect())
    }

    pub fn from_sites<I: IntoIterator<Item = SiteId>>(sites: I) -> Self {
        Self(sites.into_iter().collect())
    }

    pub fn contains(&self, site: &SiteId) -> bool {
        self.0.contains(site)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteId> + '_ {
        self.0.iter()
    }

    /// Active sites in catalog order, for surfaces that list them.
    pub fn in_catalog_order<'a>(&'a self, catalog: &'a SiteCatalog) -> Vec<&'a SiteId> {
        catalog.ids().filter(|id| self.contains(id)).collect()
    }

    pub(crate) fn insert(&mut self, site: SiteId) {
        self.0.insert(site);
    }

    pub(crate) fn remove(&mut self, site: &SiteId) {
        self.0.remove(site);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMark {
    #[serde(rename = "+")]
    Include,
    #[serde(rename = "-")]
    Exclude,
}

impl FilterMark {
    pub fn symbol(self) -> char {
        match self {
            FilterMark::Include => '+',
            FilterMark::Exclude => '-',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMark {
    pub id: String,
    pub site: SiteId,
    pub value: FilterMark,
}

/// Column id -> mark. Columns without an entry carry no mark.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnFilter {
    marks: Vec<ColumnMark>,
}

impl ColumnFilter {
    pub fn new(marks: Vec<ColumnMark>) -> Self {
        Self { marks }
    }

    pub fn get(&self, column: &str) -> Option<FilterMark> {
        self.marks
            .iter()
            .find(|m| m.id == column)
            .map(|m| m.value)
    }

    pub fn marks(&self) -> &[ColumnMark] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub active_sites: ActiveSites,
    pub highlight: Option<IntersectionSet>,
    pub filter: ColumnFilter,
}

impl SelectionState {
    /// Nothing highlighted, every catalog site active.
    pub fn initial(catalog: &SiteCatalog) -> Self {
        Self {
            active_sites: ActiveSites::all(catalog),
            highlight: None,
            filter: ColumnFilter::default(),
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight.is_some()
    }
}
