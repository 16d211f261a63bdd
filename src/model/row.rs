use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::site::{SiteId, avg_log_fc_column, p_val_adj_column};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub avg_log_fc: f64,
    pub p_val_adj: Option<f64>,
}

/// One gene of one cell type. Sites without an entry were not measured.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub gene: String,
    pub measurements: BTreeMap<SiteId, Measurement>,
}

impl Row {
    pub fn measurement(&self, site: &SiteId) -> Option<&Measurement> {
        self.measurements.get(site)
    }

    pub fn is_measured(&self, site: &SiteId) -> bool {
        self.measurements.contains_key(site)
    }
}

// Rows go out in the flat column layout the table surface reads.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.measurements.len() * 2))?;
        map.serialize_entry("gene", &self.gene)?;
        for (site, m) in &self.measurements {
            map.serialize_entry(&avg_log_fc_column(site), &m.avg_log_fc)?;
            map.serialize_entry(&p_val_adj_column(site), &m.p_val_adj)?;
        }
        map.end()
    }
}
