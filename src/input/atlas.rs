use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::input::sites::{build_catalog, builtin_catalog};
use crate::input::{Atlas, CellData, Dataset, InputError};
use crate::model::site::{avg_log_fc_column, p_val_adj_column};
use crate::model::{IntersectionSet, Measurement, Row, Site, SiteCatalog, SiteId};

#[derive(Debug)]
pub enum ParseFailure {
    Json(serde_json::Error),
    Input(InputError),
}

impl From<InputError> for ParseFailure {
    fn from(value: InputError) -> Self {
        ParseFailure::Input(value)
    }
}

#[derive(Debug, Deserialize)]
struct RawAtlas {
    #[serde(default)]
    sites: Option<Vec<Site>>,
    result: RawResult,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    cells: BTreeMap<String, RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    rows: RawRows,
    #[serde(default)]
    sets: Vec<RawSet>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRows {
    Keyed(Map<String, Value>),
    List(Vec<Value>),
}

impl Default for RawRows {
    fn default() -> Self {
        RawRows::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
struct RawSet {
    sets: Vec<String>,
    size: RawSize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSize {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Parses atlas JSON. The catalog comes from `override_sites`, then from the
/// file's `sites`, then from the built-in list.
pub fn parse_atlas(
    text: &str,
    override_sites: Option<Vec<Site>>,
) -> Result<Atlas, ParseFailure> {
    let raw: RawAtlas = serde_json::from_str(text).map_err(ParseFailure::Json)?;

    let catalog = match override_sites.or(raw.sites) {
        Some(sites) => build_catalog(sites)?,
        None => builtin_catalog(),
    };

    let mut cells = BTreeMap::new();
    for (name, raw_cell) in raw.result.cells {
        let sets = convert_sets(&name, raw_cell.sets, &catalog)?;
        let rows = convert_rows(&name, raw_cell.rows, &catalog)?;
        debug!(cell = %name, rows = rows.len(), sets = sets.len(), "parsed cell");
        cells.insert(name, CellData { rows, sets });
    }

    Ok(Atlas {
        catalog,
        dataset: Dataset::new(cells),
    })
}

fn convert_sets(
    cell: &str,
    raw: Vec<RawSet>,
    catalog: &SiteCatalog,
) -> Result<Vec<IntersectionSet>, InputError> {
    let mut seen: BTreeSet<Vec<String>> = BTreeSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for (index, set) in raw.into_iter().enumerate() {
        let malformed = |reason: String| InputError::MalformedIntersectionSet {
            cell: cell.to_string(),
            index,
            reason,
        };

        if set.sets.is_empty() {
            return Err(malformed("empty member list".to_string()));
        }
        let size = parse_size(&set.size).map_err(&malformed)?;

        let mut members = Vec::with_capacity(set.sets.len());
        let mut member_keys = BTreeSet::new();
        for member in set.sets {
            let id = SiteId::new(member.clone());
            if !catalog.contains(&id) {
                return Err(malformed(format!("unknown site {member}")));
            }
            if !member_keys.insert(member) {
                return Err(malformed(format!("site {id} listed twice")));
            }
            members.push(id);
        }

        if !seen.insert(member_keys.into_iter().collect()) {
            return Err(malformed("duplicate member set".to_string()));
        }
        out.push(IntersectionSet::new(members, size));
    }

    Ok(out)
}

fn parse_size(raw: &RawSize) -> Result<u64, String> {
    let value = match raw {
        RawSize::Int(v) => *v,
        RawSize::Float(v) => {
            if v.fract() != 0.0 || !v.is_finite() {
                return Err(format!("size {v} is not an integer"));
            }
            *v as i64
        }
        RawSize::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("size {s:?} is not an integer"))?,
    };
    u64::try_from(value).map_err(|_| format!("negative size {value}"))
}

fn convert_rows(
    cell: &str,
    raw: RawRows,
    catalog: &SiteCatalog,
) -> Result<Vec<Row>, InputError> {
    let entries: Vec<(Option<String>, Value)> = match raw {
        RawRows::Keyed(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
        RawRows::List(list) => list.into_iter().map(|v| (None, v)).collect(),
    };

    let mut rows = Vec::with_capacity(entries.len());
    for (index, (key, value)) in entries.into_iter().enumerate() {
        let fallback = key.unwrap_or_else(|| format!("#{index}"));
        let Value::Object(obj) = value else {
            return Err(InputError::MalformedRow {
                cell: cell.to_string(),
                gene: fallback,
                reason: "row is not an object".to_string(),
            });
        };
        rows.push(convert_row(cell, &fallback, &obj, catalog)?);
    }
    Ok(rows)
}

fn convert_row(
    cell: &str,
    fallback_gene: &str,
    obj: &Map<String, Value>,
    catalog: &SiteCatalog,
) -> Result<Row, InputError> {
    let gene = match obj.get("gene") {
        Some(Value::String(g)) if !g.trim().is_empty() => g.trim().to_string(),
        _ => fallback_gene.to_string(),
    };
    let malformed = |reason: String| InputError::MalformedRow {
        cell: cell.to_string(),
        gene: gene.clone(),
        reason,
    };

    let mut measurements = BTreeMap::new();
    for site in catalog.ids() {
        let fc_col = avg_log_fc_column(site);
        let p_col = p_val_adj_column(site);
        let avg =
            cell_value(obj.get(&fc_col)).map_err(|r| malformed(format!("{fc_col}: {r}")))?;
        let p_val =
            cell_value(obj.get(&p_col)).map_err(|r| malformed(format!("{p_col}: {r}")))?;
        match (avg, p_val) {
            (Some(avg_log_fc), p_val_adj) => {
                measurements.insert(
                    site.clone(),
                    Measurement {
                        avg_log_fc,
                        p_val_adj,
                    },
                );
            }
            (None, Some(_)) => {
                warn!(
                    cell,
                    gene = %gene,
                    site = %site,
                    "p-value without fold change; treating site as unmeasured"
                );
            }
            (None, None) => {}
        }
    }

    Ok(Row { gene, measurements })
}

/// `null`, `""`, `"-"` and a missing key all mean "no value".
fn cell_value(value: Option<&Value>) -> Result<Option<f64>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| format!("unrepresentable number {n}")),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() || s == "-" {
                Ok(None)
            } else {
                s.parse::<f64>()
                    .map(Some)
                    .map_err(|_| format!("non-numeric value {s:?}"))
            }
        }
        Some(other) => Err(format!("unexpected value {other}")),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/atlas.rs"]
mod tests;
