use std::collections::BTreeSet;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};
use crate::model::{Site, SiteCatalog, SiteId};

#[derive(Debug, Clone, Copy)]
pub struct SiteDef {
    pub id: &'static str,
    pub name: &'static str,
}

const BUILTIN_SITES: &[SiteDef] = &[
    SiteDef {
        id: "UCSF",
        name: "UCSF",
    },
    SiteDef {
        id: "UCSD",
        name: "UCSD",
    },
    SiteDef {
        id: "UMICH",
        name: "Michigan",
    },
];

pub fn builtin_sites() -> &'static [SiteDef] {
    BUILTIN_SITES
}

pub fn builtin_catalog() -> SiteCatalog {
    let sites = BUILTIN_SITES
        .iter()
        .map(|def| Site {
            id: SiteId::new(def.id),
            name: def.name.to_string(),
        })
        .collect();
    SiteCatalog::new(sites)
}

/// Rejects empty catalogs, blank ids and duplicate ids. A blank display name
/// falls back to the id.
pub fn build_catalog(sites: Vec<Site>) -> Result<SiteCatalog, InputError> {
    if sites.is_empty() {
        return Err(InputError::InvalidCatalog("no sites defined".to_string()));
    }
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(sites.len());
    for site in sites {
        if site.id.as_str().trim().is_empty() {
            return Err(InputError::InvalidCatalog("blank site id".to_string()));
        }
        if !seen.insert(site.id.clone()) {
            return Err(InputError::InvalidCatalog(format!(
                "duplicate site id {}",
                site.id
            )));
        }
        let name = if site.name.trim().is_empty() {
            site.id.to_string()
        } else {
            site.name
        };
        out.push(Site { id: site.id, name });
    }
    Ok(SiteCatalog::new(out))
}

pub fn read_sites_file(path: &Path) -> Result<Vec<Site>, InputError> {
    let reader = open_maybe_gz(path)?;
    serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}
