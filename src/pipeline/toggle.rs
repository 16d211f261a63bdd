use tracing::debug;

use crate::model::{ActiveSites, SiteId};

/// Next active-site set after a click on `site`'s label.
///
/// Deactivating the last active site is rejected and the set comes back
/// unchanged.
pub fn toggle_site(current: &ActiveSites, site: &SiteId) -> ActiveSites {
    let mut next = current.clone();
    if current.contains(site) {
        if current.len() > 1 {
            next.remove(site);
        } else {
            debug!(site = %site, "invalid selection: refusing to deactivate the last active site");
        }
    } else {
        next.insert(site.clone());
    }
    next
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/toggle.rs"]
mod tests;
