use std::path::Path;

use serde::Deserialize;

use crate::input::{InputError, open_maybe_gz};
use crate::model::SiteId;

/// One recorded interaction. Intersection clicks name their members and are
/// resolved against the cell that is current when the event is replayed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    ClickIntersection { sets: Vec<SiteId> },
    ClickSite { site: SiteId },
    SelectCell { cell: String },
}

pub fn parse_events(text: &str) -> Result<Vec<ScriptEvent>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn load_events(path: &Path) -> Result<Vec<ScriptEvent>, InputError> {
    let reader = open_maybe_gz(path)?;
    serde_json::from_reader(reader).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}
