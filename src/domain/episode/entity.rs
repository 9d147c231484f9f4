use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An episode record from the remote catalog.
/// Fetched on demand for the detail view; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,

    pub name: String,

    /// Air date as the catalog formats it ("December 2, 2013")
    pub air_date: String,

    /// Human-readable code, e.g. "S01E01"
    #[serde(rename = "episode")]
    pub code: String,

    /// Character resource URLs appearing in this episode
    #[serde(default)]
    pub characters: Vec<String>,

    pub url: String,

    pub created: DateTime<Utc>,
}

impl Episode {
    /// Season number parsed from the code, if it has the usual `SxxEyy` form
    pub fn season(&self) -> Option<u32> {
        let rest = self.code.strip_prefix('S')?;
        let (season, _) = rest.split_once('E')?;
        season.parse().ok()
    }
}

impl std::fmt::Display for Episode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}
