use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote catalog. Stable and unique.
pub type CharacterId = u32;

/// A character record as served by the remote catalog.
/// Read-only from the client's perspective: fetched, cached, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,

    pub name: String,

    pub status: CharacterStatus,

    /// Species (Human, Alien, ...)
    pub species: String,

    /// Subtype or variant; empty when the catalog has none
    #[serde(rename = "type", default)]
    pub kind: String,

    pub gender: Gender,

    pub origin: LocationRef,

    /// Last known location
    pub location: LocationRef,

    /// Avatar image URL
    pub image: String,

    /// Episode resource URLs, in airing order
    #[serde(rename = "episode", default)]
    pub episodes: Vec<String>,

    /// Canonical resource URL of this character
    pub url: String,

    pub created: DateTime<Utc>,
}

impl Character {
    /// Subtype, if the catalog provides a non-empty one
    pub fn subtype(&self) -> Option<&str> {
        let kind = self.kind.trim();
        (!kind.is_empty()).then_some(kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    Alive,
    Dead,
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for CharacterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterStatus::Alive => write!(f, "Alive"),
            CharacterStatus::Dead => write!(f, "Dead"),
            CharacterStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    Genderless,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Named reference to another catalog resource (origin, location)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub name: String,
    /// Empty when the catalog does not know the place
    pub url: String,
}

/// Listing filter by vital status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Alive,
    Dead,
    Unknown,
}

impl StatusFilter {
    /// Value for the `status` query parameter; `None` means "do not filter"
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Alive => Some("alive"),
            StatusFilter::Dead => Some("dead"),
            StatusFilter::Unknown => Some("unknown"),
        }
    }

    pub fn matches(&self, status: CharacterStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Alive => status == CharacterStatus::Alive,
            StatusFilter::Dead => status == CharacterStatus::Dead,
            StatusFilter::Unknown => status == CharacterStatus::Unknown,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.query_value().unwrap_or("all"))
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "alive" => Ok(StatusFilter::Alive),
            "dead" => Ok(StatusFilter::Dead),
            "unknown" => Ok(StatusFilter::Unknown),
            other => Err(format!("Invalid status filter: {}", other)),
        }
    }
}

/// Pagination metadata returned with every listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page of the character listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPage {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl CharacterPage {
    pub fn has_next(&self) -> bool {
        self.info.next.is_some()
    }
}
