use serde::{Deserialize, Serialize};

use crate::domain::character::CharacterId;

/// The user-curated set of favorite character ids.
///
/// Backed by a `Vec` so insertion order is kept for display; uniqueness is
/// enforced by every constructor and by [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CharacterId>", into = "Vec<CharacterId>")]
pub struct FavoriteSet {
    ids: Vec<CharacterId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from any id list, keeping the first occurrence of each id
    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = CharacterId>,
    {
        let mut unique = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self { ids: unique }
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[CharacterId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.ids.iter().copied()
    }
}

impl From<Vec<CharacterId>> for FavoriteSet {
    fn from(ids: Vec<CharacterId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<FavoriteSet> for Vec<CharacterId> {
    fn from(set: FavoriteSet) -> Self {
        set.ids
    }
}

/// Every way the favorite set can change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesCommand {
    /// Replace the whole set (hydration from storage)
    Set(Vec<CharacterId>),
    Add(CharacterId),
    Remove(CharacterId),
    /// Empty the set (clear-all-data flow)
    Reset,
}

impl FavoritesCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FavoritesCommand::Set(_) => "SET_FAVORITES",
            FavoritesCommand::Add(_) => "ADD_FAVORITE",
            FavoritesCommand::Remove(_) => "REMOVE_FAVORITE",
            FavoritesCommand::Reset => "RESET_FAVORITES",
        }
    }
}

/// Pure state transition.
///
/// `Add` of a present id and `Remove` of an absent id return the input unchanged.
pub fn reduce(state: &FavoriteSet, command: &FavoritesCommand) -> FavoriteSet {
    match command {
        FavoritesCommand::Set(ids) => FavoriteSet::from_ids(ids.iter().copied()),
        FavoritesCommand::Add(id) => {
            if state.contains(*id) {
                return state.clone();
            }
            let mut ids = state.ids.clone();
            ids.push(*id);
            FavoriteSet { ids }
        }
        FavoritesCommand::Remove(id) => FavoriteSet {
            ids: state.ids.iter().copied().filter(|x| x != id).collect(),
        },
        FavoritesCommand::Reset => FavoriteSet::new(),
    }
}
