use std::collections::BTreeSet;

use crate::catalog::ChapterId;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of favorite chapter ids.
pub const FAVORITES_KEY: &str = "quran_favorites";

/// Set of favorite chapters, written back to the store on every change.
pub struct FavoritesStore<S: KeyValueStore> {
    store: S,
    ids: BTreeSet<ChapterId>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites from `store`. Absent or unreadable data yields an empty set.
    pub fn load(store: S) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            Ok(Some(data)) => serde_json::from_str::<Vec<ChapterId>>(&data)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    log::warn!("Discarding unparseable favorites: {e}");
                    BTreeSet::new()
                }),
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                log::warn!("Failed to read favorites: {e}");
                BTreeSet::new()
            }
        };
        Self { store, ids }
    }

    pub fn ids(&self) -> &BTreeSet<ChapterId> {
        &self.ids
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip membership of `id` and persist. Returns whether `id` is now a favorite.
    pub fn toggle(&mut self, id: ChapterId) -> bool {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist();
        now_favorite
    }

    fn persist(&mut self) {
        let ids: Vec<ChapterId> = self.ids.iter().copied().collect();
        let result = serde_json::to_string(&ids)
            .map_err(StorageError::from)
            .and_then(|data| self.store.set(FAVORITES_KEY, &data));
        if let Err(e) = result {
            log::warn!("Failed to save favorites: {e}");
        }
    }
}
