//! Catalog model
//!
//! Immutable-per-session snapshot of categories, garments and character
//! models, read through an injected `CatalogStore`. Store failures never
//! reach the caller: they degrade to empty sequences so the dressing screen
//! still opens.

use crate::error::Result;
use crate::types::{Category, CategoryId, CharacterModel, Garment, GarmentId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Read side of the persistence service
pub trait CatalogStore {
    /// All categories in display order
    fn categories(&self) -> Result<Vec<Category>>;

    /// Garments of one category in display order
    fn garments(&self, category: CategoryId) -> Result<Vec<Garment>>;

    /// All character models
    fn character_models(&self) -> Result<Vec<CharacterModel>>;
}

pub fn load_categories(store: &dyn CatalogStore) -> Vec<Category> {
    store.categories().unwrap_or_else(|err| {
        warn!(error = %err, "catalog store unavailable, using empty category list");
        Vec::new()
    })
}

pub fn load_garments(store: &dyn CatalogStore, category: CategoryId) -> Vec<Garment> {
    store.garments(category).unwrap_or_else(|err| {
        warn!(error = %err, %category, "catalog store unavailable, using empty garment list");
        Vec::new()
    })
}

pub fn load_character_models(store: &dyn CatalogStore) -> Vec<CharacterModel> {
    store.character_models().unwrap_or_else(|err| {
        warn!(error = %err, "catalog store unavailable, using empty model list");
        Vec::new()
    })
}

/// Categories with their garments, in catalog order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    garments: Vec<Vec<Garment>>,
    models: Vec<CharacterModel>,
}

impl Catalog {
    /// Snapshot the store. Garments that do not belong to the category they
    /// were listed under, or that repeat an id already seen, are dropped.
    pub fn load(store: &dyn CatalogStore) -> Self {
        let mut categories = Vec::new();
        let mut seen_categories = HashSet::new();
        for mut category in load_categories(store) {
            if !seen_categories.insert(category.id) {
                warn!(category = %category.id, "duplicate category id dropped");
                continue;
            }
            category.capacity = category.capacity.max(1);
            categories.push(category);
        }

        let mut seen_garments: HashSet<GarmentId> = HashSet::new();
        let garments = categories
            .iter()
            .map(|category| {
                load_garments(store, category.id)
                    .into_iter()
                    .filter(|garment| {
                        if garment.category_id != category.id {
                            warn!(garment = %garment.id, category = %category.id, "garment listed under a foreign category dropped");
                            return false;
                        }
                        if !seen_garments.insert(garment.id) {
                            warn!(garment = %garment.id, "duplicate garment id dropped");
                            return false;
                        }
                        true
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let catalog = Self {
            categories,
            garments,
            models: load_character_models(store),
        };
        debug!(
            categories = catalog.categories.len(),
            garments = catalog.garment_count(),
            models = catalog.models.len(),
            "catalog loaded"
        );
        catalog
    }

    /// Build a snapshot from in-memory rows; garments whose category does not
    /// exist are dropped.
    pub fn from_parts(categories: Vec<Category>, garments: Vec<Garment>, models: Vec<CharacterModel>) -> Self {
        let store = MemoryCatalog {
            categories,
            garments,
            models,
        };
        Self::load(&store)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn garments_in(&self, id: CategoryId) -> &[Garment] {
        self.categories
            .iter()
            .position(|category| category.id == id)
            .map(|index| self.garments[index].as_slice())
            .unwrap_or(&[])
    }

    /// Every garment, grouped by category in catalog order
    pub fn garments(&self) -> impl Iterator<Item = &Garment> {
        self.garments.iter().flatten()
    }

    pub fn garment(&self, id: GarmentId) -> Option<&Garment> {
        self.garments().find(|garment| garment.id == id)
    }

    pub fn garment_count(&self) -> usize {
        self.garments.iter().map(Vec::len).sum()
    }

    pub fn models(&self) -> &[CharacterModel] {
        &self.models
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// In-memory store, used for tests and for catalogs assembled in code
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    pub categories: Vec<Category>,
    pub garments: Vec<Garment>,
    pub models: Vec<CharacterModel>,
}

impl CatalogStore for MemoryCatalog {
    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn garments(&self, category: CategoryId) -> Result<Vec<Garment>> {
        Ok(self
            .garments
            .iter()
            .filter(|garment| garment.category_id == category)
            .cloned()
            .collect())
    }

    fn character_models(&self) -> Result<Vec<CharacterModel>> {
        Ok(self.models.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct OfflineStore;

    impl CatalogStore for OfflineStore {
        fn categories(&self) -> Result<Vec<Category>> {
            Err(Error::Store("connection refused".into()))
        }

        fn garments(&self, _category: CategoryId) -> Result<Vec<Garment>> {
            Err(Error::Store("connection refused".into()))
        }

        fn character_models(&self) -> Result<Vec<CharacterModel>> {
            Err(Error::Store("connection refused".into()))
        }
    }

    /// Lists every garment under every category
    struct SloppyStore(MemoryCatalog);

    impl CatalogStore for SloppyStore {
        fn categories(&self) -> Result<Vec<Category>> {
            self.0.categories()
        }

        fn garments(&self, _category: CategoryId) -> Result<Vec<Garment>> {
            Ok(self.0.garments.clone())
        }

        fn character_models(&self) -> Result<Vec<CharacterModel>> {
            self.0.character_models()
        }
    }

    fn sample() -> MemoryCatalog {
        MemoryCatalog {
            categories: vec![Category::new(1, "Top", 1), Category::new(2, "Shoes", 1)],
            garments: vec![
                Garment::new(10, "Tee", 1, "tee.png"),
                Garment::new(20, "Boots", 2, "boots.png"),
                Garment::new(11, "Blouse", 1, "blouse.png"),
            ],
            models: vec![CharacterModel::default()],
        }
    }

    #[test]
    fn test_load_groups_garments_by_category() {
        let catalog = Catalog::load(&sample());
        assert_eq!(catalog.categories().len(), 2);
        let tops: Vec<u32> = catalog.garments_in(CategoryId(1)).iter().map(|g| g.id.0).collect();
        assert_eq!(tops, vec![10, 11]);
        assert_eq!(catalog.garment_count(), 3);
        assert_eq!(catalog.models().len(), 1);
    }

    #[test]
    fn test_unavailable_store_degrades_to_empty() {
        assert!(load_categories(&OfflineStore).is_empty());
        assert!(load_garments(&OfflineStore, CategoryId(1)).is_empty());
        let catalog = Catalog::load(&OfflineStore);
        assert!(catalog.is_empty());
        assert_eq!(catalog.garment_count(), 0);
    }

    #[test]
    fn test_foreign_garments_are_dropped() {
        let catalog = Catalog::load(&SloppyStore(sample()));
        assert_eq!(catalog.garment_count(), 3);
        for category in catalog.categories() {
            assert!(catalog.garments_in(category.id).iter().all(|g| g.category_id == category.id));
        }
    }

    #[test]
    fn test_orphan_garment_dropped_from_parts() {
        let catalog = Catalog::from_parts(
            vec![Category::new(1, "Top", 1)],
            vec![Garment::new(1, "Tee", 1, "a.png"), Garment::new(2, "Ghost", 9, "b.png")],
            Vec::new(),
        );
        assert!(catalog.garment(GarmentId(1)).is_some());
        assert!(catalog.garment(GarmentId(2)).is_none());
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let mut store = sample();
        store.categories[0].capacity = 0;
        let catalog = Catalog::load(&store);
        assert_eq!(catalog.category(CategoryId(1)).map(|c| c.capacity), Some(1));
    }
}
