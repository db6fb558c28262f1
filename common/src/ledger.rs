//! Outfit ledger
//!
//! The authoritative record of what is worn. Capacity per category is copied
//! from the catalog snapshot when the ledger is created and never changes.

use crate::catalog::Catalog;
use crate::types::{Category, CategoryId, Garment, GarmentId};
use std::collections::{BTreeMap, HashMap};

/// Capacity assumed for a category the catalog does not know
const FALLBACK_CAPACITY: u32 = 1;

#[derive(Debug, Clone, Default)]
pub struct OutfitLedger {
    worn: BTreeMap<CategoryId, Vec<Garment>>,
    capacity: HashMap<CategoryId, u32>,
}

impl OutfitLedger {
    pub fn new(categories: &[Category]) -> Self {
        Self {
            worn: BTreeMap::new(),
            capacity: categories
                .iter()
                .map(|category| (category.id, category.capacity))
                .collect(),
        }
    }

    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.categories())
    }

    pub fn capacity(&self, category: CategoryId) -> u32 {
        self.capacity.get(&category).copied().unwrap_or(FALLBACK_CAPACITY)
    }

    pub fn count(&self, category: CategoryId) -> usize {
        self.worn.get(&category).map(Vec::len).unwrap_or(0)
    }

    /// True when the garment's category still has room
    pub fn can_add(&self, garment: &Garment) -> bool {
        self.count(garment.category_id) < self.capacity(garment.category_id) as usize
    }

    pub fn contains(&self, garment: GarmentId) -> bool {
        self.worn.values().flatten().any(|worn| worn.id == garment)
    }

    /// Wear a garment. Refused when the category is full or the garment is
    /// already worn; returns whether the ledger changed.
    pub fn add(&mut self, garment: &Garment) -> bool {
        if !self.can_add(garment) || self.contains(garment.id) {
            return false;
        }
        self.worn
            .entry(garment.category_id)
            .or_default()
            .push(garment.clone());
        true
    }

    /// Take a garment off. Removing something not worn is a no-op.
    pub fn remove(&mut self, garment: &Garment) -> bool {
        let Some(list) = self.worn.get_mut(&garment.category_id) else {
            return false;
        };
        let Some(index) = list.iter().position(|worn| worn.id == garment.id) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.worn.remove(&garment.category_id);
        }
        true
    }

    pub fn worn_in(&self, category: CategoryId) -> &[Garment] {
        self.worn.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every worn garment, grouped by category id
    pub fn all_worn(&self) -> Vec<Garment> {
        self.worn.values().flatten().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.worn.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.worn.is_empty()
    }
}
