//! Layering policy
//!
//! Maps a worn garment to a draw layer so that the dressing view and the
//! result view stack garments identically (footwear never covers a coat).
//!
//! Resolution tiers, first hit wins:
//! 1. the category's explicit `layer` tag
//! 2. keywords in the category name (untagged catalog data)
//! 3. keywords in the garment name (legacy rows whose category is unknown)
//! 4. `LayerRank::Torso`

use crate::catalog::Catalog;
use crate::types::{Category, CategoryId, Garment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Draw layer, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerRank {
    Footwear = 0,
    Legwear = 1,
    Torso = 2,
    Head = 3,
    Face = 4,
    Accessory = 5,
}

impl LayerRank {
    pub const ALL: [LayerRank; 6] = [
        LayerRank::Footwear,
        LayerRank::Legwear,
        LayerRank::Torso,
        LayerRank::Head,
        LayerRank::Face,
        LayerRank::Accessory,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            LayerRank::Footwear => &["SHOE", "CHAUSSURE", "FEET"],
            LayerRank::Legwear => &["BOTTOM", "BAS", "PANTS", "PANTALON", "SKIRT", "JUPE", "SHORT", "JEAN"],
            LayerRank::Torso => &[
                "TOP", "HAUT", "SHIRT", "DRESS", "ROBE", "COAT", "MANTEAU", "JACKET", "VESTE", "SWEATER",
                "PULL",
            ],
            LayerRank::Head => &["HAIR", "CHEVEU", "HEAD", "CHAPEAU", "HAT"],
            LayerRank::Face => &["FACE", "VISAGE", "MASK", "MASQUE", "GLASSES", "LUNETTE"],
            LayerRank::Accessory => &["ACCESSORY", "ACCESSOIRE", "ACC"],
        }
    }

    /// Keyword inference over a free-form name
    pub fn from_keywords(name: &str) -> Option<LayerRank> {
        let upper = name.to_uppercase();
        LayerRank::ALL
            .into_iter()
            .find(|layer| layer.keywords().iter().any(|token| upper.contains(token)))
    }
}

impl Default for LayerRank {
    fn default() -> Self {
        LayerRank::Torso
    }
}

/// Category-keyed layer table built once per catalog snapshot
#[derive(Debug, Clone, Default)]
pub struct LayerPolicy {
    by_category: HashMap<CategoryId, LayerRank>,
}

impl LayerPolicy {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self::from_categories(catalog.categories())
    }

    pub fn from_categories(categories: &[Category]) -> Self {
        let by_category = categories
            .iter()
            .map(|category| {
                let layer = category
                    .layer
                    .or_else(|| LayerRank::from_keywords(&category.name))
                    .unwrap_or_default();
                (category.id, layer)
            })
            .collect();
        Self { by_category }
    }

    pub fn layer_for(&self, garment: &Garment) -> LayerRank {
        if let Some(layer) = self.by_category.get(&garment.category_id) {
            return *layer;
        }
        LayerRank::from_keywords(&garment.name).unwrap_or_default()
    }

    pub fn rank(&self, garment: &Garment) -> u8 {
        self.layer_for(garment).rank()
    }

    /// Stable ascending sort, so equal layers keep their wearing order
    pub fn sort_by_layer<T, F>(&self, items: &mut [T], garment_of: F)
    where
        F: Fn(&T) -> &Garment,
    {
        items.sort_by_key(|item| self.layer_for(garment_of(item)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LayerPolicy {
        LayerPolicy::from_categories(&[
            Category::new(1, "Shoes", 1),
            Category::new(2, "Bottom", 1),
            Category::new(3, "Top", 1),
            Category::new(4, "Hair", 1),
            Category::new(5, "Glasses", 1),
            Category::new(6, "Accessory", 2),
            Category::new(7, "Misc", 1),
            Category::new(8, "Shoes", 1).with_layer(LayerRank::Accessory),
        ])
    }

    #[test]
    fn test_layer_by_category_name() {
        let policy = policy();
        let ranks: Vec<u8> = (1..=6)
            .map(|cat| policy.rank(&Garment::new(cat * 10, "Item", cat, "x.png")))
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unrecognized_category_defaults_to_torso() {
        let policy = policy();
        assert_eq!(policy.rank(&Garment::new(70, "Scarf", 7, "x.png")), 2);
    }

    #[test]
    fn test_explicit_tag_beats_keyword() {
        let policy = policy();
        assert_eq!(policy.layer_for(&Garment::new(80, "Boots", 8, "x.png")), LayerRank::Accessory);
    }

    #[test]
    fn test_category_name_beats_garment_name() {
        let policy = policy();
        // "Top Hat" would be torso by garment name, but its category says hair
        assert_eq!(policy.layer_for(&Garment::new(41, "Top Hat", 4, "x.png")), LayerRank::Head);
    }

    #[test]
    fn test_garment_name_fallback_for_unknown_category() {
        let policy = policy();
        assert_eq!(policy.layer_for(&Garment::new(99, "running shoes", 42, "x.png")), LayerRank::Footwear);
        assert_eq!(policy.layer_for(&Garment::new(98, "???", 42, "x.png")), LayerRank::Torso);
    }

    #[test]
    fn test_keywords_are_case_insensitive_and_french() {
        assert_eq!(LayerRank::from_keywords("chaussures"), Some(LayerRank::Footwear));
        assert_eq!(LayerRank::from_keywords("Jupe plissée"), Some(LayerRank::Legwear));
        assert_eq!(LayerRank::from_keywords("Lunettes"), Some(LayerRank::Face));
        assert_eq!(LayerRank::from_keywords("plain"), None);
    }

    #[test]
    fn test_rank_is_total() {
        let policy = policy();
        for name in ["", "Shoes", "xyz", "Accessory", "hat", "veste"] {
            let rank = policy.rank(&Garment::new(1, name, 1000, "x.png"));
            assert!(rank <= 5);
        }
    }

    #[test]
    fn test_sort_by_layer_is_stable() {
        let policy = policy();
        let mut worn = vec![
            Garment::new(1, "Hat", 4, "a.png"),
            Garment::new(2, "Necklace", 6, "b.png"),
            Garment::new(3, "Sneakers", 1, "c.png"),
            Garment::new(4, "Bracelet", 6, "d.png"),
        ];
        policy.sort_by_layer(&mut worn, |g| g);
        let ids: Vec<u32> = worn.iter().map(|g| g.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }
}
