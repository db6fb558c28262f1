//! Catalog and session data types
//!
//! Shared by the engine, the persistence service and the presentation layer:
//! - Category / Garment / CharacterModel: static catalog rows
//! - Theme: the style a session is judged against
//! - Profile: an authenticated user as seen by the screens
//! - Sprite: an image reference at the size it should be drawn

use crate::geometry::Size;
use crate::layering::LayerRank;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(CategoryId);
id_type!(GarmentId);
id_type!(ModelId);
id_type!(UserId);

/// A garment classification with a wearing-capacity limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Maximum number of garments of this category worn at once
    #[serde(default = "default_capacity", alias = "max_items")]
    pub capacity: u32,
    /// Explicit draw layer; when absent the layer is inferred from the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerRank>,
}

fn default_capacity() -> u32 {
    1
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: CategoryId(id),
            name: name.into(),
            capacity: capacity.max(1),
            layer: None,
        }
    }

    pub fn with_layer(mut self, layer: LayerRank) -> Self {
        self.layer = Some(layer);
        self
    }
}

/// A single wearable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Garment {
    pub id: GarmentId,
    pub name: String,
    pub category_id: CategoryId,
    /// Image asset path, relative to the asset root
    #[serde(alias = "sprite_path")]
    pub asset: String,
    /// Theme code this garment earns bonus points for
    #[serde(default, alias = "score_theme", skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default)]
    pub price: u32,
}

impl Garment {
    pub fn new(id: u32, name: impl Into<String>, category_id: u32, asset: impl Into<String>) -> Self {
        Self {
            id: GarmentId(id),
            name: name.into(),
            category_id: CategoryId(category_id),
            asset: asset.into(),
            theme: None,
            price: 0,
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

/// A character that can be dressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterModel {
    pub id: ModelId,
    pub name: String,
    #[serde(alias = "base_sprite_path")]
    pub asset: String,
}

impl Default for CharacterModel {
    fn default() -> Self {
        Self {
            id: ModelId(0),
            name: "Lina".to_string(),
            asset: "assets/mannequins/mannequin_base.png".to_string(),
        }
    }
}

/// The style a session is scored against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub code: String,
    pub label: String,
}

impl Theme {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Built-in themes as (code, label)
pub const THEMES: &[(&str, &str)] = &[
    ("casual", "Casual"),
    ("soiree", "Soirée"),
    ("colorful", "Colorful"),
    ("chic", "Chic"),
];

/// Look up a built-in theme by code or label
pub fn theme_by_code(code: &str) -> Option<Theme> {
    let trimmed = code.trim();
    THEMES
        .iter()
        .find(|(c, l)| c.eq_ignore_ascii_case(trimmed) || l.eq_ignore_ascii_case(trimmed))
        .map(|(c, l)| Theme::new(*c, *l))
}

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
}

/// An image reference at its drawn size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub asset: String,
    pub size: Size,
}

impl Sprite {
    pub fn new(asset: impl Into<String>, size: Size) -> Self {
        Self {
            asset: asset.into(),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_capacity_defaults_to_one() {
        let category: Category = serde_json::from_str(r#"{"id": 1, "name": "Top"}"#).unwrap();
        assert_eq!(category.capacity, 1);
        assert_eq!(category.layer, None);
    }

    #[test]
    fn test_category_accepts_max_items_alias() {
        let category: Category =
            serde_json::from_str(r#"{"id": 6, "name": "Accessory", "max_items": 3}"#).unwrap();
        assert_eq!(category.capacity, 3);
    }

    #[test]
    fn test_category_explicit_layer() {
        let category: Category =
            serde_json::from_str(r#"{"id": 2, "name": "Misc", "layer": "face"}"#).unwrap();
        assert_eq!(category.layer, Some(LayerRank::Face));
    }

    #[test]
    fn test_garment_legacy_field_names() {
        let garment: Garment = serde_json::from_str(
            r#"{"id": 4, "name": "Red Heels", "category_id": 3,
                "sprite_path": "assets/clothes/heels.png", "score_theme": "soiree", "price": 40}"#,
        )
        .unwrap();
        assert_eq!(garment.asset, "assets/clothes/heels.png");
        assert_eq!(garment.theme.as_deref(), Some("soiree"));
        assert_eq!(garment.price, 40);
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(theme_by_code("chic"), Some(Theme::new("chic", "Chic")));
        assert_eq!(theme_by_code(" Casual "), Some(Theme::new("casual", "Casual")));
        assert_eq!(theme_by_code("punk"), None);
    }

    #[test]
    fn test_category_new_clamps_capacity() {
        assert_eq!(Category::new(1, "Top", 0).capacity, 1);
    }
}
