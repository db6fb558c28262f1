//! Draw list
//!
//! Screens describe a frame as an ordered list of items, back to front. The
//! presentation layer paints them as-is; missing sprite assets become
//! placeholders there, never here.

use crate::geometry::{Rect, Vec2};
use crate::types::Sprite;
use serde::Serialize;

/// What a flat panel is for, so the painter can pick its colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PanelRole {
    Backdrop,
    SidebarBackground,
    StageBackground,
    ScrollRail,
    ScrollThumb,
}

/// Which edge of the text `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawItem {
    Panel { role: PanelRole, rect: Rect },
    Sprite { sprite: Sprite, pos: Vec2 },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        align: TextAlign,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&mut self, role: PanelRole, rect: Rect) {
        self.items.push(DrawItem::Panel { role, rect });
    }

    pub fn sprite(&mut self, sprite: Sprite, pos: Vec2) {
        self.items.push(DrawItem::Sprite { sprite, pos });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32) {
        self.aligned_text(text, pos, size, TextAlign::Left);
    }

    pub fn aligned_text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, align: TextAlign) {
        self.items.push(DrawItem::Text {
            text: text.into(),
            pos,
            size,
            align,
        });
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sprite assets in paint order
    pub fn sprite_assets(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Sprite { sprite, .. } => Some(sprite.asset.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl IntoIterator for DrawList {
    type Item = DrawItem;
    type IntoIter = std::vec::IntoIter<DrawItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
