//! Catalog gallery
//!
//! The presentation-facing catalog: category labels interleaved with
//! draggable garment handles, laid out top to bottom in logical (unscrolled)
//! coordinates. The entry list is only ever rebuilt wholesale; per frame
//! only handle positions, grab state and worn sprites change.

use crate::catalog::Catalog;
use crate::geometry::{Rect, Size, Vec2};
use crate::types::{Garment, GarmentId, Sprite};
use serde::{Deserialize, Serialize};

/// Gallery layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GalleryLayout {
    pub columns: u32,
    pub thumb: Size,
    pub padding: f32,
    pub gap: f32,
    pub label_height: f32,
}

impl Default for GalleryLayout {
    fn default() -> Self {
        Self {
            columns: 1,
            thumb: Size::new(280.0, 280.0),
            padding: 20.0,
            gap: 0.0,
            label_height: 36.0,
        }
    }
}

/// Index of a handle inside its gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLabel {
    pub text: String,
    pub pos: Vec2,
}

/// Draggable representation of one catalog garment
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    pub garment: Garment,
    /// Fixed logical slot in the catalog
    pub base: Vec2,
    /// Live screen position while grabbed or worn
    pub pos: Vec2,
    pub grabbed: bool,
    /// Pointer minus displayed position at grab time
    pub grab_offset: Vec2,
    pub thumb: Sprite,
    /// Character-sized sprite while worn
    pub worn_sprite: Option<Sprite>,
}

impl Handle {
    fn new(garment: &Garment, base: Vec2, thumb: Size) -> Self {
        Self {
            thumb: Sprite::new(garment.asset.clone(), thumb),
            garment: garment.clone(),
            base,
            pos: base,
            grabbed: false,
            grab_offset: Vec2::ZERO,
            worn_sprite: None,
        }
    }

    /// Where the handle is shown right now: its live position while grabbed,
    /// otherwise its catalog slot shifted by the scroll offset
    pub fn displayed_pos(&self, scroll_offset: f32) -> Vec2 {
        if self.grabbed {
            self.pos
        } else {
            Vec2::new(self.base.x, self.base.y - scroll_offset)
        }
    }

    pub fn displayed_rect(&self, scroll_offset: f32) -> Rect {
        Rect::from_pos_size(self.displayed_pos(scroll_offset), self.thumb.size)
    }

    /// Screen rect of the worn sprite, if worn
    pub fn worn_rect(&self) -> Option<Rect> {
        self.worn_sprite
            .as_ref()
            .map(|sprite| Rect::from_pos_size(self.pos, sprite.size))
    }

    /// Back to catalog presentation at the catalog slot
    pub fn restore_to_catalog(&mut self) {
        self.worn_sprite = None;
        self.grabbed = false;
        self.pos = self.base;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Label(CategoryLabel),
    Handle(Handle),
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    entries: Vec<CatalogEntry>,
    content_height: f32,
    layout: Option<GalleryLayout>,
}

impl Gallery {
    pub fn build(catalog: &Catalog, layout: GalleryLayout) -> Self {
        let columns = layout.columns.max(1);
        let (tw, th) = (layout.thumb.width, layout.thumb.height);
        let mut entries = Vec::with_capacity(catalog.categories().len() + catalog.garment_count());

        let mut y = layout.padding;
        for category in catalog.categories() {
            entries.push(CatalogEntry::Label(CategoryLabel {
                text: category.name.to_uppercase(),
                pos: Vec2::new(layout.padding, y),
            }));
            y += layout.label_height;

            let mut x = layout.padding;
            let mut col = 0;
            for garment in catalog.garments_in(category.id) {
                entries.push(CatalogEntry::Handle(Handle::new(garment, Vec2::new(x, y), layout.thumb)));
                col += 1;
                if col >= columns {
                    col = 0;
                    x = layout.padding;
                    y += th + layout.gap;
                } else {
                    x += tw + layout.gap;
                }
            }

            if col != 0 {
                y += th + layout.gap;
            }
            y += layout.gap * 2.0;
        }

        Self {
            entries,
            content_height: y,
            layout: Some(layout),
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn layout(&self) -> GalleryLayout {
        self.layout.unwrap_or_default()
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        match self.entries.get(id.0) {
            Some(CatalogEntry::Handle(handle)) => Some(handle),
            _ => None,
        }
    }

    pub fn handle_mut(&mut self, id: HandleId) -> Option<&mut Handle> {
        match self.entries.get_mut(id.0) {
            Some(CatalogEntry::Handle(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Handles in catalog order
    pub fn handles(&self) -> impl DoubleEndedIterator<Item = (HandleId, &Handle)> {
        self.entries.iter().enumerate().filter_map(|(index, entry)| match entry {
            CatalogEntry::Handle(handle) => Some((HandleId(index), handle)),
            CatalogEntry::Label(_) => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &CategoryLabel> {
        self.entries.iter().filter_map(|entry| match entry {
            CatalogEntry::Label(label) => Some(label),
            CatalogEntry::Handle(_) => None,
        })
    }

    pub fn find_garment(&self, garment: GarmentId) -> Option<HandleId> {
        self.handles()
            .find(|(_, handle)| handle.garment.id == garment)
            .map(|(id, _)| id)
    }

    pub fn grabbed(&self) -> Option<HandleId> {
        self.handles().find(|(_, handle)| handle.grabbed).map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn catalog() -> Catalog {
        Catalog::from_parts(
            vec![Category::new(1, "Top", 1), Category::new(2, "Shoes", 1)],
            vec![
                Garment::new(10, "Tee", 1, "tee.png"),
                Garment::new(11, "Blouse", 1, "blouse.png"),
                Garment::new(12, "Sweater", 1, "sweater.png"),
                Garment::new(20, "Boots", 2, "boots.png"),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_single_column_layout() {
        let gallery = Gallery::build(&catalog(), GalleryLayout::default());
        assert_eq!(gallery.entries().len(), 6);

        let labels: Vec<&CategoryLabel> = gallery.labels().collect();
        assert_eq!(labels[0].text, "TOP");
        assert_eq!(labels[0].pos, Vec2::new(20.0, 20.0));
        // 20 + 36 + 3 * 280
        assert_eq!(labels[1].pos, Vec2::new(20.0, 896.0));

        let bases: Vec<Vec2> = gallery.handles().map(|(_, h)| h.base).collect();
        assert_eq!(bases[0], Vec2::new(20.0, 56.0));
        assert_eq!(bases[1], Vec2::new(20.0, 336.0));
        assert_eq!(bases[3], Vec2::new(20.0, 932.0));
        assert_eq!(gallery.content_height(), 1212.0);
    }

    #[test]
    fn test_two_columns_completes_partial_row() {
        let layout = GalleryLayout {
            columns: 2,
            thumb: Size::new(140.0, 140.0),
            gap: 4.0,
            ..GalleryLayout::default()
        };
        let gallery = Gallery::build(&catalog(), layout);
        let bases: Vec<Vec2> = gallery.handles().map(|(_, h)| h.base).collect();
        assert_eq!(bases[0], Vec2::new(20.0, 56.0));
        assert_eq!(bases[1], Vec2::new(164.0, 56.0));
        assert_eq!(bases[2], Vec2::new(20.0, 200.0));
        // partial row closed (+144) then category gap (+8), label (+36)
        assert_eq!(bases[3], Vec2::new(20.0, 388.0));
    }

    #[test]
    fn test_handle_lookup() {
        let gallery = Gallery::build(&catalog(), GalleryLayout::default());
        let id = gallery.find_garment(GarmentId(20)).unwrap();
        assert_eq!(gallery.handle(id).unwrap().garment.name, "Boots");
        assert!(gallery.handle(HandleId(0)).is_none(), "entry 0 is a label");
        assert!(gallery.grabbed().is_none());
    }

    #[test]
    fn test_displayed_pos_follows_scroll_unless_grabbed() {
        let mut gallery = Gallery::build(&catalog(), GalleryLayout::default());
        let id = gallery.find_garment(GarmentId(11)).unwrap();
        let handle = gallery.handle_mut(id).unwrap();
        assert_eq!(handle.displayed_pos(100.0), Vec2::new(20.0, 236.0));
        handle.grabbed = true;
        handle.pos = Vec2::new(400.0, 300.0);
        assert_eq!(handle.displayed_pos(100.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_empty_catalog() {
        let gallery = Gallery::build(&Catalog::default(), GalleryLayout::default());
        assert!(gallery.entries().is_empty());
        assert_eq!(gallery.content_height(), 20.0);
    }
}
