//! Dressing session
//!
//! One dressing screen: the gallery in the sidebar, the character on the
//! stage, and the ledger of what is worn. Created when the screen opens and
//! dropped when it closes; only the `ResultBrief` outlives it.

use crate::catalog::Catalog;
use crate::draw::{DrawList, PanelRole, TextAlign};
use crate::gallery::{Gallery, GalleryLayout};
use crate::geometry::{Rect, Size, Vec2};
use crate::input::{InputEvent, Key, PointerButton, PointerEvent, PointerKind};
use crate::layering::LayerPolicy;
use crate::ledger::OutfitLedger;
use crate::resolver::{Placement, PlacementResolver, Stage};
use crate::transition::{DressBrief, ResultBrief, Transition};
use crate::types::{Garment, Sprite};
use crate::viewport::CatalogViewport;
use std::sync::Arc;
use tracing::{debug, info};

pub const SIDEBAR_WIDTH: f32 = 320.0;
pub const CHARACTER_CANVAS: Size = Size::new(360.0, 520.0);
/// Distance from the top of the stage to the character
pub const CHARACTER_TOP: f32 = 80.0;
pub const DEFAULT_WIDTH: f32 = 1024.0;
pub const DEFAULT_HEIGHT: f32 = 640.0;

const LABEL_TEXT_SIZE: f32 = 24.0;
const HINT_TEXT_SIZE: f32 = 18.0;
const TITLE_TEXT_SIZE: f32 = 28.0;
pub const HINT_TEXT: &str = "Wheel = scroll | Enter = validate";

/// Window split into the catalog sidebar and the character stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    pub width: f32,
    pub height: f32,
    pub sidebar: Rect,
    pub stage: Rect,
}

impl ScreenLayout {
    pub fn new(width: f32, height: f32) -> Self {
        let sidebar_w = SIDEBAR_WIDTH.min(width);
        Self {
            width,
            height,
            sidebar: Rect::new(0.0, 0.0, sidebar_w, height),
            stage: Rect::new(sidebar_w, 0.0, (width - sidebar_w).max(0.0), height),
        }
    }

    /// Top-left of the character, centred in the stage
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(
            self.stage.left() + ((self.stage.width - CHARACTER_CANVAS.width) / 2.0).floor() + 8.0,
            CHARACTER_TOP,
        )
    }

    pub fn stage(&self) -> Stage {
        Stage {
            area: self.stage,
            anchor: self.anchor(),
            canvas: CHARACTER_CANVAS,
        }
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

pub struct DressSession {
    catalog: Arc<Catalog>,
    brief: DressBrief,
    screen: ScreenLayout,
    gallery: Gallery,
    viewport: CatalogViewport,
    ledger: OutfitLedger,
    policy: LayerPolicy,
    resolver: PlacementResolver,
}

impl DressSession {
    pub fn new(catalog: Arc<Catalog>, brief: DressBrief, screen: ScreenLayout, layout: GalleryLayout) -> Self {
        let gallery = Gallery::build(&catalog, layout);
        let viewport = CatalogViewport::new(screen.sidebar, gallery.content_height());
        info!(
            theme = %brief.theme.code,
            character = %brief.character.name,
            garments = catalog.garment_count(),
            "dressing session started"
        );
        Self {
            ledger: OutfitLedger::from_catalog(&catalog),
            policy: LayerPolicy::from_catalog(&catalog),
            resolver: PlacementResolver::new(),
            catalog,
            brief,
            screen,
            gallery,
            viewport,
        }
    }

    /// Pixels per wheel row
    pub fn with_scroll_step(mut self, step: f32) -> Self {
        self.viewport = self.viewport.clone().with_step(step);
        self
    }

    pub fn brief(&self) -> &DressBrief {
        &self.brief
    }

    pub fn screen(&self) -> &ScreenLayout {
        &self.screen
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn viewport(&self) -> &CatalogViewport {
        &self.viewport
    }

    pub fn ledger(&self) -> &OutfitLedger {
        &self.ledger
    }

    pub fn policy(&self) -> &LayerPolicy {
        &self.policy
    }

    /// Worn garments in wearing order
    pub fn worn_garments(&self) -> Vec<Garment> {
        self.resolver
            .worn()
            .iter()
            .filter_map(|id| self.gallery.handle(*id))
            .map(|handle| handle.garment.clone())
            .collect()
    }

    pub fn handle(&mut self, event: InputEvent) -> Option<Transition> {
        match event {
            InputEvent::Wheel { rows, pos } => {
                self.viewport.wheel(rows, pos);
                None
            }
            InputEvent::Pointer(pointer) => {
                self.handle_pointer(pointer);
                None
            }
            InputEvent::Key(Key::Enter) => self.validate(),
            InputEvent::Key(_) => None,
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let stage = self.screen.stage();
        match (event.kind, event.button) {
            (PointerKind::Down, PointerButton::Primary) => {
                if self.viewport.begin_scrollbar_drag(event.pos) {
                    return;
                }
                self.resolver.grab(&mut self.gallery, self.viewport.offset(), event.pos);
            }
            (PointerKind::Move, _) => {
                if self.viewport.drag_scrollbar(event.pos) {
                    return;
                }
                self.resolver.drag(&mut self.gallery, event.pos);
            }
            (PointerKind::Up, PointerButton::Primary) => {
                if self.viewport.end_scrollbar_drag() {
                    return;
                }
                let placement = self
                    .resolver
                    .release(&mut self.gallery, &mut self.ledger, &stage, event.pos);
                if let Some(Placement::Rejected(id)) = placement {
                    debug!(handle = id.0, "category full, garment returned to catalog");
                }
            }
            (PointerKind::Down, PointerButton::Secondary) => {
                self.resolver
                    .remove_at(&mut self.gallery, &mut self.ledger, &self.policy, event.pos);
            }
            (PointerKind::Up, PointerButton::Secondary) => {}
        }
    }

    /// Finish the session. Nothing worn means nothing happens.
    pub fn validate(&self) -> Option<Transition> {
        if self.ledger.is_empty() {
            debug!("validation refused, nothing worn");
            return None;
        }
        let brief = ResultBrief::new(
            self.brief.theme.clone(),
            self.brief.character.clone(),
            self.ledger.all_worn(),
        );
        info!(
            theme = %brief.theme.code,
            garments = brief.worn.len(),
            score = brief.score,
            "outfit validated"
        );
        Some(Transition::Result(brief))
    }

    /// Rebuild the gallery with a new layout, keeping the outfit
    pub fn set_gallery_layout(&mut self, layout: GalleryLayout) {
        let mut next = Gallery::build(&self.catalog, layout);
        self.resolver.rebind(&self.gallery, &mut next, &self.screen.stage());
        self.gallery = next;
        self.viewport.end_scrollbar_drag();
        self.viewport.set_content_height(self.gallery.content_height());
        debug!(columns = layout.columns, "gallery rebuilt");
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        let sidebar = self.screen.sidebar;
        let offset = self.viewport.offset();

        list.panel(PanelRole::SidebarBackground, sidebar);
        for label in self.gallery.labels() {
            let pos = self.viewport.to_screen(label.pos);
            if pos.y >= sidebar.top() && pos.y <= sidebar.bottom() {
                list.text(label.text.clone(), pos, LABEL_TEXT_SIZE);
            }
        }
        for (id, handle) in self.gallery.handles() {
            if handle.grabbed || self.resolver.is_worn(id) {
                continue;
            }
            let rect = handle.displayed_rect(offset);
            if rect.bottom() < sidebar.top() || rect.top() > sidebar.bottom() {
                continue;
            }
            list.sprite(handle.thumb.clone(), rect.top_left());
        }

        list.panel(PanelRole::StageBackground, self.screen.stage);
        list.sprite(
            Sprite::new(self.brief.character.asset.clone(), CHARACTER_CANVAS),
            self.screen.anchor(),
        );
        for id in self.resolver.worn_in_draw_order(&self.gallery, &self.policy) {
            let Some(handle) = self.gallery.handle(id) else {
                continue;
            };
            if handle.grabbed {
                continue;
            }
            if let Some(sprite) = &handle.worn_sprite {
                list.sprite(sprite.clone(), handle.pos);
            }
        }

        if let Some(bar) = self.viewport.scrollbar() {
            list.panel(PanelRole::ScrollRail, bar.rail);
            list.panel(PanelRole::ScrollThumb, bar.thumb);
        }

        list.text(
            HINT_TEXT,
            Vec2::new(self.screen.stage.left() + 20.0, self.screen.height - 30.0),
            HINT_TEXT_SIZE,
        );
        list.aligned_text(
            format!("Theme: {}", self.brief.theme.label),
            Vec2::new(self.screen.width - 20.0, 20.0),
            TITLE_TEXT_SIZE,
            TextAlign::Right,
        );

        if let Some(handle) = self.gallery.grabbed().and_then(|id| self.gallery.handle(id)) {
            let sprite = handle.worn_sprite.clone().unwrap_or_else(|| handle.thumb.clone());
            list.sprite(sprite, handle.pos);
        }
        list
    }
}
