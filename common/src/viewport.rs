//! Catalog scroll viewport
//!
//! Maps the vertically stacked catalog onto the sidebar. The offset is kept
//! in `[0, max(0, content_height - viewport_height)]` after every change.
//! Idle handles are drawn and hit-tested at `base.y - offset`.

use crate::geometry::{Rect, Vec2};

/// Pixels scrolled per wheel row
pub const SCROLL_STEP: f32 = 40.0;
pub const SCROLLBAR_MIN_THUMB: f32 = 30.0;
const SCROLLBAR_MARGIN: f32 = 10.0;

/// Rail and thumb rectangles in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarGeometry {
    pub rail: Rect,
    pub thumb: Rect,
}

#[derive(Debug, Clone)]
pub struct CatalogViewport {
    area: Rect,
    content_height: f32,
    offset: f32,
    step: f32,
    /// Pointer-to-thumb-top distance while the thumb is being dragged
    thumb_grab: Option<f32>,
}

impl CatalogViewport {
    pub fn new(area: Rect, content_height: f32) -> Self {
        Self {
            area,
            content_height: content_height.max(0.0),
            offset: 0.0,
            step: SCROLL_STEP,
            thumb_grab: None,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step.max(1.0);
        self
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.area.height).max(0.0)
    }

    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Content changed size (catalog rebuilt); re-clamp the offset
    pub fn set_content_height(&mut self, content_height: f32) {
        self.content_height = content_height.max(0.0);
        self.set_offset(self.offset);
    }

    /// Positive rows scroll towards the top of the catalog
    pub fn scroll_rows(&mut self, rows: f32) {
        self.set_offset(self.offset - rows * self.step);
    }

    /// Wheel input only scrolls when the pointer is over the catalog strip
    pub fn wheel(&mut self, rows: f32, pointer: Vec2) -> bool {
        if !self.area.contains(pointer) {
            return false;
        }
        self.scroll_rows(rows);
        true
    }

    /// Screen position of a logical catalog position
    pub fn to_screen(&self, logical: Vec2) -> Vec2 {
        Vec2::new(logical.x, logical.y - self.offset)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.area.height
    }

    fn thumb_height(&self) -> f32 {
        let ratio = self.area.height / self.content_height;
        (self.area.height * ratio).floor().max(SCROLLBAR_MIN_THUMB)
    }

    fn rail_height(&self) -> f32 {
        self.area.height - SCROLLBAR_MARGIN * 2.0
    }

    pub fn scrollbar(&self) -> Option<ScrollbarGeometry> {
        if !self.is_scrollable() {
            return None;
        }
        let thumb_h = self.thumb_height();
        let thumb_y = (self.offset / self.max_offset() * (self.area.height - thumb_h)).floor();
        let top = self.area.top() + SCROLLBAR_MARGIN;
        Some(ScrollbarGeometry {
            rail: Rect::new(self.area.right() - 10.0, top, 4.0, self.rail_height()),
            thumb: Rect::new(self.area.right() - 14.0, top + thumb_y, 12.0, thumb_h),
        })
    }

    /// Pointer-down on the scrollbar: grabbing the thumb starts a drag,
    /// clicking the rail column jumps there and drags from the thumb centre.
    /// Returns whether the scrollbar consumed the gesture.
    pub fn begin_scrollbar_drag(&mut self, pointer: Vec2) -> bool {
        let Some(bar) = self.scrollbar() else {
            return false;
        };
        if bar.thumb.contains(pointer) {
            self.thumb_grab = Some(pointer.y - bar.thumb.top());
            return true;
        }

        let top = self.area.top() + SCROLLBAR_MARGIN;
        let in_column = pointer.x >= self.area.right() - 14.0
            && pointer.x <= self.area.right() - 2.0
            && pointer.y >= top
            && pointer.y <= self.area.bottom() - SCROLLBAR_MARGIN;
        if !bar.rail.contains(pointer) && !in_column {
            return false;
        }

        let rail_h = self.rail_height();
        let ratio = if rail_h > 0.0 { (pointer.y - top) / rail_h } else { 0.0 };
        self.set_offset((ratio * self.max_offset()).floor());
        self.thumb_grab = Some((bar.thumb.height / 2.0).floor());
        true
    }

    pub fn drag_scrollbar(&mut self, pointer: Vec2) -> bool {
        let Some(grab) = self.thumb_grab else {
            return false;
        };
        if !self.is_scrollable() {
            return true;
        }
        let thumb_h = self.thumb_height();
        let travel = self.rail_height() - thumb_h;
        let thumb_top = (pointer.y - self.area.top() - SCROLLBAR_MARGIN - grab).clamp(0.0, travel.max(0.0));
        let ratio = if travel > 0.0 { thumb_top / travel } else { 0.0 };
        self.set_offset((ratio * self.max_offset()).floor());
        true
    }

    pub fn end_scrollbar_drag(&mut self) -> bool {
        self.thumb_grab.take().is_some()
    }

    pub fn is_dragging_scrollbar(&self) -> bool {
        self.thumb_grab.is_some()
    }
}
