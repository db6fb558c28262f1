//! Placement resolver
//!
//! The drag-and-drop state machine between the gallery and the character.
//! A handle is idle in its catalog slot, grabbed while following the
//! pointer, or worn at the character anchor. Capacity is only checked on
//! release; nothing is validated mid-drag.
//!
//! Release over the stage:
//! - room in the category: wear it
//! - category full: swap out the earliest-worn garment of that category
//! - nothing to swap: back to the catalog, ledger untouched
//!
//! Release anywhere else sends the handle back to its catalog slot and
//! takes it off if it was worn.

use crate::gallery::{Gallery, HandleId};
use crate::geometry::{Rect, Size, Vec2};
use crate::layering::LayerPolicy;
use crate::ledger::OutfitLedger;
use crate::types::Sprite;
use tracing::debug;

/// The character region and where worn garments are drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub area: Rect,
    /// Top-left of the character canvas; every worn sprite is drawn here
    pub anchor: Vec2,
    pub canvas: Size,
}

/// What a release gesture resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Added(HandleId),
    Replaced { added: HandleId, removed: HandleId },
    /// Dropped on the stage with nothing to swap out
    Rejected(HandleId),
    /// Dropped outside the stage without having been worn
    Returned(HandleId),
    /// A worn garment dragged off the stage
    Unworn(HandleId),
    /// A worn garment dropped back on the stage
    Repositioned(HandleId),
}

#[derive(Debug, Clone, Default)]
pub struct PlacementResolver {
    /// Worn handles in wearing order
    worn: Vec<HandleId>,
}

impl PlacementResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn worn(&self) -> &[HandleId] {
        &self.worn
    }

    pub fn is_worn(&self, id: HandleId) -> bool {
        self.worn.contains(&id)
    }

    /// Pointer-down: grab the topmost handle under the pointer
    pub fn grab(&mut self, gallery: &mut Gallery, scroll_offset: f32, pointer: Vec2) -> Option<HandleId> {
        if gallery.grabbed().is_some() {
            return None;
        }
        let id = gallery
            .handles()
            .rev()
            .find(|(_, handle)| handle.displayed_rect(scroll_offset).contains(pointer))
            .map(|(id, _)| id)?;

        let handle = gallery.handle_mut(id)?;
        let shown = handle.displayed_pos(scroll_offset);
        handle.grabbed = true;
        handle.pos = shown;
        handle.grab_offset = pointer - shown;
        debug!(garment = %handle.garment.id, "garment grabbed");
        Some(id)
    }

    /// Pointer-move: the grabbed handle follows with its grab offset
    pub fn drag(&mut self, gallery: &mut Gallery, pointer: Vec2) -> bool {
        let Some(id) = gallery.grabbed() else {
            return false;
        };
        let Some(handle) = gallery.handle_mut(id) else {
            return false;
        };
        handle.pos = pointer - handle.grab_offset;
        true
    }

    /// Pointer-up: resolve the drop
    pub fn release(
        &mut self,
        gallery: &mut Gallery,
        ledger: &mut OutfitLedger,
        stage: &Stage,
        pointer: Vec2,
    ) -> Option<Placement> {
        let id = gallery.grabbed()?;
        if let Some(handle) = gallery.handle_mut(id) {
            handle.grabbed = false;
        }

        let placement = if stage.area.contains(pointer) {
            self.drop_on_stage(gallery, ledger, stage, id)
        } else {
            self.drop_outside_stage(gallery, ledger, id)
        };
        debug!(?placement, "drop resolved");
        Some(placement)
    }

    fn drop_on_stage(
        &mut self,
        gallery: &mut Gallery,
        ledger: &mut OutfitLedger,
        stage: &Stage,
        id: HandleId,
    ) -> Placement {
        let Some(garment) = gallery.handle(id).map(|handle| handle.garment.clone()) else {
            return Placement::Rejected(id);
        };

        if self.is_worn(id) {
            self.wear(gallery, stage, id);
            return Placement::Repositioned(id);
        }

        if ledger.can_add(&garment) && ledger.add(&garment) {
            self.wear(gallery, stage, id);
            return Placement::Added(id);
        }

        let occupant = self.worn.iter().copied().find(|worn| {
            gallery
                .handle(*worn)
                .map(|handle| handle.garment.category_id == garment.category_id)
                .unwrap_or(false)
        });

        match occupant {
            Some(removed) => {
                self.take_off(gallery, ledger, removed);
                if !ledger.add(&garment) {
                    return Self::reject(gallery, id);
                }
                self.wear(gallery, stage, id);
                Placement::Replaced { added: id, removed }
            }
            None => Self::reject(gallery, id),
        }
    }

    fn reject(gallery: &mut Gallery, id: HandleId) -> Placement {
        if let Some(handle) = gallery.handle_mut(id) {
            handle.restore_to_catalog();
        }
        Placement::Rejected(id)
    }

    fn drop_outside_stage(&mut self, gallery: &mut Gallery, ledger: &mut OutfitLedger, id: HandleId) -> Placement {
        if self.is_worn(id) {
            self.take_off(gallery, ledger, id);
            return Placement::Unworn(id);
        }
        if let Some(handle) = gallery.handle_mut(id) {
            handle.restore_to_catalog();
        }
        Placement::Returned(id)
    }

    fn wear(&mut self, gallery: &mut Gallery, stage: &Stage, id: HandleId) {
        if let Some(handle) = gallery.handle_mut(id) {
            handle.worn_sprite = Some(Sprite::new(handle.garment.asset.clone(), stage.canvas));
            handle.pos = stage.anchor;
            debug!(garment = %handle.garment.id, "garment worn");
        }
        if !self.worn.contains(&id) {
            self.worn.push(id);
        }
    }

    fn take_off(&mut self, gallery: &mut Gallery, ledger: &mut OutfitLedger, id: HandleId) {
        if let Some(handle) = gallery.handle_mut(id) {
            ledger.remove(&handle.garment);
            handle.restore_to_catalog();
            debug!(garment = %handle.garment.id, "garment taken off");
        }
        self.worn.retain(|worn| *worn != id);
    }

    /// Worn handles back to front
    pub fn worn_in_draw_order(&self, gallery: &Gallery, policy: &LayerPolicy) -> Vec<HandleId> {
        let mut order: Vec<HandleId> = self
            .worn
            .iter()
            .copied()
            .filter(|id| gallery.handle(*id).is_some())
            .collect();
        order.sort_by_key(|id| {
            gallery
                .handle(*id)
                .map(|handle| policy.layer_for(&handle.garment))
                .unwrap_or_default()
        });
        order
    }

    /// Secondary click: take off the worn garment drawn on top at the pointer
    pub fn remove_at(
        &mut self,
        gallery: &mut Gallery,
        ledger: &mut OutfitLedger,
        policy: &LayerPolicy,
        pointer: Vec2,
    ) -> Option<HandleId> {
        let hit = self
            .worn_in_draw_order(gallery, policy)
            .into_iter()
            .rev()
            .find(|id| {
                gallery
                    .handle(*id)
                    .and_then(|handle| handle.worn_rect())
                    .map(|rect| rect.contains(pointer))
                    .unwrap_or(false)
            })?;
        self.take_off(gallery, ledger, hit);
        Some(hit)
    }

    /// Carry worn state over to a freshly rebuilt gallery
    pub fn rebind(&mut self, previous: &Gallery, next: &mut Gallery, stage: &Stage) {
        let garments: Vec<_> = self
            .worn
            .iter()
            .filter_map(|id| previous.handle(*id).map(|handle| handle.garment.id))
            .collect();
        self.worn.clear();
        for garment in garments {
            if let Some(id) = next.find_garment(garment) {
                self.wear(next, stage, id);
            }
        }
    }
}
