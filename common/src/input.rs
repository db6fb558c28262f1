//! Input events delivered by the presentation layer, already in screen space

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: Vec2,
    pub button: PointerButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    /// Back to the menu from the result screen
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Pointer(PointerEvent),
    /// Positive rows scroll up
    Wheel { rows: f32, pos: Vec2 },
    Key(Key),
}

impl InputEvent {
    pub fn down(pos: impl Into<Vec2>) -> Self {
        Self::pointer(PointerKind::Down, pos, PointerButton::Primary)
    }

    pub fn moved(pos: impl Into<Vec2>) -> Self {
        Self::pointer(PointerKind::Move, pos, PointerButton::Primary)
    }

    pub fn up(pos: impl Into<Vec2>) -> Self {
        Self::pointer(PointerKind::Up, pos, PointerButton::Primary)
    }

    /// Secondary-button press
    pub fn secondary(pos: impl Into<Vec2>) -> Self {
        Self::pointer(PointerKind::Down, pos, PointerButton::Secondary)
    }

    pub fn wheel(rows: f32, pos: impl Into<Vec2>) -> Self {
        Self::Wheel { rows, pos: pos.into() }
    }

    fn pointer(kind: PointerKind, pos: impl Into<Vec2>, button: PointerButton) -> Self {
        Self::Pointer(PointerEvent {
            kind,
            pos: pos.into(),
            button,
        })
    }
}
