//! Dressing Room core library
//!
//! Outfit composition and interaction engine shared by the CLI and the
//! desktop shell. No I/O: the catalog and users come in through
//! `CatalogStore` / `UserStore`, input comes in as `InputEvent`s and frames
//! go out as `DrawList`s.

pub mod types;
pub mod geometry;
pub mod error;
pub mod catalog;
pub mod ledger;
pub mod layering;
pub mod scoring;
pub mod viewport;
pub mod gallery;
pub mod input;
pub mod draw;
pub mod resolver;
pub mod session;
pub mod transition;
pub mod result;
pub mod account;

pub use types::{
    theme_by_code, Category, CategoryId, CharacterModel, Garment, GarmentId, ModelId, Profile, Sprite, Theme, UserId,
    THEMES,
};
pub use geometry::{Rect, Size, Vec2};
pub use error::{AccountError, Error, Result};
pub use catalog::{Catalog, CatalogStore, MemoryCatalog};
pub use ledger::OutfitLedger;
pub use layering::{LayerPolicy, LayerRank};
pub use scoring::{reward, score};
pub use viewport::CatalogViewport;
pub use gallery::{CatalogEntry, Gallery, GalleryLayout, Handle, HandleId};
pub use input::{InputEvent, Key, PointerButton, PointerEvent, PointerKind};
pub use draw::{DrawItem, DrawList, PanelRole, TextAlign};
pub use resolver::{Placement, PlacementResolver, Stage};
pub use session::{DressSession, ScreenLayout};
pub use transition::{pick_dress_brief, DressBrief, ResultBrief, Transition};
pub use result::ResultView;
pub use account::{NewUser, UserStore, DEFAULT_AVATAR};
