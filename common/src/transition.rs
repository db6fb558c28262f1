//! Screen transitions
//!
//! Screens never reach into each other. A screen returns a `Transition`
//! carrying exactly what the next screen needs, and the shell swaps screens.

use crate::scoring;
use crate::types::{CharacterModel, Garment, Profile, Theme, THEMES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the dressing screen is opened with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DressBrief {
    pub character: CharacterModel,
    pub theme: Theme,
}

/// Frozen outcome of a dressing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBrief {
    pub theme: Theme,
    pub character: CharacterModel,
    pub worn: Vec<Garment>,
    pub score: u32,
    pub reward: u32,
}

impl ResultBrief {
    /// Score the outfit against the theme
    pub fn new(theme: Theme, character: CharacterModel, worn: Vec<Garment>) -> Self {
        let score = scoring::score(&theme.code, &worn);
        Self {
            reward: scoring::reward(score),
            theme,
            character,
            worn,
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Login,
    Register,
    Menu(Profile),
    Dress(DressBrief),
    Result(ResultBrief),
    Quit,
}

/// Random theme from the built-in table
pub fn random_theme<R: Rng + ?Sized>(rng: &mut R) -> Theme {
    THEMES
        .choose(rng)
        .map(|(code, label)| Theme::new(*code, *label))
        .unwrap_or_else(|| Theme::new("casual", "Casual"))
}

/// Random theme and character for a new session; the default character
/// stands in when the store has none
pub fn pick_dress_brief<R: Rng + ?Sized>(models: &[CharacterModel], rng: &mut R) -> DressBrief {
    let character = models.choose(rng).cloned().unwrap_or_default();
    DressBrief {
        theme: random_theme(rng),
        character,
    }
}
