//! Scoring engine
//!
//! Pure functions over the finished outfit; order of garments never matters.

use crate::types::Garment;

pub const BASE_SCORE: i64 = 50;
pub const THEME_BONUS: i64 = 15;
pub const OVERDRESS_PENALTY: i64 = 5;
/// Garments allowed before the overdress penalty applies
pub const FREE_GARMENTS: i64 = 4;

/// 50 + 15 per garment matching the theme - 5 per garment beyond four,
/// floored at zero
pub fn score(theme_code: &str, garments: &[Garment]) -> u32 {
    let matching = garments
        .iter()
        .filter(|garment| garment.theme.as_deref() == Some(theme_code))
        .count() as i64;
    let penalty = (garments.len() as i64 - FREE_GARMENTS).max(0) * OVERDRESS_PENALTY;
    (BASE_SCORE + matching * THEME_BONUS - penalty).max(0) as u32
}

/// Money earned for a score: five per full ten points
pub fn reward(score: u32) -> u32 {
    (score / 10) * 5
}
