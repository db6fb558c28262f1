//! Headless session driver
//!
//! Replays a JSON script of pointer, wheel and key events through a
//! `DressSession`, the same way the desktop shell feeds it frame by frame.

use crate::config::Config;
use crate::error::{DressingError, Result};
use dressing_core::{
    pick_dress_brief, theme_by_code, Catalog, DressBrief, DressSession, Garment, InputEvent, Key, ModelId, ResultBrief,
    ScreenLayout, Transition,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptEvent {
    Down([f32; 2]),
    Move([f32; 2]),
    Up([f32; 2]),
    /// Secondary click
    Right([f32; 2]),
    Wheel { rows: f32, at: [f32; 2] },
    /// Rebuild the gallery with this many columns
    Columns(u32),
    Enter,
}

impl ScriptEvent {
    fn to_input(&self) -> Option<InputEvent> {
        let point = |[x, y]: [f32; 2]| (x, y);
        match self {
            ScriptEvent::Down(at) => Some(InputEvent::down(point(*at))),
            ScriptEvent::Move(at) => Some(InputEvent::moved(point(*at))),
            ScriptEvent::Up(at) => Some(InputEvent::up(point(*at))),
            ScriptEvent::Right(at) => Some(InputEvent::secondary(point(*at))),
            ScriptEvent::Wheel { rows, at } => Some(InputEvent::wheel(*rows, point(*at))),
            ScriptEvent::Enter => Some(InputEvent::Key(Key::Enter)),
            ScriptEvent::Columns(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Theme code; random when absent
    pub theme: Option<String>,
    /// Character model id; random when absent
    pub model: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub columns: Option<u32>,
    pub events: Vec<ScriptEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| DressingError::Script(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn brief<R: Rng>(&self, catalog: &Catalog, rng: &mut R) -> Result<DressBrief> {
        let mut brief = pick_dress_brief(catalog.models(), rng);
        if let Some(code) = &self.theme {
            brief.theme = theme_by_code(code).ok_or_else(|| DressingError::UnknownTheme(code.clone()))?;
        }
        if let Some(id) = self.model {
            brief.character = catalog
                .models()
                .iter()
                .find(|model| model.id == ModelId(id))
                .cloned()
                .ok_or_else(|| DressingError::Script(format!("unknown character model {id}")))?;
        }
        Ok(brief)
    }
}

/// What a replay ended with
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub brief: DressBrief,
    /// Present when the script validated the outfit
    pub result: Option<ResultBrief>,
    /// Worn garments when the script stopped, in wearing order
    pub worn: Vec<Garment>,
    /// Events fed before the script ended or validated
    pub consumed: usize,
    /// Items in the last frame drawn
    pub draw_items: usize,
}

pub fn replay<R: Rng>(script: &ReplayScript, catalog: Arc<Catalog>, config: &Config, rng: &mut R) -> Result<ReplayOutcome> {
    let brief = script.brief(&catalog, rng)?;
    let screen = ScreenLayout::new(
        script.width.unwrap_or(config.window_width) as f32,
        script.height.unwrap_or(config.window_height) as f32,
    );
    let mut layout = config.gallery_layout();
    if let Some(columns) = script.columns {
        layout.columns = columns.max(1);
    }

    let mut session = DressSession::new(catalog, brief.clone(), screen, layout)
        .with_scroll_step(config.scroll_step.max(1) as f32);
    let mut result = None;
    let mut consumed = 0;

    for event in &script.events {
        consumed += 1;
        if let ScriptEvent::Columns(columns) = event {
            layout.columns = (*columns).max(1);
            session.set_gallery_layout(layout);
            continue;
        }
        let Some(input) = event.to_input() else {
            continue;
        };
        debug!(?event, "replaying");
        if let Some(Transition::Result(finished)) = session.handle(input) {
            result = Some(finished);
            break;
        }
    }
    if consumed < script.events.len() {
        warn!(
            skipped = script.events.len() - consumed,
            "outfit validated before the end of the script"
        );
    }

    Ok(ReplayOutcome {
        worn: session.worn_garments(),
        draw_items: session.draw().len(),
        brief,
        result,
        consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_event_shape() {
        let script = ReplayScript::from_json(
            r#"{
                "theme": "chic",
                "events": [
                    {"down": [100, 200]},
                    {"move": [600, 300]},
                    {"up": [600, 300]},
                    {"right": [600, 300]},
                    {"wheel": {"rows": -2, "at": [100, 100]}},
                    {"columns": 2},
                    "enter"
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.theme.as_deref(), Some("chic"));
        assert_eq!(script.events.len(), 7);
        assert_eq!(script.events[0], ScriptEvent::Down([100.0, 200.0]));
        assert_eq!(
            script.events[4],
            ScriptEvent::Wheel {
                rows: -2.0,
                at: [100.0, 100.0]
            }
        );
        assert_eq!(script.events[6], ScriptEvent::Enter);
    }

    #[test]
    fn test_bad_script_is_script_error() {
        let err = ReplayScript::from_json(r#"{"events": [{"jump": [1, 2]}]}"#).unwrap_err();
        assert!(matches!(err, DressingError::Script(_)));
    }
}
