//! Result screen
//!
//! Shows the score and money on the left half and the dressed character on
//! the right half, garments stacked with the same layering as the stage.

use crate::draw::{DrawList, PanelRole};
use crate::geometry::{Rect, Vec2};
use crate::input::{InputEvent, Key};
use crate::layering::LayerPolicy;
use crate::session::{ScreenLayout, CHARACTER_CANVAS, CHARACTER_TOP};
use crate::transition::{ResultBrief, Transition};
use crate::types::{Garment, Profile, Sprite};

const TITLE_TEXT_SIZE: f32 = 28.0;
const DETAIL_TEXT_SIZE: f32 = 20.0;

pub struct ResultView {
    brief: ResultBrief,
    screen: ScreenLayout,
    left_panel: Rect,
    right_panel: Rect,
    /// Worn garments back to front
    layered: Vec<Garment>,
}

impl ResultView {
    pub fn new(brief: ResultBrief, policy: &LayerPolicy, screen: ScreenLayout) -> Self {
        let half = (screen.width / 2.0).floor();
        let mut layered = brief.worn.clone();
        policy.sort_by_layer(&mut layered, |garment| garment);
        Self {
            left_panel: Rect::new(0.0, 0.0, half, screen.height),
            right_panel: Rect::new(half, 0.0, half, screen.height),
            brief,
            screen,
            layered,
        }
    }

    pub fn brief(&self) -> &ResultBrief {
        &self.brief
    }

    pub fn left_panel(&self) -> Rect {
        self.left_panel
    }

    pub fn layered(&self) -> &[Garment] {
        &self.layered
    }

    /// Where the character and every garment are drawn
    pub fn character_pos(&self) -> Vec2 {
        Vec2::new(
            self.right_panel.center_x() - (CHARACTER_CANVAS.width / 2.0).floor(),
            CHARACTER_TOP,
        )
    }

    /// R goes back to the signed-in user's menu
    pub fn handle(&self, event: InputEvent, profile: &Profile) -> Option<Transition> {
        match event {
            InputEvent::Key(Key::R) => Some(Transition::Menu(profile.clone())),
            _ => None,
        }
    }

    pub fn draw(&self) -> DrawList {
        let mut list = DrawList::new();
        list.panel(
            PanelRole::Backdrop,
            Rect::new(0.0, 0.0, self.screen.width, self.screen.height),
        );

        list.text(
            format!("Result: theme {}", self.brief.theme.label),
            Vec2::new(20.0, 20.0),
            TITLE_TEXT_SIZE,
        );
        list.text(format!("Score: {}", self.brief.score), Vec2::new(20.0, 80.0), DETAIL_TEXT_SIZE);
        list.text(
            format!("Money earned: {}", self.brief.reward),
            Vec2::new(40.0, 160.0),
            DETAIL_TEXT_SIZE,
        );
        list.text("R = back to menu", Vec2::new(40.0, 220.0), DETAIL_TEXT_SIZE);

        let pos = self.character_pos();
        list.sprite(Sprite::new(self.brief.character.asset.clone(), CHARACTER_CANVAS), pos);
        for garment in &self.layered {
            list.sprite(Sprite::new(garment.asset.clone(), CHARACTER_CANVAS), pos);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawItem;
    use crate::types::{Category, CharacterModel, Theme, UserId};

    fn view() -> ResultView {
        let policy = LayerPolicy::from_categories(&[
            Category::new(1, "Accessory", 2),
            Category::new(2, "Shoes", 1),
            Category::new(3, "Dress", 1),
        ]);
        let worn = vec![
            Garment::new(1, "Pearls", 1, "pearls.png").with_theme("soiree"),
            Garment::new(2, "Heels", 2, "heels.png").with_theme("soiree"),
            Garment::new(3, "Gown", 3, "gown.png").with_theme("soiree"),
        ];
        let brief = ResultBrief::new(Theme::new("soiree", "Soirée"), CharacterModel::default(), worn);
        ResultView::new(brief, &policy, ScreenLayout::default())
    }

    #[test]
    fn test_garments_layered_like_stage() {
        let view = view();
        let names: Vec<&str> = view.layered().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Heels", "Gown", "Pearls"]);
    }

    #[test]
    fn test_character_centred_in_right_half() {
        let view = view();
        assert_eq!(view.character_pos(), Vec2::new(588.0, 80.0));
        let list = view.draw();
        let sprites: Vec<Vec2> = list
            .items()
            .iter()
            .filter_map(|item| match item {
                DrawItem::Sprite { pos, .. } => Some(*pos),
                _ => None,
            })
            .collect();
        assert_eq!(sprites.len(), 4);
        assert!(sprites.iter().all(|pos| *pos == view.character_pos()));
        assert_eq!(
            list.sprite_assets(),
            vec!["assets/mannequins/mannequin_base.png", "heels.png", "gown.png", "pearls.png"]
        );
    }

    #[test]
    fn test_summary_text() {
        let view = view();
        assert_eq!(view.brief().score, 95);
        let texts: Vec<String> = view
            .draw()
            .into_iter()
            .filter_map(|item| match item {
                DrawItem::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Score: 95".to_string()));
        assert!(texts.contains(&"Money earned: 45".to_string()));
    }

    #[test]
    fn test_r_returns_to_menu() {
        let profile = Profile {
            id: UserId(1),
            username: "mira".into(),
            display_name: "Mira".into(),
            avatar: "assets/avatars/default.png".into(),
        };
        let view = view();
        assert_eq!(
            view.handle(InputEvent::Key(Key::R), &profile),
            Some(Transition::Menu(profile.clone()))
        );
        assert!(view.handle(InputEvent::Key(Key::Enter), &profile).is_none());
    }
}
