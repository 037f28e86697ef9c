//! Display list generation
//!
//! Turns a `GameState` into the ordered list of draw commands for one frame.
//! Building a scene only reads the state.

use glam::Vec2;

use crate::assets::SpriteId;
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Which point of a sprite `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// `pos` is the top-left of the text
    Left,
    /// `pos` is the top-centre of the text
    Center,
}

/// A single drawing operation, executed in order
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear([u8; 4]),
    Sprite {
        id: SpriteId,
        pos: Vec2,
        anchor: Anchor,
    },
    Text {
        text: String,
        pos: Vec2,
        px: f32,
        color: [u8; 4],
        align: TextAlign,
    },
}

/// Frontend-only readouts that are not part of the game state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Hud {
    pub fps: Option<u32>,
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
    pub const SCORE: [u8; 4] = [0, 0, 0, 255];
    pub const HEADLINE: [u8; 4] = [200, 200, 200, 255];
    pub const HINT: [u8; 4] = [80, 80, 80, 255];
}

const HEADLINE_PX: f32 = 40.0;
const HINT_PX: f32 = 20.0;
const FPS_PX: f32 = 16.0;

/// Build the display list for the current frame
pub fn build_scene(state: &GameState, hud: &Hud) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear(colors::BACKGROUND)];
    let center = crate::screen_center();

    match state.phase {
        GamePhase::Title => {
            cmds.push(backdrop());
            campfire(state, &mut cmds);
            cmds.push(text_centered(
                "Marshmallow Roasting Game",
                Vec2::new(center.x, center.y - 20.0),
                HEADLINE_PX,
                colors::HEADLINE,
            ));
            cmds.push(text_centered(
                "Press Enter to Start",
                Vec2::new(center.x, center.y + 40.0),
                HINT_PX,
                colors::HINT,
            ));
        }
        GamePhase::Playing => {
            cmds.push(backdrop());
            campfire(state, &mut cmds);
            for m in &state.marshmallows {
                cmds.push(DrawCmd::Sprite {
                    id: SpriteId::for_roast(m.state()),
                    pos: m.pos,
                    anchor: Anchor::Center,
                });
            }
            score_readout(state, hud, &mut cmds);
        }
        GamePhase::Ending => {
            cmds.push(text_centered(
                "Congratulations!",
                Vec2::new(center.x, center.y - 20.0),
                HEADLINE_PX,
                colors::HEADLINE,
            ));
            cmds.push(text_centered(
                &format!("Final score: {}", state.score),
                Vec2::new(center.x, center.y + 30.0),
                HINT_PX,
                colors::SCORE,
            ));
            cmds.push(text_centered(
                "Press Enter to return to Title Screen",
                Vec2::new(center.x, center.y + 60.0),
                HINT_PX,
                colors::HINT,
            ));
        }
    }

    cmds
}

fn backdrop() -> DrawCmd {
    DrawCmd::Sprite {
        id: SpriteId::Background,
        pos: Vec2::ZERO,
        anchor: Anchor::TopLeft,
    }
}

/// Bonfire at the bottom and one platform under each level of marshmallows
fn campfire(state: &GameState, cmds: &mut Vec<DrawCmd>) {
    cmds.push(DrawCmd::Sprite {
        id: SpriteId::Bonfire,
        pos: Vec2::new(SCREEN_WIDTH as f32 / 2.0, SCREEN_HEIGHT as f32),
        anchor: Anchor::BottomCenter,
    });

    let mut levels: Vec<f32> = Vec::new();
    for m in &state.marshmallows {
        if !levels.contains(&m.pos.y) {
            levels.push(m.pos.y);
        }
    }
    for y in levels {
        cmds.push(DrawCmd::Sprite {
            id: SpriteId::Platform,
            pos: Vec2::new(SCREEN_WIDTH as f32 / 2.0, y + MARSHMALLOW_SIZE),
            anchor: Anchor::Center,
        });
    }
}

fn score_readout(state: &GameState, hud: &Hud, cmds: &mut Vec<DrawCmd>) {
    let origin = Vec2::new(SCORE_POS.0, SCORE_POS.1);
    cmds.push(DrawCmd::Text {
        text: format!("Score: {}", state.score),
        pos: origin,
        px: SCORE_FONT_PX,
        color: colors::SCORE,
        align: TextAlign::Left,
    });
    if let Some(fps) = hud.fps {
        cmds.push(DrawCmd::Text {
            text: format!("{fps} FPS"),
            pos: origin + Vec2::new(0.0, SCORE_FONT_PX + 4.0),
            px: FPS_PX,
            color: colors::HINT,
            align: TextAlign::Left,
        });
    }
}

fn text_centered(text: &str, pos: Vec2, px: f32, color: [u8; 4]) -> DrawCmd {
    DrawCmd::Text {
        text: text.to_string(),
        pos,
        px,
        color,
        align: TextAlign::Center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Rules, TickInput, tick};

    fn playing() -> GameState {
        let mut state = GameState::new(Rules::default());
        state.start_round();
        state
    }

    fn sprites(cmds: &[DrawCmd]) -> Vec<(SpriteId, Vec2)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Sprite { id, pos, .. } => Some((*id, *pos)),
                _ => None,
            })
            .collect()
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scene_starts_with_clear() {
        let cmds = build_scene(&playing(), &Hud::default());
        assert_eq!(cmds[0], DrawCmd::Clear(colors::BACKGROUND));
    }

    #[test]
    fn test_marshmallow_sprites_follow_roast_state() {
        let mut state = playing();
        state.marshmallows[0].advance(5.0);
        state.marshmallows[1].advance(7.0);
        state.marshmallows[2].advance(3.0);

        let drawn = sprites(&build_scene(&state, &Hud::default()));
        assert!(drawn.contains(&(SpriteId::MarshmallowBrown, Vec2::new(200.0, 150.0))));
        assert!(drawn.contains(&(SpriteId::MarshmallowBlack, Vec2::new(600.0, 150.0))));
        assert!(drawn.contains(&(SpriteId::MarshmallowYellow, Vec2::new(200.0, 300.0))));
        assert!(drawn.contains(&(SpriteId::MarshmallowWhite, Vec2::new(600.0, 300.0))));
    }

    #[test]
    fn test_one_platform_per_level() {
        let drawn = sprites(&build_scene(&playing(), &Hud::default()));
        let platforms = drawn.iter().filter(|(id, _)| *id == SpriteId::Platform).count();
        assert_eq!(platforms, 2);
        assert_eq!(drawn[1].0, SpriteId::Bonfire);
    }

    #[test]
    fn test_background_behind_title_and_play() {
        let mut state = GameState::new(Rules::default());
        let title = build_scene(&state, &Hud::default());
        assert_eq!(
            title[1],
            DrawCmd::Sprite {
                id: SpriteId::Background,
                pos: Vec2::ZERO,
                anchor: Anchor::TopLeft,
            }
        );

        state.start_round();
        assert_eq!(sprites(&build_scene(&state, &Hud::default()))[0].0, SpriteId::Background);

        state.phase = GamePhase::Ending;
        assert!(sprites(&build_scene(&state, &Hud::default())).is_empty());
    }

    #[test]
    fn test_score_readout() {
        let mut state = playing();
        state.score = -4;
        let cmds = build_scene(&state, &Hud::default());
        assert_eq!(texts(&cmds), vec!["Score: -4".to_string()]);

        let with_fps = build_scene(&state, &Hud { fps: Some(60) });
        assert_eq!(texts(&with_fps), vec!["Score: -4".to_string(), "60 FPS".to_string()]);
    }

    #[test]
    fn test_title_and_ending_screens() {
        let mut state = GameState::new(Rules::default());
        let title = texts(&build_scene(&state, &Hud::default()));
        assert!(title.contains(&"Press Enter to Start".to_string()));
        assert!(
            !sprites(&build_scene(&state, &Hud::default()))
                .iter()
                .any(|(id, _)| *id == SpriteId::MarshmallowWhite)
        );

        state.phase = GamePhase::Ending;
        state.score = 52;
        let ending = texts(&build_scene(&state, &Hud::default()));
        assert!(ending.contains(&"Congratulations!".to_string()));
        assert!(ending.contains(&"Final score: 52".to_string()));
    }

    #[test]
    fn test_rebuilding_is_stable_and_read_only() {
        let mut state = playing();
        for _ in 0..90 {
            tick(&mut state, &TickInput::default(), 1.0 / 30.0);
        }
        let before = state.marshmallows.clone();

        let first = build_scene(&state, &Hud::default());
        let second = build_scene(&state, &Hud::default());
        assert_eq!(first, second);
        assert_eq!(state.marshmallows, before);
    }
}
