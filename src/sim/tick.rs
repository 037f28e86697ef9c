//! Per-frame simulation step
//!
//! Advances every marshmallow by the frame delta, then resolves clicks.

use glam::Vec2;

use super::roast::RoastState;
use super::state::{ClickMode, GamePhase, GameState};

/// Input sampled once per frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in logical pixels
    pub pointer: Vec2,
    /// Primary button is held this frame
    pub button_down: bool,
    /// Primary button went down since the previous frame
    pub button_pressed: bool,
    /// Enter was pressed since the previous frame
    pub confirm: bool,
}

/// Something the frontend may want to react to (sound, logging)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A click resolved on marshmallow `index`, which was in `state`
    Scored {
        index: usize,
        state: RoastState,
        delta: i64,
    },
    PhaseChanged(GamePhase),
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Title => {
            if input.confirm {
                state.start_round();
                events.push(GameEvent::PhaseChanged(GamePhase::Playing));
            }
        }
        GamePhase::Ending => {
            if input.confirm {
                state.phase = GamePhase::Title;
                events.push(GameEvent::PhaseChanged(GamePhase::Title));
            }
        }
        GamePhase::Playing => {
            let clicking = match state.rules.click_mode {
                // A released button never scores, even with a latched press
                ClickMode::Edge => input.button_pressed && input.button_down,
                ClickMode::Level => input.button_down,
            };
            let shape = state.rules.hit_shape;

            for (index, m) in state.marshmallows.iter_mut().enumerate() {
                m.advance(dt);

                if !clicking || !m.hit_test(input.pointer, shape) {
                    continue;
                }
                let roast = m.state();
                if !roast.resets_on_click() {
                    continue;
                }
                let delta = roast.score_delta();
                state.score += delta;
                m.reset();
                events.push(GameEvent::Scored {
                    index,
                    state: roast,
                    delta,
                });
            }

            if state.has_won() {
                state.phase = GamePhase::Ending;
                events.push(GameEvent::PhaseChanged(GamePhase::Ending));
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{HitShape, Rules};

    const FRAME_DT: f32 = 1.0 / 60.0;

    fn playing(rules: Rules) -> GameState {
        let mut state = GameState::new(rules);
        state.start_round();
        state
    }

    fn idle() -> TickInput {
        TickInput {
            pointer: Vec2::new(-100.0, -100.0),
            ..Default::default()
        }
    }

    fn press_at(x: f32, y: f32) -> TickInput {
        TickInput {
            pointer: Vec2::new(x, y),
            button_down: true,
            button_pressed: true,
            confirm: false,
        }
    }

    fn hold_at(x: f32, y: f32) -> TickInput {
        TickInput {
            button_pressed: false,
            ..press_at(x, y)
        }
    }

    /// Run `frames` idle frames of `dt` each
    fn roast_for(state: &mut GameState, frames: usize, dt: f32) {
        for _ in 0..frames {
            tick(state, &idle(), dt);
        }
    }

    #[test]
    fn test_title_waits_for_confirm() {
        let mut state = GameState::new(Rules::default());
        let events = tick(&mut state, &press_at(200.0, 150.0), 3.0);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.marshmallows[0].roast_timer, 0.0);

        let input = TickInput {
            confirm: true,
            ..idle()
        };
        let events = tick(&mut state, &input, FRAME_DT);
        assert_eq!(events, vec![GameEvent::PhaseChanged(GamePhase::Playing)]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_perfect_click_scores_five() {
        let mut state = playing(Rules::default());
        // 50 frames of 0.1 s = 5.0 s
        roast_for(&mut state, 50, 0.1);
        assert_eq!(state.marshmallows[0].state(), RoastState::Perfect);

        let events = tick(&mut state, &press_at(200.0, 150.0), FRAME_DT);
        assert_eq!(state.score, 5);
        assert_eq!(state.marshmallows[0].roast_timer, 0.0);
        assert_eq!(state.marshmallows[0].state(), RoastState::Raw);
        assert_eq!(
            events,
            vec![GameEvent::Scored {
                index: 0,
                state: RoastState::Perfect,
                delta: 5
            }]
        );
        // The others kept roasting
        assert_eq!(state.marshmallows[1].state(), RoastState::Perfect);
    }

    #[test]
    fn test_burnt_click_loses_two() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 70, 0.1);
        assert_eq!(state.marshmallows[0].state(), RoastState::Burnt);

        tick(&mut state, &press_at(200.0, 150.0), FRAME_DT);
        assert_eq!(state.score, -2);
        assert_eq!(state.marshmallows[0].roast_timer, 0.0);
    }

    #[test]
    fn test_toasted_click_scores_one() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 30, 0.1);
        tick(&mut state, &press_at(600.0, 300.0), FRAME_DT);
        assert_eq!(state.score, 1);
        assert_eq!(state.marshmallows[3].roast_timer, 0.0);
        assert!(state.marshmallows[0].roast_timer > 3.0);
    }

    #[test]
    fn test_untouched_marshmallow_burns() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 600, FRAME_DT);
        assert!(state.marshmallows.iter().all(|m| m.state() == RoastState::Burnt));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_raw_click_is_noop() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 10, 0.1);
        let before = state.marshmallows[0].roast_timer;

        let events = tick(&mut state, &press_at(200.0, 150.0), 0.1);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.marshmallows[0].roast_timer > before);
    }

    #[test]
    fn test_released_button_never_scores() {
        let mut state = playing(Rules {
            click_mode: ClickMode::Level,
            ..Rules::default()
        });
        let hover = TickInput {
            pointer: Vec2::new(200.0, 150.0),
            ..Default::default()
        };
        for _ in 0..100 {
            tick(&mut state, &hover, 0.1);
        }
        assert_eq!(state.score, 0);
        assert!(state.marshmallows[0].roast_timer > 9.9);
    }

    #[test]
    fn test_released_button_never_scores_on_edge() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 50, 0.1);
        assert_eq!(state.marshmallows[0].state(), RoastState::Perfect);

        let released = TickInput {
            button_down: false,
            ..press_at(200.0, 150.0)
        };
        let events = tick(&mut state, &released, FRAME_DT);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.marshmallows[0].roast_timer > 5.0);
    }

    #[test]
    fn test_miss_does_nothing() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 50, 0.1);
        let events = tick(&mut state, &press_at(400.0, 500.0), FRAME_DT);
        assert!(events.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_edge_mode_scores_once_per_press() {
        let mut state = playing(Rules::default());
        roast_for(&mut state, 50, 0.1);
        tick(&mut state, &press_at(200.0, 150.0), FRAME_DT);
        assert_eq!(state.score, 5);

        // Keep holding long enough for it to toast again
        for _ in 0..30 {
            tick(&mut state, &hold_at(200.0, 150.0), 0.1);
        }
        assert_eq!(state.score, 5);
        assert_eq!(state.marshmallows[0].state(), RoastState::Toasted);
    }

    #[test]
    fn test_level_mode_rescores_while_held() {
        let mut state = playing(Rules {
            click_mode: ClickMode::Level,
            ..Rules::default()
        });
        roast_for(&mut state, 50, 0.1);
        tick(&mut state, &hold_at(200.0, 150.0), FRAME_DT);
        assert_eq!(state.score, 5);

        // Held: the marshmallow is taken again as soon as it toasts
        for _ in 0..25 {
            tick(&mut state, &hold_at(200.0, 150.0), 0.1);
        }
        assert_eq!(state.score, 6);
        assert!(state.marshmallows[0].roast_timer < 1.0);
    }

    #[test]
    fn test_overlapping_hits_all_score() {
        let mut state = playing(Rules {
            hit_shape: HitShape::Circle,
            ..Rules::default()
        });
        // Stack two marshmallows on the same spot
        state.marshmallows[1].pos = state.marshmallows[0].pos;
        roast_for(&mut state, 50, 0.1);

        let events = tick(&mut state, &press_at(200.0, 150.0), FRAME_DT);
        assert_eq!(events.len(), 2);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_reaching_win_score_ends_round() {
        let mut state = playing(Rules {
            win_score: Some(5),
            ..Rules::default()
        });
        roast_for(&mut state, 50, 0.1);
        let events = tick(&mut state, &press_at(200.0, 150.0), FRAME_DT);
        assert_eq!(events.last(), Some(&GameEvent::PhaseChanged(GamePhase::Ending)));
        assert_eq!(state.phase, GamePhase::Ending);

        // Nothing roasts on the ending screen
        let timer = state.marshmallows[1].roast_timer;
        tick(&mut state, &idle(), 1.0);
        assert_eq!(state.marshmallows[1].roast_timer, timer);

        let confirm = TickInput {
            confirm: true,
            ..idle()
        };
        tick(&mut state, &confirm, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Title);

        // A new round starts clean
        tick(&mut state, &confirm, FRAME_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_collection_size_is_fixed() {
        let mut state = playing(Rules::default());
        let count = state.marshmallows.len();
        for i in 0..200 {
            let input = if i % 3 == 0 { press_at(200.0, 150.0) } else { idle() };
            tick(&mut state, &input, 0.05);
        }
        assert_eq!(state.marshmallows.len(), count);
    }
}
