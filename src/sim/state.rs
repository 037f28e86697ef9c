//! Game state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::marshmallow::{HitShape, Marshmallow};
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for Enter
    Title,
    /// Marshmallows roasting, clicks score
    Playing,
    /// Winning score reached, waiting for Enter
    Ending,
}

/// When a held pointer button resolves clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    /// Once per press, on the frame the button goes down
    #[default]
    Edge,
    /// Every frame the button is held
    Level,
}

/// Gameplay rules fixed for the lifetime of a `GameState`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub click_mode: ClickMode,
    pub hit_shape: HitShape,
    /// Score that ends the round; `None` plays forever
    pub win_score: Option<i64>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            click_mode: ClickMode::Edge,
            hit_shape: HitShape::Square,
            win_score: Some(DEFAULT_WIN_SCORE),
        }
    }
}

/// Complete game state. Owns the score; nothing here is global.
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: Rules,
    pub phase: GamePhase,
    pub score: i64,
    /// Fixed for the process lifetime; never grows or shrinks
    pub marshmallows: Vec<Marshmallow>,
}

impl GameState {
    /// New game on the title screen
    pub fn new(rules: Rules) -> Self {
        let marshmallows = MARSHMALLOW_POSITIONS
            .iter()
            .map(|&(x, y)| Marshmallow::new(Vec2::new(x, y)))
            .collect();

        Self {
            rules,
            phase: GamePhase::Title,
            score: 0,
            marshmallows,
        }
    }

    /// Fresh round: score zero, every marshmallow raw, phase `Playing`
    pub fn start_round(&mut self) {
        self.score = 0;
        for m in &mut self.marshmallows {
            m.reset();
        }
        self.phase = GamePhase::Playing;
    }

    pub fn has_won(&self) -> bool {
        self.rules.win_score.is_some_and(|target| self.score >= target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RoastState;

    #[test]
    fn test_new_state() {
        let state = GameState::new(Rules::default());
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.marshmallows.len(), MARSHMALLOW_POSITIONS.len());
        assert_eq!(state.marshmallows[0].pos, Vec2::new(200.0, 150.0));
        assert!(state.marshmallows.iter().all(|m| m.state() == RoastState::Raw));
    }

    #[test]
    fn test_start_round_resets_everything() {
        let mut state = GameState::new(Rules::default());
        state.score = 17;
        state.marshmallows[2].advance(5.0);

        state.start_round();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.marshmallows.iter().all(|m| m.roast_timer == 0.0));
    }

    #[test]
    fn test_has_won() {
        let mut state = GameState::new(Rules::default());
        state.score = DEFAULT_WIN_SCORE - 1;
        assert!(!state.has_won());
        state.score = DEFAULT_WIN_SCORE;
        assert!(state.has_won());

        let mut endless = GameState::new(Rules {
            win_score: None,
            ..Rules::default()
        });
        endless.score = 10_000;
        assert!(!endless.has_won());
    }
}
