//! Roast progression and the scoring table

use crate::consts::{PERFECT_UNTIL, RAW_UNTIL, TOASTED_UNTIL};

/// How done a marshmallow is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoastState {
    Raw,
    Toasted,
    Perfect,
    Burnt,
}

/// Sound played when a click resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Click,
    Burn,
}

/// Derive the roast state from seconds since the last reset.
///
/// Upper bounds are inclusive: exactly 2.0 s is still Raw, exactly 6.0 s is
/// still Perfect. Negative or NaN input counts as Raw.
pub fn roast_state(t: f32) -> RoastState {
    if t > PERFECT_UNTIL {
        RoastState::Burnt
    } else if t > TOASTED_UNTIL {
        RoastState::Perfect
    } else if t > RAW_UNTIL {
        RoastState::Toasted
    } else {
        RoastState::Raw
    }
}

impl RoastState {
    /// Points awarded for clicking a marshmallow in this state
    pub fn score_delta(self) -> i64 {
        match self {
            RoastState::Raw => 0,
            RoastState::Toasted => 1,
            RoastState::Perfect => 5,
            RoastState::Burnt => -2,
        }
    }

    pub fn sound_cue(self) -> Option<SoundCue> {
        match self {
            RoastState::Raw => None,
            RoastState::Toasted | RoastState::Perfect => Some(SoundCue::Click),
            RoastState::Burnt => Some(SoundCue::Burn),
        }
    }

    /// Raw marshmallows ignore clicks and keep roasting
    pub fn resets_on_click(self) -> bool {
        self != RoastState::Raw
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoastState::Raw => "raw",
            RoastState::Toasted => "toasted",
            RoastState::Perfect => "perfect",
            RoastState::Burnt => "burnt",
        }
    }
}
