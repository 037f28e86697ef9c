//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt` passed to `tick`
//! - Input only enters through `TickInput`
//! - No rendering, audio or platform dependencies

pub mod marshmallow;
pub mod roast;
pub mod state;
pub mod tick;

pub use marshmallow::{HitShape, Marshmallow};
pub use roast::{RoastState, SoundCue, roast_state};
pub use state::{ClickMode, GamePhase, GameState, Rules};
pub use tick::{GameEvent, TickInput, tick};
