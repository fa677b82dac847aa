//! Round engine for 31.
//!
//! [`Game`] owns one round-sequence: ordered seats, draw and discard piles,
//! the turn pointer, knock state, lives, and narration. Its four mutating
//! actions (draw, discard, knock, forced timeout) each either apply fully or
//! return `false` without touching state.
pub mod action;
pub use action::*;

pub mod difficulty;
pub use difficulty::*;

pub mod game;
pub use game::*;

pub mod narration;
pub use narration::*;

pub mod phase;
pub use phase::*;

pub mod player;
pub use player::*;

pub mod settlement;
pub use settlement::*;

pub mod view;
pub use view::*;
