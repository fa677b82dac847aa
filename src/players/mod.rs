//! Computer opponents.
//!
//! A [`Robot`] is a stateless policy keyed by [`Difficulty`](crate::gameplay::Difficulty).
//! It only ever picks among actions the round engine already deems legal,
//! and mutates the game solely through the engine's own actions.
pub mod robot;
pub use robot::*;
