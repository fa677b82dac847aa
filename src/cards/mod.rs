//! Card representation and 31-point scoring.
//!
//! - [`Card`]: A single card as a `(Rank, Suit)` tuple encoded in one byte
//! - [`Deck`]: An ordered, shuffled stack used as the draw pile
//! - [`Hand`]: The ordered cards a player holds (3, or 4 mid-turn)
//! - [`Score`]: Best same-suit total of a hand, and the suit achieving it
pub mod card;
pub use card::*;

pub mod deck;
pub use deck::*;

pub mod hand;
pub use hand::*;

pub mod rank;
pub use rank::*;

pub mod score;
pub use score::*;

pub mod suit;
pub use suit::*;
