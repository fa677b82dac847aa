use super::difficulty::Difficulty;
use super::phase::Phase;
use super::player::Player;
use crate::Lives;
use crate::Points;
use crate::cards::Card;
use serde::Serialize;

/// One card as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub value: &'static str,
    pub suit: &'static str,
}

impl From<Card> for CardView {
    fn from(card: Card) -> Self {
        Self {
            value: card.rank().label(),
            suit: card.suit().name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub hand: Vec<CardView>,
    pub lives: Lives,
    pub is_ai: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<Difficulty>,
    pub has_knocked: bool,
    pub is_eliminated: bool,
    pub score: Points,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id().to_string(),
            name: player.name().to_string(),
            hand: player.hand().cards().iter().copied().map(CardView::from).collect(),
            lives: player.lives(),
            is_ai: player.is_robot(),
            ai_difficulty: player.difficulty(),
            has_knocked: player.has_knocked(),
            is_eliminated: player.is_eliminated(),
            score: player.score().points(),
        }
    }
}

/// Snapshot of a round-sequence for any external caller.
/// Players are listed in seating order; the discard pile reads top-down.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub game_id: String,
    pub players: Vec<PlayerView>,
    pub current_player_id: String,
    pub phase: Phase,
    pub discard_pile: Vec<CardView>,
    pub deck_size: usize,
    pub round_number: usize,
    pub turn_count: usize,
    pub knocked_player_id: Option<String>,
    pub winner_id: Option<String>,
    pub recent_message: String,
    pub game_log: Vec<String>,
    pub turn_time_remaining: u64,
}
