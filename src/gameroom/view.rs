use super::*;
use crate::gameplay::Difficulty;
use crate::gameplay::GameView;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub id: String,
    pub name: String,
    pub status: SeatStatus,
    pub is_host: bool,
    pub is_ai: bool,
    pub ai_difficulty: Option<Difficulty>,
    pub seated_secs: u64,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            id: seat.id().to_string(),
            name: seat.name().to_string(),
            status: seat.status(),
            is_host: seat.is_host(),
            is_ai: seat.is_robot(),
            ai_difficulty: seat.difficulty(),
            seated_secs: seat.seated().as_secs(),
        }
    }
}

/// Snapshot of a table, nesting its game while one exists.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub table_id: String,
    pub table_name: String,
    pub host_id: Option<String>,
    pub invite_code: String,
    pub age_secs: u64,
    pub status: TableStatus,
    pub max_players: usize,
    pub min_players: usize,
    pub current_players: usize,
    pub is_private: bool,
    pub has_password: bool,
    pub can_join: bool,
    pub can_start: bool,
    pub players: Vec<SeatView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameView>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub player_id_mapping: BTreeMap<String, String>,
}
