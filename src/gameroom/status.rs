/// Lifecycle of a lobby table.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Accepting joins, not enough seats to start.
    #[default]
    Waiting,
    /// Accepting joins, enough seats to start.
    Ready,
    Playing,
    Finished,
}

impl TableStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, TableStatus::Waiting | TableStatus::Ready)
    }
}

/// Lobby state of one seat.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Invited,
    #[default]
    Joined,
    Ready,
    Playing,
}

impl SeatStatus {
    /// Counts toward starting a game.
    pub fn is_joined(&self) -> bool {
        matches!(self, SeatStatus::Joined | SeatStatus::Ready)
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableStatus::Waiting => write!(f, "waiting"),
            TableStatus::Ready => write!(f, "ready"),
            TableStatus::Playing => write!(f, "playing"),
            TableStatus::Finished => write!(f, "finished"),
        }
    }
}
