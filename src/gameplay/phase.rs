/// Lifecycle of a round-sequence.
///
/// Waiting holds no actions. A knock moves Playing into FinalRound, which
/// ends when play returns to the knocker. Finished is terminal.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Waiting,
    Playing,
    FinalRound,
    Finished,
}

impl Phase {
    /// Turns may be taken.
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Playing | Phase::FinalRound)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Waiting => write!(f, "waiting"),
            Phase::Playing => write!(f, "playing"),
            Phase::FinalRound => write!(f, "final_round"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}
