use crate::PlayerId;

/// How a round is being closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Play returned to the knocker: the lowest hands lose a life.
    Showdown,
    /// A discard reached 31. Everyone else has already paid a life.
    Instant(PlayerId),
    /// No humans remain to play on. Nobody loses a life.
    Abandon,
}

impl Settlement {
    pub fn skips_life_loss(&self) -> bool {
        !matches!(self, Settlement::Showdown)
    }
}
