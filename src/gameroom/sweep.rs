use super::*;

/// What one disconnect/timeout sweep of a table did.
#[derive(Debug, Default)]
pub struct Sweep {
    /// Human-readable notes on forced turns and evictions.
    pub events: Vec<String>,
    /// Lobby ids removed for inactivity.
    pub evicted: Vec<PlayerId>,
    /// Computer turn that became due as a result.
    pub ticket: Option<Ticket>,
}

impl Sweep {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.evicted.is_empty() && self.ticket.is_none()
    }
}
