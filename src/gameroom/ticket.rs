use super::*;
use std::time::Duration;

/// A computer turn waiting out its thinking delay.
///
/// Captures the seat and the game's turn ticker when issued. The turn only
/// runs if both still match when the ticket is redeemed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seat: PlayerId,
    tick: u64,
    delay: Duration,
}

impl Ticket {
    pub fn new(seat: impl Into<PlayerId>, tick: u64, delay: Duration) -> Self {
        Self {
            seat: seat.into(),
            tick,
            delay,
        }
    }
    pub fn seat(&self) -> &str {
        &self.seat
    }
    pub fn tick(&self) -> u64 {
        self.tick
    }
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{} in {}ms", self.seat, self.tick, self.delay.as_millis())
    }
}
