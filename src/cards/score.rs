use super::suit::Suit;
use crate::Points;
use crate::THIRTY_ONE;

/// Best same-suit total of a hand and the suit that achieves it.
///
/// Three aces score [`THIRTY_ONE`] with no suit. An empty hand scores zero
/// with no suit. The suit only informs computer players' suit affinity;
/// outcomes depend on points alone.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Score {
    points: Points,
    suit: Option<Suit>,
}

impl Score {
    pub fn new(points: Points, suit: Option<Suit>) -> Self {
        Self { points, suit }
    }
    pub fn aces() -> Self {
        Self::new(THIRTY_ONE, None)
    }
    pub fn points(&self) -> Points {
        self.points
    }
    pub fn suit(&self) -> Option<Suit> {
        self.suit
    }
    pub fn is_thirty_one(&self) -> bool {
        self.points == THIRTY_ONE
    }
}

impl From<Score> for Points {
    fn from(score: Score) -> Self {
        score.points
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.suit {
            Some(suit) => write!(f, "{}{}", self.points, suit),
            None => write!(f, "{}", self.points),
        }
    }
}
