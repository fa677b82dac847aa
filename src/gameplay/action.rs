use crate::HAND_SIZE;

/// A move a seated player may attempt on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw the top card of the draw pile.
    Draw,
    /// Take the top card of the discard pile.
    Take,
    /// Discard the card at this hand index, ending the turn.
    Discard(usize),
    /// Declare the final round instead of drawing.
    Knock,
}

impl Action {
    pub fn draw(from_discard: bool) -> Self {
        if from_discard { Action::Take } else { Action::Draw }
    }
    /// Hand size the actor must hold for this action to be legal.
    pub fn requires(&self) -> usize {
        match self {
            Action::Draw | Action::Take | Action::Knock => HAND_SIZE,
            Action::Discard(_) => HAND_SIZE + 1,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Draw => write!(f, "draw_deck"),
            Action::Take => write!(f, "draw_discard"),
            Action::Discard(i) => write!(f, "discard[{}]", i),
            Action::Knock => write!(f, "knock"),
        }
    }
}
