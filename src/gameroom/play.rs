use crate::gameplay::Action;

/// A game action requested through a table on behalf of a seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Play {
    Draw { from_discard: bool },
    Discard(usize),
    Knock,
    /// Runs the current computer seat's turn right away.
    Robot,
}

impl Play {
    /// Reads a transport action name with its payload.
    pub fn parse(action: &str, from_discard: bool, index: Option<usize>) -> anyhow::Result<Self> {
        match action {
            "draw" => Ok(Play::Draw { from_discard }),
            "discard" => index
                .map(Play::Discard)
                .ok_or_else(|| anyhow::anyhow!("card_index is required for discard")),
            "knock" => Ok(Play::Knock),
            "ai-turn" => Ok(Play::Robot),
            _ => Err(anyhow::anyhow!("unknown action: {}", action)),
        }
    }
    /// The round action this maps to, if it is one.
    pub fn action(&self) -> Option<Action> {
        match self {
            Play::Draw { from_discard } => Some(Action::draw(*from_discard)),
            Play::Discard(index) => Some(Action::Discard(*index)),
            Play::Knock => Some(Action::Knock),
            Play::Robot => None,
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Play::Draw { .. } => write!(f, "draw"),
            Play::Discard(_) => write!(f, "discard"),
            Play::Knock => write!(f, "knock"),
            Play::Robot => write!(f, "ai-turn"),
        }
    }
}
