use super::difficulty::Difficulty;
use crate::Lives;
use crate::LIVES;
use crate::PlayerId;
use crate::cards::Hand;
use crate::cards::Score;

/// A round-scoped participant: hand, lives, and knock state.
///
/// Computer seats carry a [`Difficulty`]; humans carry none.
/// Lives never increase and elimination is permanent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Hand,
    lives: Lives,
    difficulty: Option<Difficulty>,
    knocked: bool,
    eliminated: bool,
}

impl Player {
    pub fn human(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self::seat(id.into(), name.into(), None)
    }
    pub fn robot(id: impl Into<PlayerId>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self::seat(id.into(), name.into(), Some(difficulty))
    }
    fn seat(id: PlayerId, name: String, difficulty: Option<Difficulty>) -> Self {
        Self {
            id,
            name,
            difficulty,
            hand: Hand::empty(),
            lives: LIVES,
            knocked: false,
            eliminated: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn hand(&self) -> &Hand {
        &self.hand
    }
    pub fn lives(&self) -> Lives {
        self.lives
    }
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
    pub fn is_robot(&self) -> bool {
        self.difficulty.is_some()
    }
    pub fn has_knocked(&self) -> bool {
        self.knocked
    }
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }
    pub fn score(&self) -> Score {
        self.hand.score()
    }
}

/// mutations are crate-private so only the round engine moves state
impl Player {
    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }
    pub(crate) fn deal(&mut self, hand: Hand) {
        self.hand = hand;
        self.knocked = false;
    }
    pub(crate) fn knock(&mut self) {
        self.knocked = true;
    }
    pub(crate) fn unknock(&mut self) {
        self.knocked = false;
    }
    /// Takes one life. Returns whether this loss eliminated the player.
    pub(crate) fn bleed(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        let fallen = self.lives == 0 && !self.eliminated;
        self.eliminated |= fallen;
        fallen
    }
    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} lives)", self.name, self.lives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_full_lives() {
        let player = Player::human("p1", "Alice");
        assert_eq!(player.lives(), LIVES);
        assert!(player.is_active());
        assert!(!player.is_robot());
        assert!(player.hand().size() == 0);
    }

    #[test]
    fn bleeding_out_eliminates_once() {
        let mut player = Player::robot("ai_1", "RoboCard", Difficulty::Hard);
        assert!(!player.bleed());
        assert!(!player.bleed());
        assert!(player.bleed());
        assert!(player.is_eliminated());
        assert!(!player.bleed());
        assert_eq!(player.lives(), 0);
    }
}
