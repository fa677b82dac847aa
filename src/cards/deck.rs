use super::card::Card;
use rand::seq::SliceRandom;

/// An ordered stack of cards; the top of the stack is the end of the vector.
///
/// Serves as the draw pile. A fresh deck holds each of the 52 cards exactly
/// once, shuffled; a reshuffled deck is rebuilt from spent discards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// Creates a fresh, shuffled 52-card deck.
    pub fn new() -> Self {
        Self::shuffled((0..52u8).map(Card::from).collect())
    }
    /// Shuffles the given cards into a new stack.
    pub fn shuffled(mut cards: Vec<Card>) -> Self {
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }
    /// Removes and returns the top card, if any.
    pub fn draw(&mut self) -> Option<Card> {
        self.0.pop()
    }
    /// Deals `n` cards off the top.
    /// Panics when the deck runs short, which only a miscounted table can cause.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        assert!(self.0.len() >= n, "not enough cards in deck to deal");
        self.0.split_off(self.0.len() - n)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        self.draw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_deck_is_complete() {
        let deck = Deck::new();
        assert_eq!(deck.len(), 52);
        let mask = deck.fold(0u64, |mask, card| mask | u64::from(card));
        assert_eq!(mask, (1u64 << 52) - 1);
    }

    #[test]
    fn deals_without_replacement() {
        let mut deck = Deck::new();
        let dealt = deck.deal(25);
        assert_eq!(dealt.len(), 25);
        assert_eq!(deck.len(), 27);
        assert!(dealt.iter().all(|c| !deck.contains(c)));
    }

    #[test]
    fn draws_from_top() {
        let mut deck = Deck::from(Card::parse("2c 3d 4h").unwrap());
        assert_eq!(deck.draw(), Card::try_from("4h").ok());
        assert_eq!(deck.len(), 2);
    }
}
