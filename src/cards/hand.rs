use super::card::Card;
use super::rank::Rank;
use super::score::Score;
use super::suit::Suit;
use crate::HAND_SIZE;
use crate::Points;

/// The ordered cards held by one player.
///
/// Holds [`HAND_SIZE`] cards between turns and one more while the holder
/// decides what to discard. Order matters: discards are addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn empty() -> Self {
        Self(Vec::with_capacity(HAND_SIZE + 1))
    }
    pub fn size(&self) -> usize {
        self.0.len()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn get(&self, index: usize) -> Option<Card> {
        self.0.get(index).copied()
    }
    pub fn add(&mut self, card: Card) {
        self.0.push(card);
    }
    /// Removes the card at `index`, or nothing when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    /// A copy of this hand with one more card on the end.
    pub fn with(&self, card: Card) -> Self {
        let mut hand = self.clone();
        hand.add(card);
        hand
    }
    /// A copy of this hand missing the card at `index`.
    pub fn without(&self, index: usize) -> Self {
        let mut hand = self.clone();
        hand.remove(index);
        hand
    }
    /// Scores each single discard, indexed like the hand.
    pub fn discards(&self) -> Vec<Score> {
        (0..self.size()).map(|i| self.without(i).score()).collect()
    }
    /// Best score reachable by discarding one card.
    pub fn retention(&self) -> Score {
        self.discards()
            .into_iter()
            .fold(Score::default(), |best, s| if s.points() > best.points() { s } else { best })
    }
    /// Best same-suit total.
    ///
    /// Three or more aces make 31. Otherwise each suit sums its best
    /// [`HAND_SIZE`] cards, so a four-card hand never exceeds 31 either.
    /// Ties go to the suit that appears first in the hand.
    pub fn score(&self) -> Score {
        if self.count(Rank::Ace) >= 3 {
            return Score::aces();
        }
        self.suits()
            .into_iter()
            .map(|suit| Score::new(self.total(suit), Some(suit)))
            .fold(Score::default(), |best, s| if s.points() > best.points() { s } else { best })
    }

    fn count(&self, rank: Rank) -> usize {
        self.0.iter().filter(|c| c.rank() == rank).count()
    }
    /// suits in order of first appearance
    fn suits(&self) -> Vec<Suit> {
        self.0.iter().map(|c| c.suit()).fold(Vec::new(), |mut seen, s| {
            if !seen.contains(&s) {
                seen.push(s);
            }
            seen
        })
    }
    fn total(&self, suit: Suit) -> Points {
        let mut points = self
            .0
            .iter()
            .filter(|c| c.suit() == suit)
            .map(|c| c.points())
            .collect::<Vec<_>>();
        points.sort_unstable_by(|a, b| b.cmp(a));
        points.into_iter().take(HAND_SIZE).sum()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl TryFrom<&str> for Hand {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Card::parse(s).map(Self)
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cards = self.0.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "{}", cards.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::THIRTY_ONE;
    use crate::cards::Deck;

    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }

    #[test]
    fn empty_hand_scores_zero() {
        let score = Hand::empty().score();
        assert_eq!(score.points(), 0);
        assert_eq!(score.suit(), None);
    }

    #[test]
    fn sums_best_suit() {
        let score = hand("Kh 9h 5s").score();
        assert_eq!(score.points(), 19);
        assert_eq!(score.suit(), Some(Suit::Heart));
    }

    #[test]
    fn mixed_suits_take_highest_card() {
        assert_eq!(hand("2c 7d As").score().points(), 11);
    }

    #[test]
    fn ties_go_to_first_suit_seen() {
        let score = hand("Kd Qc 5s").score();
        assert_eq!(score.points(), 10);
        assert_eq!(score.suit(), Some(Suit::Diamond));
    }

    #[test]
    fn three_aces_make_thirty_one() {
        assert_eq!(hand("Ac Ad Ah").score(), Score::aces());
        assert_eq!(hand("Ac 7s Ad Ah").score().points(), THIRTY_ONE);
        assert_eq!(hand("Ac Ad Ah As").score().points(), THIRTY_ONE);
    }

    #[test]
    fn four_suited_cards_cap_at_three() {
        assert_eq!(hand("As Ks Qs Js").score().points(), THIRTY_ONE);
    }

    #[test]
    fn random_hands_stay_in_range() {
        (0..500).for_each(|_| {
            let mut deck = Deck::new();
            let four = Hand::from(deck.deal(4));
            let three = four.without(0);
            assert!(four.score().points() <= THIRTY_ONE);
            assert!(three.score().points() <= THIRTY_ONE);
        });
    }

    #[test]
    fn retention_finds_best_discard() {
        let four = hand("Kh 2c 9h Ah");
        assert_eq!(four.retention().points(), 30);
        assert_eq!(four.discards()[1].points(), 30);
    }

    #[test]
    fn removes_in_range_only() {
        let mut h = hand("Kh 2c 9h");
        assert_eq!(h.remove(3), None);
        assert_eq!(h.remove(1), Card::try_from("2c").ok());
        assert_eq!(h.size(), 2);
    }
}
