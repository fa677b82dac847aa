use super::rank::Rank;
use super::suit::Suit;
use crate::Points;

/// A playing card encoded as a single byte.
///
/// The 52 cards are bijectively mapped to `0..52` where the encoding is
/// `rank * 4 + suit`. Cards carry no identity beyond rank and suit, so a
/// standard deck holds exactly one of each encoding.
///
/// Cards can be parsed from two-character strings like `"As"` (ace of spades)
/// or `"Tc"` (ten of clubs). Use [`Card::parse`] for multiple cards.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Extracts the rank component (2 through Ace).
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    /// Extracts the suit component (clubs, diamonds, hearts, spades).
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
    /// Contribution of this card to its suit's total.
    pub fn points(&self) -> Points {
        self.rank().points()
    }
    /// Long form for narration, e.g. "10 of hearts".
    pub fn describe(&self) -> String {
        format!("{} of {}", self.rank().label(), self.suit().name())
    }
}

/// (Rank, Suit) isomorphism
impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
/// Ts
/// 34
/// 0b00100010
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "Invalid card u8: {}", n);
        Self(n)
    }
}

/// u64 representation
/// each card is just one bit turned on. this is a one-way morphism
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => {
                let rank = Rank::try_from(rank.to_string().as_str())?;
                let suit = Suit::try_from(suit.to_string().as_str())?;
                Ok(Card::from((rank, suit)))
            }
            _ => Err("2 characters".into()),
        }
    }
}
impl Card {
    /// Parses a string of concatenated card notations into a vector of cards.
    ///
    /// Whitespace is ignored. Each card is two characters: rank then suit.
    /// Returns an error if any card fails to parse.
    pub fn parse(s: &str) -> Result<Vec<Self>, String> {
        s.replace(char::is_whitespace, "")
            .chars()
            .collect::<Vec<_>>()
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .map(|pair| Self::try_from(pair.as_str()))
            .collect::<Result<Vec<Self>, _>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_rank_suit() {
        let card = Card::from((Rank::Queen, Suit::Diamond));
        assert!(card.rank() == Rank::Queen);
        assert!(card.suit() == Suit::Diamond);
        assert!(card == Card::from(u8::from(card)));
    }

    #[test]
    fn parses_notation() {
        let cards = Card::parse("As Td 2c").unwrap();
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0], Card::from((Rank::Ace, Suit::Spade)));
        assert_eq!(cards[1].points(), 10);
        assert_eq!(cards[2].describe(), "2 of clubs");
        assert!(Card::parse("Zz").is_err());
    }

    #[test]
    fn rejects_multibyte_input() {
        assert!(Card::try_from("é").is_err());
        assert!(Card::try_from("Aé").is_err());
        assert!(Card::try_from("éh").is_err());
        assert!(Card::parse("Ah é2").is_err());
        assert_eq!(Card::try_from(" Ah "), Ok(Card::from((Rank::Ace, Suit::Heart))));
    }

    #[test]
    fn displays_short_form() {
        assert_eq!(Card::from((Rank::Ten, Suit::Heart)).to_string(), "Th");
    }

    #[test]
    #[should_panic]
    fn rejects_fifty_third_card() {
        let _ = Card::from(52u8);
    }
}
