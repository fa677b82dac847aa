#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suit {
    #[default]
    Club = 0,
    Diamond = 1,
    Heart = 2,
    Spade = 3,
}

impl Suit {
    pub const fn all() -> [Self; 4] {
        [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade]
    }
    /// Long plural name used in narration and views.
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Club => "clubs",
            Suit::Diamond => "diamonds",
            Suit::Heart => "hearts",
            Suit::Spade => "spades",
        }
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Suit {
        match n {
            0 => Suit::Club,
            1 => Suit::Diamond,
            2 => Suit::Heart,
            3 => Suit::Spade,
            _ => panic!("Invalid suit u8: {}", n),
        }
    }
}
impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}

/// str isomorphism
impl TryFrom<&str> for Suit {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "c" | "clubs" => Ok(Suit::Club),
            "d" | "diamonds" => Ok(Suit::Diamond),
            "h" | "hearts" => Ok(Suit::Heart),
            "s" | "spades" => Ok(Suit::Spade),
            _ => Err(format!("invalid suit str: {}", s)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Club => "c",
                Suit::Diamond => "d",
                Suit::Heart => "h",
                Suit::Spade => "s",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        Suit::all()
            .into_iter()
            .for_each(|suit| assert!(suit == Suit::from(u8::from(suit))));
    }

    #[test]
    fn parses_short_and_long() {
        assert_eq!(Suit::try_from("h"), Ok(Suit::Heart));
        assert_eq!(Suit::try_from("Spades"), Ok(Suit::Spade));
        assert!(Suit::try_from("x").is_err());
    }

    #[test]
    #[should_panic]
    fn rejects_fifth_suit() {
        let _ = Suit::from(4u8);
    }
}
