use crate::HAND_SIZE;
use crate::Points;
use crate::Probability;
use crate::cards::Card;
use crate::cards::Hand;
use crate::gameplay::Action;
use crate::gameplay::Difficulty;
use crate::gameplay::Game;
use crate::gameplay::Phase;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Opponent estimate assumed early in a round, and when nobody is left to estimate.
const EARLY_ESTIMATE: i32 = 15;
/// Opponent estimate assumed once a round has run long.
const LATE_ESTIMATE: i32 = 18;
/// Turns after which opponents are assumed to hold stronger hands.
const LATE_TURNS: usize = 10;
/// Random spread applied to each opponent estimate.
const JITTER: i32 = 3;
/// Discards worth at most this many points are considered harmless to hand over.
const CHEAP: Points = 7;
/// Stricter harmless-discard bound used by experts in the final round.
const SAFE: Points = 6;

/// Computer player at a fixed [`Difficulty`].
///
/// A turn is one call to [`Robot::play`]: with three cards it first weighs a
/// knock, otherwise it draws (from the discard pile when the top card is
/// worth taking) and then discards by its difficulty's tie-breaking rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Robot(Difficulty);

impl From<Difficulty> for Robot {
    fn from(difficulty: Difficulty) -> Self {
        Self(difficulty)
    }
}

impl Robot {
    pub fn difficulty(&self) -> Difficulty {
        self.0
    }

    /// Plays the whole turn of `id`. Returns `false` if any step was refused,
    /// leaving the caller to skip the seat.
    pub fn play<R>(&self, game: &mut Game, id: &str, rng: &mut R) -> bool
    where
        R: Rng,
    {
        let Some(player) = game.player(id) else {
            return false;
        };
        if player.hand().size() == HAND_SIZE {
            let score = player.score().points();
            if game.can_act(id, &Action::Knock) && self.knocks(score, game, id, rng) {
                log::debug!("[robot] {} knocks holding {}", id, score);
                return game.knock(id);
            }
            let take = self.takes(player.hand(), game.discard_top(), rng);
            if !game.draw(id, take) {
                log::warn!("[robot] {} could not draw", id);
                return false;
            }
        }
        let Some(hand) = game.player(id).map(|p| p.hand().clone()) else {
            return false;
        };
        if hand.size() != HAND_SIZE + 1 {
            return false;
        }
        let index = self.discard(&hand, game.phase(), rng);
        log::debug!("[robot] {} ({}) discards {} from {}", id, self.0, index, hand);
        game.discard(id, index)
    }
}

/// draw policy
impl Robot {
    /// Whether to take `top` from the discard pile instead of drawing blind.
    pub fn takes<R>(&self, hand: &Hand, top: Option<Card>, rng: &mut R) -> bool
    where
        R: Rng,
    {
        let Some(top) = top else {
            return false;
        };
        let current = hand.score();
        let potential = hand.with(top).retention().points();
        let gain = potential as i32 - current.points() as i32;
        match self.0 {
            Difficulty::Easy => gain >= 2 && rng.random_bool(0.3),
            Difficulty::Medium => gain >= 1 && rng.random_bool(0.5),
            Difficulty::Hard => {
                (gain >= 1 || current.suit() == Some(top.suit())) && rng.random_bool(0.7)
            }
            Difficulty::Expert => {
                gain >= 1 || (top.rank().is_high() && current.points() >= EARLY_ESTIMATE as Points)
            }
        }
    }
}

/// knock policy
impl Robot {
    /// Least score this difficulty will knock on, before expert adjustments.
    pub fn threshold(&self) -> Points {
        match self.0 {
            Difficulty::Easy => 20,
            Difficulty::Medium => 18,
            Difficulty::Hard => 16,
            Difficulty::Expert => 14,
        }
    }

    /// Chance of knocking once the threshold is met.
    pub fn aggression(&self) -> Probability {
        match self.0 {
            Difficulty::Easy => 0.2,
            Difficulty::Medium => 0.4,
            Difficulty::Hard => 0.6,
            Difficulty::Expert => 0.8,
        }
    }

    /// Whether to knock holding `best`. Experts knock lower when well ahead
    /// of their guess at the table and higher once the game runs long.
    pub fn knocks<R>(&self, best: Points, game: &Game, id: &str, rng: &mut R) -> bool
    where
        R: Rng,
    {
        let average = Self::estimate(game, id, rng);
        let threshold = match self.0 {
            Difficulty::Expert if best as f64 > average + 3.0 => 12,
            Difficulty::Expert if game.round() > 3 => 16,
            _ => self.threshold(),
        };
        best >= threshold && rng.random_bool(self.aggression())
    }

    /// Guessed average hand of the other active seats. Hands are never peeked at.
    pub fn estimate<R>(game: &Game, id: &str, rng: &mut R) -> f64
    where
        R: Rng,
    {
        let base = if game.turns() > LATE_TURNS { LATE_ESTIMATE } else { EARLY_ESTIMATE };
        let guesses = game
            .actives()
            .filter(|p| p.id() != id)
            .map(|_| base + rng.random_range(-JITTER..=JITTER))
            .collect::<Vec<i32>>();
        match guesses.len() {
            0 => EARLY_ESTIMATE as f64,
            n => guesses.iter().sum::<i32>() as f64 / n as f64,
        }
    }
}

/// discard policy
impl Robot {
    /// Index to discard from a four-card hand.
    pub fn discard<R>(&self, hand: &Hand, phase: Phase, rng: &mut R) -> usize
    where
        R: Rng,
    {
        let scores = hand.discards();
        let best = scores.iter().map(|s| s.points()).max().unwrap_or_default();
        let tied = (0..scores.len())
            .filter(|&i| scores[i].points() == best)
            .collect::<Vec<usize>>();
        let first = tied.first().copied().unwrap_or_default();
        match self.0 {
            Difficulty::Easy if hand.size() > 0 && rng.random_bool(0.3) => rng.random_range(0..hand.size()),
            Difficulty::Easy => first,
            Difficulty::Medium | Difficulty::Hard => Self::cheapest(hand, &tied, CHEAP, rng),
            Difficulty::Expert => {
                let safe = Self::within(hand, &tied, SAFE);
                if phase == Phase::FinalRound && !safe.is_empty() {
                    Self::pick(&safe, rng)
                } else {
                    Self::cheapest(hand, &tied, CHEAP, rng)
                }
            }
        }
    }

    /// Uniform pick among `options` worth at most `limit`, else among all `options`.
    fn cheapest<R>(hand: &Hand, options: &[usize], limit: Points, rng: &mut R) -> usize
    where
        R: Rng,
    {
        let cheap = Self::within(hand, options, limit);
        if cheap.is_empty() {
            Self::pick(options, rng)
        } else {
            Self::pick(&cheap, rng)
        }
    }

    fn within(hand: &Hand, options: &[usize], limit: Points) -> Vec<usize> {
        options
            .iter()
            .copied()
            .filter(|&i| hand.get(i).is_some_and(|c| c.points() <= limit))
            .collect()
    }

    fn pick<R>(options: &[usize], rng: &mut R) -> usize
    where
        R: Rng,
    {
        options.choose(rng).copied().unwrap_or_default()
    }
}

impl std::fmt::Display for Robot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} robot", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::Player;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(31)
    }
    fn hand(s: &str) -> Hand {
        Hand::try_from(s).unwrap()
    }
    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }
    fn table() -> Game {
        Game::create(&["Alice", "Bob"], 1, &[Difficulty::Expert], Some("ai_1"))
    }

    #[test]
    fn never_takes_from_empty_pile() {
        let mut rng = rng();
        for difficulty in Difficulty::all() {
            assert!(!Robot::from(difficulty).takes(&hand("Kh Qh 2c"), None, &mut rng));
        }
    }

    #[test]
    fn expert_takes_any_improvement() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Expert);
        assert!(robot.takes(&hand("Kh 9h 2c"), Some(card("3h")), &mut rng));
        assert!(!robot.takes(&hand("Kh 9h 2c"), Some(card("2d")), &mut rng));
    }

    #[test]
    fn expert_takes_high_cards_when_strong() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Expert);
        assert!(robot.takes(&hand("Kh 9h 2c"), Some(card("Ks")), &mut rng));
        assert!(!robot.takes(&hand("6h 5h 2c"), Some(card("Ks")), &mut rng));
    }

    #[test]
    fn easy_ignores_single_point_gains() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Easy);
        assert!((0..200).all(|_| !robot.takes(&hand("Kh 9h 2h"), Some(card("3h")), &mut rng)));
    }

    #[test]
    fn acceptance_rates_follow_difficulty() {
        let mut rng = rng();
        let rate = |difficulty: Difficulty, rng: &mut SmallRng| {
            (0..1000)
                .filter(|_| Robot::from(difficulty).takes(&hand("Kh 9h 2c"), Some(card("Qh")), rng))
                .count()
        };
        let easy = rate(Difficulty::Easy, &mut rng);
        let medium = rate(Difficulty::Medium, &mut rng);
        let hard = rate(Difficulty::Hard, &mut rng);
        assert!((220..=380).contains(&easy));
        assert!((420..=580).contains(&medium));
        assert!((620..=780).contains(&hard));
    }

    #[test]
    fn hard_takes_suit_matches_without_gain() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Hard);
        let taken = (0..1000)
            .filter(|_| robot.takes(&hand("Kh Qh Jh"), Some(card("2h")), &mut rng))
            .count();
        assert!((620..=780).contains(&taken));
    }

    #[test]
    fn easy_never_knocks_below_twenty() {
        let mut rng = rng();
        let game = table();
        let robot = Robot::from(Difficulty::Easy);
        assert!((0..500).all(|_| !robot.knocks(19, &game, "ai_1", &mut rng)));
    }

    #[test]
    fn expert_knocks_often_when_ahead() {
        let mut rng = rng();
        let game = table();
        let robot = Robot::from(Difficulty::Expert);
        let knocks = (0..1000)
            .filter(|_| robot.knocks(30, &game, "ai_1", &mut rng))
            .count();
        assert!((720..=880).contains(&knocks));
        assert!((0..500).all(|_| !robot.knocks(11, &game, "ai_1", &mut rng)));
    }

    #[test]
    fn estimates_stay_within_jitter() {
        let mut rng = rng();
        let game = table();
        for _ in 0..200 {
            let estimate = Robot::estimate(&game, "ai_1", &mut rng);
            assert!((12.0..=18.0).contains(&estimate));
        }
        let solo = Game::seat(vec![Player::robot("ai_1", "RoboCard", Difficulty::Hard)], None);
        assert_eq!(Robot::estimate(&solo, "ai_1", &mut rng), 15.0);
    }

    #[test]
    fn hard_discards_cheapest_of_equal_options() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Hard);
        assert_eq!(robot.discard(&hand("Kh Qh Jh 2c"), Phase::Playing, &mut rng), 3);
        assert_eq!(robot.discard(&hand("Kh 2c Qh Jh"), Phase::Playing, &mut rng), 1);
        for _ in 0..100 {
            let index = robot.discard(&hand("Kh Qh 3c 4d"), Phase::Playing, &mut rng);
            assert!(index == 2 || index == 3);
        }
    }

    #[test]
    fn medium_discards_low_card_among_ties() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Medium);
        assert!((0..1000).all(|_| robot.discard(&hand("Kh Qh 9c 2d"), Phase::Playing, &mut rng) == 3));
        assert_eq!(robot.discard(&hand("Kh Qh Jh 2c"), Phase::Playing, &mut rng), 3);
    }

    #[test]
    fn expert_prefers_safe_discards_in_final_round() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Expert);
        for _ in 0..100 {
            let index = robot.discard(&hand("Kh Qh 7c 6d"), Phase::FinalRound, &mut rng);
            assert_eq!(index, 3);
            let index = robot.discard(&hand("Kh Qh 7c 6d"), Phase::Playing, &mut rng);
            assert!(index == 2 || index == 3);
        }
    }

    #[test]
    fn easy_sometimes_discards_badly() {
        let mut rng = rng();
        let robot = Robot::from(Difficulty::Easy);
        let blunders = (0..1000)
            .filter(|_| robot.discard(&hand("Kh Qh Jh 2c"), Phase::Playing, &mut rng) != 3)
            .count();
        assert!((150..=300).contains(&blunders));
    }

    #[test]
    fn plays_a_legal_turn() {
        let mut rng = rng();
        let mut game = table();
        game.rig("ai_1", "2c 3d 4s");
        game.rig_pile("9h");
        assert!(Robot::from(Difficulty::Expert).play(&mut game, "ai_1", &mut rng));
        assert_eq!(game.current(), "player_1");
        assert_eq!(game.player("ai_1").map(|p| p.hand().size()), Some(HAND_SIZE));
        assert_eq!(game.pile().count(), 1);
    }

    #[test]
    fn refuses_to_play_out_of_turn() {
        let mut rng = rng();
        let mut game = table();
        assert!(!Robot::from(Difficulty::Expert).play(&mut game, "player_1", &mut rng));
        assert!(!Robot::from(Difficulty::Expert).play(&mut game, "ghost", &mut rng));
    }

    #[test]
    fn strong_robots_knock_instead_of_drawing() {
        let mut rng = rng();
        let knocked = (0..200)
            .filter(|_| {
                let mut game = table();
                game.rig("ai_1", "Kh Qh Jh");
                let deck = game.deck_size();
                assert!(Robot::from(Difficulty::Expert).play(&mut game, "ai_1", &mut rng));
                match game.knocker() {
                    Some(_) => game.deck_size() == deck && game.phase() == Phase::FinalRound,
                    None => false,
                }
            })
            .count();
        assert!((130..=190).contains(&knocked));
    }
}
