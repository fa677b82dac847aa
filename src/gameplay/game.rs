use super::action::Action;
use super::difficulty::Difficulty;
use super::narration::Narration;
use super::phase::Phase;
use super::player::Player;
use super::settlement::Settlement;
use super::view::CardView;
use super::view::GameView;
use super::view::PlayerView;
use crate::HAND_SIZE;
use crate::ID;
use crate::PlayerId;
use crate::Points;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Hand;
use std::time::Duration;
use tokio::time::Instant;

/// One round-sequence of 31, from the first deal to the last player standing.
///
/// Seats are ordered and that order is the turn order. The draw pile is a
/// [`Deck`]; the discard pile keeps its top at the end of the vector.
///
/// Every public mutation checks legality first and either applies in full
/// or returns `false` with nothing changed. Round closure (showdown, instant
/// 31, abandonment) and the deal of the next round happen inside the action
/// that triggers them, so callers never observe a half-settled game.
///
/// `ticker` increments whenever the turn passes, even back to the same seat,
/// so deferred computer turns can tell whether they are still current.
#[derive(Debug, Clone)]
pub struct Game {
    id: ID<Self>,
    seats: Vec<Player>,
    deck: Deck,
    pile: Vec<Card>,
    phase: Phase,
    current: PlayerId,
    round: usize,
    turns: usize,
    ticker: u64,
    knocker: Option<PlayerId>,
    winner: Option<PlayerId>,
    host: Option<PlayerId>,
    champion: Option<PlayerId>,
    headline: String,
    started: Instant,
    narration: Narration,
}

/// construction
impl Game {
    /// Seats `names` as humans `player_1..` then `robots` computers `ai_1..`,
    /// deals round one, and hands the first turn to `host` if seated.
    /// Missing difficulties default to [`Difficulty::Medium`].
    pub fn create<S>(names: &[S], robots: usize, difficulties: &[Difficulty], host: Option<&str>) -> Self
    where
        S: AsRef<str>,
    {
        let humans = names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::human(format!("player_{}", i + 1), name.as_ref()));
        let computers = (0..robots).map(|i| {
            let difficulty = difficulties.get(i).copied().unwrap_or_default();
            Player::robot(
                format!("ai_{}", i + 1),
                format!("AI Player {} ({})", i + 1, difficulty),
                difficulty,
            )
        });
        Self::seat(humans.chain(computers).collect(), host)
    }

    /// Starts a game over an explicit roster, in seating order.
    /// Panics if the roster cannot be dealt from one deck.
    pub fn seat(players: Vec<Player>, host: Option<&str>) -> Self {
        assert!(
            players.len() * HAND_SIZE < 52,
            "not enough cards in deck to deal"
        );
        let mut game = Self {
            id: ID::default(),
            seats: players,
            deck: Deck::default(),
            pile: Vec::new(),
            phase: Phase::Waiting,
            current: PlayerId::new(),
            round: 1,
            turns: 0,
            ticker: 0,
            knocker: None,
            winner: None,
            host: host.map(String::from),
            champion: None,
            headline: String::new(),
            started: Instant::now(),
            narration: Narration::default(),
        };
        if game.seats.is_empty() {
            return game;
        }
        game.deal();
        game.phase = Phase::Playing;
        game.narration.push("31 Card Game has started!");
        let joined = game
            .seats
            .iter()
            .map(|p| format!("{} joined the game", p.name()))
            .collect::<Vec<_>>();
        joined.into_iter().for_each(|line| game.narration.push(line));
        let opener = game.opener();
        game.announce(&opener);
        game.begin(opener);
        log::info!("[game {}] started with {} seats", game.id, game.seats.len());
        game
    }
}

/// queries
impl Game {
    pub fn id(&self) -> ID<Self> {
        self.id
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn round(&self) -> usize {
        self.round
    }
    pub fn turns(&self) -> usize {
        self.turns
    }
    pub fn ticker(&self) -> u64 {
        self.ticker
    }
    pub fn current(&self) -> &str {
        &self.current
    }
    pub fn current_player(&self) -> Option<&Player> {
        self.player(&self.current)
    }
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.seats.iter().find(|p| p.id() == id)
    }
    pub fn players(&self) -> &[Player] {
        &self.seats
    }
    pub fn actives(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter(|p| p.is_active())
    }
    pub fn humans(&self) -> impl Iterator<Item = &Player> {
        self.actives().filter(|p| !p.is_robot())
    }
    pub fn knocker(&self) -> Option<&str> {
        self.knocker.as_deref()
    }
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }
    /// Winner of the most recently settled round.
    pub fn champion(&self) -> Option<&str> {
        self.champion.as_deref()
    }
    pub fn headline(&self) -> &str {
        &self.headline
    }
    pub fn narration(&self) -> &Narration {
        &self.narration
    }
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }
    pub fn discard_top(&self) -> Option<Card> {
        self.pile.last().copied()
    }
    /// Discard pile, most recent first.
    pub fn pile(&self) -> impl Iterator<Item = Card> + '_ {
        self.pile.iter().rev().copied()
    }
    /// Nothing left to play for: finished, or at most one active seat, or no active humans.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Finished || self.is_decided()
    }
    fn is_decided(&self) -> bool {
        self.actives().count() <= 1 || self.humans().count() == 0
    }
    /// Turn time left for the current player, floored at zero.
    pub fn remaining(&self, timeout: Duration) -> Duration {
        timeout.saturating_sub(self.started.elapsed())
    }
    pub fn expired(&self, timeout: Duration) -> bool {
        self.remaining(timeout).is_zero()
    }
    fn position(&self, id: &str) -> Option<usize> {
        self.seats.iter().position(|p| p.id() == id)
    }
}

/// legality
impl Game {
    /// Whether `id` may take `action` right now.
    pub fn can_act(&self, id: &str, action: &Action) -> bool {
        self.phase.is_active()
            && self.current == id
            && self
                .player(id)
                .filter(|p| p.is_active())
                .filter(|p| p.hand().size() == action.requires())
                .map(|p| match action {
                    Action::Draw => true,
                    Action::Take => !self.pile.is_empty(),
                    Action::Discard(index) => *index < p.hand().size(),
                    Action::Knock => self.phase == Phase::Playing && !p.has_knocked(),
                })
                .unwrap_or(false)
    }
    /// Applies any [`Action`], returning whether it took effect.
    pub fn apply(&mut self, id: &str, action: Action) -> bool {
        match action {
            Action::Draw => self.draw(id, false),
            Action::Take => self.draw(id, true),
            Action::Discard(index) => self.discard(id, index),
            Action::Knock => self.knock(id),
        }
    }
}

/// round actions
impl Game {
    /// Draws from the deck, or takes the discard top when `from_discard`.
    /// An empty deck is rebuilt from all but the top discard; with one or
    /// fewer discards the draw fails.
    pub fn draw(&mut self, id: &str, from_discard: bool) -> bool {
        if !self.can_act(id, &Action::draw(from_discard)) {
            return false;
        }
        let Some(i) = self.position(id) else {
            return false;
        };
        let card = if from_discard {
            self.pile.pop()
        } else {
            self.restock().and_then(|_| self.deck.draw())
        };
        let Some(card) = card else {
            log::debug!("[game {}] {} found nothing to draw", self.id, id);
            return false;
        };
        self.seats[i].hand_mut().add(card);
        let name = self.seats[i].name().to_string();
        if from_discard {
            self.narration.push(format!("{} took {} from discard pile", name, card.describe()));
        } else {
            self.narration.push(format!("{} drew a card from the deck", name));
        }
        log::debug!("[game {}] {} {}", self.id, id, Action::draw(from_discard));
        true
    }

    /// Discards the card at `index` and passes the turn, settling the round
    /// first if the remaining hand is 31.
    pub fn discard(&mut self, id: &str, index: usize) -> bool {
        if !self.can_act(id, &Action::Discard(index)) {
            return false;
        }
        let Some(i) = self.position(id) else {
            return false;
        };
        let Some(card) = self.seats[i].hand_mut().remove(index) else {
            return false;
        };
        let line = format!("{} discarded {}", self.seats[i].name(), card.describe());
        self.narration.push(line);
        self.release(i, card);
        true
    }

    /// Declares the final round. Everyone else gets exactly one more turn.
    pub fn knock(&mut self, id: &str) -> bool {
        if !self.can_act(id, &Action::Knock) {
            return false;
        }
        let Some(i) = self.position(id) else {
            return false;
        };
        self.seats[i].knock();
        self.knocker = Some(id.to_string());
        self.phase = Phase::FinalRound;
        let name = self.seats[i].name().to_string();
        self.headline = format!("{} has knocked! Final round starting.", name);
        self.narration.push(format!("{} knocked! Final round begins", name));
        log::debug!("[game {}] {} knocked", self.id, id);
        if let Some(next) = self.next_active(Some(i)) {
            let next = self.seats[next].id().to_string();
            self.begin(next);
        }
        true
    }

    /// Forces the turn of a human who has run out of time: draw from the
    /// deck if still holding three, discard the first card, pass the turn.
    /// Computer seats never time out here.
    pub fn expire(&mut self, timeout: Duration) -> bool {
        if !self.phase.is_active() || !self.expired(timeout) {
            return false;
        }
        let Some(i) = self.position(&self.current) else {
            return false;
        };
        if self.seats[i].is_robot() || self.seats[i].is_eliminated() {
            return false;
        }
        let id = self.current.clone();
        let name = self.seats[i].name().to_string();
        log::info!("[game {}] {} timed out", self.id, name);
        self.narration.push(format!("{}'s turn timed out!", name));
        if self.seats[i].hand().size() == HAND_SIZE && self.draw(&id, false) {
            self.narration.push(format!("{} was forced to draw from deck (timeout)", name));
        }
        self.pass(i, "(timeout)");
        true
    }

    /// Ends the current turn of `id` without a decision: a four-card hand
    /// discards its first card, then the turn passes.
    pub fn skip(&mut self, id: &str) -> bool {
        if !self.phase.is_active() || self.current != id {
            return false;
        }
        let Some(i) = self.position(id) else {
            return false;
        };
        log::warn!("[game {}] skipping turn of {}", self.id, id);
        self.pass(i, "(skipped)");
        true
    }

    /// Eliminates `id` outright, as when they leave the table mid-game.
    /// Passes the turn if it was theirs. The caller settles if the game is over.
    pub fn forfeit(&mut self, id: &str) -> bool {
        let Some(i) = self.position(id) else {
            return false;
        };
        if self.seats[i].is_eliminated() {
            return false;
        }
        let turn = self.phase.is_active() && self.current == id;
        self.seats[i].eliminate();
        let name = self.seats[i].name().to_string();
        self.narration.push(format!("{} disconnected and was eliminated", name));
        log::info!("[game {}] {} forfeited", self.id, id);
        if turn && !self.is_decided() {
            self.advance();
        }
        true
    }

    /// Closes a game nobody can continue, without costing anyone a life.
    pub fn conclude(&mut self) {
        if self.phase != Phase::Finished {
            self.settle(Settlement::Abandon);
        }
    }
}

/// turn flow
impl Game {
    /// Ensures the deck can be drawn from, rebuilding it from every discard
    /// but the top one when empty.
    fn restock(&mut self) -> Option<()> {
        if !self.deck.is_empty() {
            return Some(());
        }
        if self.pile.len() < 2 {
            return None;
        }
        let top = self.pile.pop()?;
        let spent = std::mem::replace(&mut self.pile, vec![top]);
        self.deck = Deck::shuffled(spent);
        self.narration.push("Deck reshuffled from discard pile");
        log::debug!("[game {}] reshuffled {} discards", self.id, self.deck.len());
        Some(())
    }

    fn pass(&mut self, i: usize, reason: &str) {
        if self.seats[i].hand().size() <= HAND_SIZE {
            self.advance();
        } else if let Some(card) = self.seats[i].hand_mut().remove(0) {
            let line = format!(
                "{} was forced to discard {} {}",
                self.seats[i].name(),
                card.describe(),
                reason
            );
            self.narration.push(line);
            self.release(i, card);
        }
    }

    /// Puts a discarded card on the pile and resolves what follows from it.
    fn release(&mut self, i: usize, card: Card) {
        self.pile.push(card);
        if self.seats[i].score().is_thirty_one() {
            self.instant(i);
        } else {
            self.advance();
        }
    }

    fn instant(&mut self, i: usize) {
        let id = self.seats[i].id().to_string();
        let name = self.seats[i].name().to_string();
        let points = self.seats[i].score().points();
        self.headline = format!("{} got 31 points! Instant win!", name);
        self.narration.push(format!("INSTANT WIN! {} got {} points!", name, points));
        log::info!("[game {}] {} hit 31", self.id, id);
        for j in (0..self.seats.len()).filter(|&j| j != i) {
            if self.seats[j].is_active() && self.seats[j].bleed() {
                let line = format!("{} has been eliminated!", self.seats[j].name());
                self.narration.push(line);
            }
        }
        self.settle(Settlement::Instant(id));
    }

    /// Passes the turn to the next active seat, settling the final round
    /// once play reaches or passes the knocker.
    fn advance(&mut self) {
        let from = self.position(&self.current);
        let next = self.next_active(from);
        let closes = self.phase == Phase::FinalRound && self.reaches_knocker(from, next);
        self.turns += 1;
        if let Some(next) = next {
            let next = self.seats[next].id().to_string();
            self.begin(next);
        }
        if closes {
            self.settle(Settlement::Showdown);
        }
    }

    fn begin(&mut self, id: PlayerId) {
        self.current = id;
        self.started = Instant::now();
        self.ticker += 1;
    }

    /// First active seat after `from` in seating order, wrapping around.
    /// Returns `from` itself when it is the only active seat.
    fn next_active(&self, from: Option<usize>) -> Option<usize> {
        let n = self.seats.len();
        let start = from.map(|f| f + 1).unwrap_or(0);
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&j| self.seats[j].is_active())
    }

    /// Whether moving the turn from `from` to `to` steps onto or over the knocker.
    fn reaches_knocker(&self, from: Option<usize>, to: Option<usize>) -> bool {
        let n = self.seats.len();
        let knocker = self.knocker.as_deref().and_then(|k| self.position(k));
        match (knocker, from, to) {
            (Some(k), Some(f), Some(t)) => {
                let distance = match (t + n - f) % n {
                    0 => n,
                    d => d,
                };
                (1..=distance).map(|s| (f + s) % n).any(|j| j == k)
            }
            (Some(k), None, Some(t)) => t == k,
            _ => true,
        }
    }
}

/// settlement
impl Game {
    fn settle(&mut self, settlement: Settlement) {
        let scores = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, p)| (i, p.score().points()))
            .collect::<Vec<(usize, Points)>>();
        self.narration.push(format!("Round {} ended", self.round));
        let (Some(max), Some(min)) = (
            scores.iter().map(|(_, s)| *s).max(),
            scores.iter().map(|(_, s)| *s).min(),
        ) else {
            self.finish();
            return;
        };
        self.champion = match &settlement {
            Settlement::Instant(id) => Some(id.clone()),
            _ => scores
                .iter()
                .find(|(_, s)| *s == max)
                .map(|(i, _)| self.seats[*i].id().to_string()),
        };
        if !settlement.skips_life_loss() {
            for (i, _) in scores.iter().filter(|(_, s)| *s == min) {
                self.seats[*i].bleed();
            }
        }
        for (i, points) in scores.iter() {
            let player = &self.seats[*i];
            let line = if player.is_eliminated() {
                format!("{} eliminated! Final score: {}", player.name(), points)
            } else {
                format!("{}: {} points, {} lives", player.name(), points, player.lives())
            };
            self.narration.push(line);
        }
        log::info!(
            "[game {}] round {} settled by {:?}, high {} low {}",
            self.id,
            self.round,
            settlement,
            max,
            min
        );
        if self.is_decided() || settlement == Settlement::Abandon {
            self.finish();
        } else {
            self.next_round();
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        let actives = self.actives().count();
        let humans = self.humans().count();
        self.winner = match (actives, humans) {
            (0, _) => None,
            (_, 0) => {
                self.narration.push("All human players have been eliminated!");
                self.actives()
                    .fold(None::<&Player>, |best, p| match best {
                        Some(b) if b.score().points() >= p.score().points() => Some(b),
                        _ => Some(p),
                    })
                    .map(|p| p.id().to_string())
            }
            (1, _) => self.actives().next().map(|p| p.id().to_string()),
            _ => None,
        };
        let line = match self.winner.as_deref().and_then(|w| self.player(w)) {
            Some(p) if p.is_robot() => format!("GAME OVER! {} (AI) wins the game!", p.name()),
            Some(p) => format!("GAME OVER! {} wins the game!", p.name()),
            None if actives == 0 => String::from("Game ended - no players remaining"),
            None => String::from("Game ended"),
        };
        self.narration.push(line);
        let finals = self
            .seats
            .iter()
            .map(|p| format!("Final: {} - {} points", p.name(), p.score().points()))
            .collect::<Vec<_>>();
        finals.into_iter().for_each(|line| self.narration.push(line));
        log::info!("[game {}] finished, winner {:?}", self.id, self.winner);
    }

    fn next_round(&mut self) {
        self.round += 1;
        self.turns = 0;
        self.knocker = None;
        self.headline.clear();
        self.seats.iter_mut().for_each(Player::unknock);
        self.deal();
        self.phase = Phase::Playing;
        self.narration.push(format!("Round {} begins!", self.round));
        let opener = self.opener();
        self.announce(&opener);
        self.begin(opener);
        log::debug!("[game {}] round {} dealt", self.id, self.round);
    }

    /// Fresh deck, three cards to each active seat, one card face up.
    fn deal(&mut self) {
        self.deck = Deck::new();
        for player in self.seats.iter_mut() {
            if player.is_active() {
                player.deal(Hand::from(self.deck.deal(HAND_SIZE)));
            } else {
                player.hand_mut().clear();
            }
        }
        self.pile = self.deck.deal(1);
    }

    /// Who leads the current round: the host in round one, the last round's
    /// winner afterwards, else the first active seat.
    fn opener(&self) -> PlayerId {
        let preferred = match self.round {
            1 => self.host.as_deref(),
            _ => self.champion.as_deref(),
        };
        preferred
            .filter(|id| self.player(id).is_some_and(Player::is_active))
            .map(String::from)
            .or_else(|| self.actives().next().map(|p| p.id().to_string()))
            .unwrap_or_default()
    }

    fn announce(&mut self, opener: &str) {
        let Some(name) = self.player(opener).map(|p| p.name().to_string()) else {
            return;
        };
        let line = match (self.round, self.host.as_deref() == Some(opener)) {
            (1, true) => format!("{} (host) goes first!", name),
            (1, false) => format!("{} goes first!", name),
            (_, _) if self.champion.as_deref() == Some(opener) => {
                format!("{} (previous winner) goes first", name)
            }
            (_, _) => format!("{} goes first", name),
        };
        self.narration.push(line);
    }
}

/// presentation
impl Game {
    pub fn view(&self, timeout: Duration) -> GameView {
        GameView {
            game_id: self.id.to_string(),
            players: self.seats.iter().map(PlayerView::from).collect(),
            current_player_id: self.current.clone(),
            phase: self.phase,
            discard_pile: self.pile().map(CardView::from).collect(),
            deck_size: self.deck.len(),
            round_number: self.round,
            turn_count: self.turns,
            knocked_player_id: self.knocker.clone(),
            winner_id: self.winner.clone(),
            recent_message: self.headline.clone(),
            game_log: self.narration.lines().map(String::from).collect(),
            turn_time_remaining: self.remaining(timeout).as_secs(),
        }
    }
}

/// fixtures for deterministic tests across the crate
#[cfg(test)]
impl Game {
    pub(crate) fn rig(&mut self, id: &str, hand: &str) {
        let hand = Hand::try_from(hand).expect("valid hand");
        let i = self.position(id).expect("seated player");
        self.seats[i].deal(hand);
    }
    pub(crate) fn rig_pile(&mut self, pile: &str) {
        self.pile = Card::parse(pile).expect("valid pile");
    }
    pub(crate) fn rig_deck(&mut self, deck: &str) {
        self.deck = Deck::from(Card::parse(deck).expect("valid deck"));
    }
    pub(crate) fn rig_lives(&mut self, id: &str, lives: crate::Lives) {
        let i = self.position(id).expect("seated player");
        while self.seats[i].lives() > lives {
            self.seats[i].bleed();
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "round {} ({}) turn {}", self.round, self.phase, self.current)?;
        for player in self.seats.iter() {
            writeln!(f, "  {:<16} {} [{}]", player.to_string(), player.hand(), player.score())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LIVES;

    const TIMEOUT: Duration = Duration::from_secs(crate::TURN_TIMEOUT);

    fn duel() -> Game {
        Game::create(&["Alice", "Bob"], 0, &[], Some("player_1"))
    }

    #[test]
    fn creates_dealt_game() {
        let game = Game::create(&["Alice"], 2, &[Difficulty::Expert], None);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.round(), 1);
        assert_eq!(game.players().len(), 3);
        assert_eq!(game.pile().count(), 1);
        assert_eq!(game.deck_size(), 52 - 3 * 3 - 1);
        assert!(game.players().iter().all(|p| p.hand().size() == HAND_SIZE));
        assert!(game.players().iter().all(|p| p.lives() == LIVES));
        assert_eq!(game.player("ai_1").and_then(Player::difficulty), Some(Difficulty::Expert));
        assert_eq!(game.player("ai_2").and_then(Player::difficulty), Some(Difficulty::Medium));
        assert_eq!(game.player("ai_2").map(Player::name), Some("AI Player 2 (Medium)"));
        assert_eq!(game.current(), "player_1");
    }

    #[test]
    fn host_opens_round_one() {
        let game = Game::create(&["Alice", "Bob"], 0, &[], Some("player_2"));
        assert_eq!(game.current(), "player_2");
        let game = Game::create(&["Alice", "Bob"], 0, &[], Some("nobody"));
        assert_eq!(game.current(), "player_1");
    }

    #[test]
    #[should_panic]
    fn refuses_more_seats_than_cards() {
        Game::create(&vec!["x"; 18], 0, &[], None);
    }

    #[test]
    fn rejects_out_of_turn_actions() {
        let mut game = duel();
        let before = game.view(TIMEOUT);
        assert!(!game.draw("player_2", false));
        assert!(!game.knock("player_2"));
        assert!(!game.discard("player_1", 0));
        assert!(!game.draw("ghost", false));
        let after = game.view(TIMEOUT);
        assert_eq!(before.deck_size, after.deck_size);
        assert_eq!(before.current_player_id, after.current_player_id);
        assert_eq!(before.game_log.len(), after.game_log.len());
    }

    #[test]
    fn draw_then_discard_passes_turn() {
        let mut game = duel();
        game.rig("player_1", "Kh 9h 5s");
        game.rig("player_2", "2c 3d 4s");
        game.rig_pile("7c");
        let tick = game.ticker();
        assert!(game.draw("player_1", true));
        assert_eq!(game.player("player_1").map(|p| p.hand().size()), Some(4));
        assert_eq!(game.pile().count(), 0);
        assert!(!game.draw("player_1", false));
        assert!(!game.knock("player_1"));
        assert!(!game.discard("player_1", 4));
        assert!(game.discard("player_1", 2));
        assert_eq!(game.discard_top(), Some(Card::try_from("5s").unwrap()));
        assert_eq!(game.current(), "player_2");
        assert_eq!(game.turns(), 1);
        assert!(game.ticker() > tick);
    }

    #[test]
    fn taking_from_empty_pile_fails() {
        let mut game = duel();
        game.rig_pile("");
        assert!(!game.draw("player_1", true));
        assert!(game.draw("player_1", false));
    }

    #[test]
    fn reshuffles_all_but_top_discard() {
        let mut game = duel();
        game.rig_deck("");
        game.rig_pile("2c 3c 4c 5c");
        assert!(game.draw("player_1", false));
        assert_eq!(game.pile().collect::<Vec<_>>(), vec![Card::try_from("5c").unwrap()]);
        assert_eq!(game.deck_size(), 2);
    }

    #[test]
    fn draw_fails_when_nothing_to_reshuffle() {
        let mut game = duel();
        game.rig_deck("");
        game.rig_pile("5c");
        let hand = game.player("player_1").map(|p| p.hand().clone());
        assert!(!game.draw("player_1", false));
        assert_eq!(game.player("player_1").map(|p| p.hand().clone()), hand);
        assert_eq!(game.pile().count(), 1);
        assert_eq!(game.current(), "player_1");
    }

    #[test]
    fn knock_gives_everyone_one_more_turn() {
        let mut game = Game::create(&["A", "B", "C"], 0, &[], Some("player_1"));
        game.rig("player_1", "Kh Qh Jh");
        game.rig("player_2", "2c 3d 4s");
        game.rig("player_3", "9c 9d 8s");
        assert!(game.knock("player_1"));
        assert_eq!(game.phase(), Phase::FinalRound);
        assert_eq!(game.knocker(), Some("player_1"));
        assert_eq!(game.current(), "player_2");
        assert!(!game.knock("player_2"));
        assert!(game.draw("player_2", false));
        assert!(game.discard("player_2", 3));
        assert_eq!(game.phase(), Phase::FinalRound);
        assert_eq!(game.current(), "player_3");
        assert!(game.draw("player_3", false));
        assert!(game.discard("player_3", 3));
        assert_eq!(game.round(), 2);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.knocker(), None);
        assert_eq!(game.champion(), Some("player_1"));
        assert_eq!(game.current(), "player_1");
        assert_eq!(game.player("player_1").map(Player::lives), Some(LIVES));
        assert_eq!(game.player("player_2").map(Player::lives), Some(LIVES - 1));
        assert_eq!(game.player("player_3").map(Player::lives), Some(LIVES));
        assert!(game.players().iter().all(|p| !p.has_knocked()));
    }

    #[test]
    fn tied_low_hands_all_lose() {
        let mut game = Game::create(&["A", "B", "C"], 0, &[], Some("player_1"));
        game.rig("player_1", "Kh Qh Jh");
        game.rig("player_2", "2c 3d 4s");
        game.rig("player_3", "4c 3h 2s");
        game.rig_deck("5d 5d");
        assert!(game.knock("player_1"));
        assert!(game.draw("player_2", false));
        assert!(game.discard("player_2", 3));
        assert!(game.draw("player_3", false));
        assert!(game.discard("player_3", 3));
        assert_eq!(game.player("player_2").map(Player::lives), Some(LIVES - 1));
        assert_eq!(game.player("player_3").map(Player::lives), Some(LIVES - 1));
    }

    #[test]
    fn instant_thirty_one_costs_everyone_else_a_life() {
        let mut game = duel();
        game.rig("player_1", "Ah As 2c");
        game.rig("player_2", "Kc Qc Jc");
        game.rig_pile("Ad");
        assert!(game.draw("player_1", true));
        assert!(game.discard("player_1", 2));
        assert_eq!(game.player("player_1").map(Player::lives), Some(LIVES));
        assert_eq!(game.player("player_2").map(Player::lives), Some(LIVES - 1));
        assert_eq!(game.champion(), Some("player_1"));
        assert_eq!(game.round(), 2);
        assert_eq!(game.current(), "player_1");
        assert_eq!(game.headline(), "");
    }

    #[test]
    fn instant_thirty_one_can_end_the_game() {
        let mut game = duel();
        game.rig("player_1", "Ah As 2c");
        game.rig("player_2", "Kc Qc Jc");
        game.rig_lives("player_2", 1);
        game.rig_pile("Ad");
        assert!(game.draw("player_1", true));
        assert!(game.discard("player_1", 2));
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.round(), 1);
        assert_eq!(game.winner(), Some("player_1"));
        assert!(game.player("player_2").is_some_and(Player::is_eliminated));
        assert!(!game.draw("player_1", false));
        assert!(!game.expire(Duration::ZERO));
    }

    #[test]
    fn last_life_eliminates_and_finishes() {
        let mut game = duel();
        game.rig("player_1", "Kh Qh Jh");
        game.rig("player_2", "2c 3d 4s");
        game.rig_lives("player_2", 1);
        assert!(game.knock("player_1"));
        assert!(game.draw("player_2", false));
        assert!(game.discard("player_2", 3));
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.winner(), Some("player_1"));
        assert!(game.narration().lines().any(|l| l.contains("GAME OVER")));
    }

    #[test]
    fn eliminated_seats_are_skipped_and_not_dealt() {
        let mut game = Game::create(&["A", "B", "C"], 0, &[], Some("player_1"));
        game.rig("player_1", "Kh Qh Jh");
        game.rig("player_2", "2c 3d 4s");
        game.rig("player_3", "9c 9d 8s");
        game.rig_lives("player_2", 1);
        assert!(game.knock("player_1"));
        assert!(game.draw("player_2", false));
        assert!(game.discard("player_2", 3));
        assert!(game.draw("player_3", false));
        assert!(game.discard("player_3", 3));
        assert_eq!(game.round(), 2);
        assert!(game.player("player_2").is_some_and(Player::is_eliminated));
        assert_eq!(game.player("player_2").map(|p| p.hand().size()), Some(0));
        assert_eq!(game.current(), "player_1");
        game.rig("player_1", "2c 3d 4s");
        assert!(game.draw("player_1", false));
        assert!(game.discard("player_1", 0));
        assert_eq!(game.current(), "player_3");
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_forces_draw_and_discard() {
        let mut game = duel();
        game.rig("player_1", "2c 3d 4s");
        assert!(!game.expire(TIMEOUT));
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(game.remaining(TIMEOUT), Duration::from_secs(15));
        assert!(!game.expire(TIMEOUT));
        tokio::time::advance(Duration::from_secs(16)).await;
        let deck = game.deck_size();
        let pile = game.pile().count();
        assert!(game.expire(TIMEOUT));
        assert_eq!(game.deck_size(), deck - 1);
        assert_eq!(game.pile().count(), pile + 1);
        assert_eq!(game.player("player_1").map(|p| p.hand().size()), Some(HAND_SIZE));
        assert_eq!(game.current(), "player_2");
        assert_eq!(game.remaining(TIMEOUT), TIMEOUT);
        assert!(game.narration().lines().any(|l| l.contains("timed out")));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_after_draw_only_discards() {
        let mut game = duel();
        game.rig("player_1", "2c 3d 4s");
        game.rig_pile("9h");
        assert!(game.draw("player_1", true));
        tokio::time::advance(TIMEOUT).await;
        assert!(game.expire(TIMEOUT));
        assert_eq!(game.discard_top(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(game.current(), "player_2");
    }

    #[tokio::test(start_paused = true)]
    async fn robots_never_time_out() {
        let mut game = Game::create(&["Alice"], 1, &[], Some("ai_1"));
        tokio::time::advance(TIMEOUT * 2).await;
        assert!(!game.expire(TIMEOUT));
        assert_eq!(game.current(), "ai_1");
    }

    #[test]
    fn skip_discards_first_card_when_holding_four() {
        let mut game = duel();
        game.rig("player_1", "2c 3d 4s");
        game.rig_pile("9h");
        assert!(game.draw("player_1", true));
        assert!(!game.skip("player_2"));
        assert!(game.skip("player_1"));
        assert_eq!(game.discard_top(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(game.current(), "player_2");
    }

    #[test]
    fn forfeit_on_turn_passes_play() {
        let mut game = Game::create(&["A", "B", "C"], 0, &[], Some("player_1"));
        assert!(game.forfeit("player_1"));
        assert!(!game.forfeit("player_1"));
        assert_eq!(game.current(), "player_2");
        assert!(!game.is_over());
        assert!(game.forfeit("player_3"));
        assert!(game.is_over());
    }

    #[test]
    fn conclude_spares_lives() {
        let mut game = Game::create(&["Alice"], 1, &[], None);
        assert!(game.forfeit("player_1"));
        assert!(game.is_over());
        game.conclude();
        assert_eq!(game.phase(), Phase::Finished);
        assert_eq!(game.winner(), Some("ai_1"));
        assert_eq!(game.player("ai_1").map(Player::lives), Some(LIVES));
        game.conclude();
        assert_eq!(game.phase(), Phase::Finished);
    }

    #[test]
    fn view_lists_pile_top_down() {
        let mut game = duel();
        game.rig_pile("2c 3c");
        let view = game.view(TIMEOUT);
        assert_eq!(view.discard_pile[0], CardView { value: "3", suit: "clubs" });
        assert_eq!(view.players.len(), 2);
        assert_eq!(view.phase, Phase::Playing);
        assert!(view.turn_time_remaining <= crate::TURN_TIMEOUT);
        assert!(view.turn_time_remaining >= crate::TURN_TIMEOUT - 1);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["phase"], "playing");
        assert_eq!(json["players"][0]["is_ai"], false);
        assert!(json["players"][0].get("ai_difficulty").is_none());
    }
}
