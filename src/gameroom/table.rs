use super::*;
use crate::gameplay::Difficulty;
use crate::gameplay::Game;
use crate::gameplay::Player;
use crate::players::Robot;
use anyhow::anyhow;
use anyhow::bail;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

/// One lobby and, once started, the game it hosts.
///
/// Owns the lobby seats in join order, the invite code and optional
/// password, and a mapping from lobby ids to round seat ids
/// (`player_N` for humans, `ai_N` for computers). All methods are
/// synchronous; the caller holds the table's lock for their duration.
///
/// `pending` remembers the turn ticker of the last computer turn handed
/// out, so a seat is never ticketed twice for the same turn.
#[derive(Debug)]
pub struct Table {
    id: ID<Self>,
    name: String,
    code: String,
    status: TableStatus,
    capacity: usize,
    minimum: usize,
    seats: Vec<Seat>,
    private: bool,
    password: Option<String>,
    game: Option<Game>,
    mapping: BTreeMap<PlayerId, PlayerId>,
    created: Instant,
    pending: Option<u64>,
    config: TimerConfig,
}

impl Table {
    /// Opens a table with its host already seated.
    pub fn open(host: &str, host_name: &str, setup: Setup, code: String, config: TimerConfig) -> Self {
        let mut seat = Seat::human(host, host_name);
        seat.crown();
        let mut table = Self {
            id: ID::default(),
            capacity: setup.seats(),
            name: setup.name,
            private: setup.private,
            password: setup.password,
            code,
            status: TableStatus::Waiting,
            minimum: MIN_PLAYERS,
            seats: vec![seat],
            game: None,
            mapping: BTreeMap::new(),
            created: Instant::now(),
            pending: None,
            config,
        };
        table.restatus();
        log::info!(
            "[table {}] opened by {} as {} ({} seats)",
            table.id,
            host,
            table.code,
            table.capacity
        );
        table
    }

    /// A fresh random invite code. Uniqueness is the registry's concern.
    pub fn code<R>(rng: &mut R) -> String
    where
        R: Rng,
    {
        (0..INVITE_CODE_LENGTH)
            .map(|_| INVITE_CODE_CHARSET[rng.random_range(0..INVITE_CODE_CHARSET.len())] as char)
            .collect()
    }
}

/// queries
impl Table {
    pub fn id(&self) -> ID<Self> {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn invite(&self) -> &str {
        &self.code
    }
    pub fn status(&self) -> TableStatus {
        self.status
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn is_private(&self) -> bool {
        self.private
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn seat(&self, id: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id() == id)
    }
    pub fn host(&self) -> Option<&Seat> {
        self.seats.iter().find(|s| s.is_host())
    }
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }
    /// Round seat id mapped to a lobby id, once a game has started.
    pub fn round_id(&self, id: &str) -> Option<&str> {
        self.mapping.get(id).map(String::as_str)
    }
    pub fn age(&self) -> Duration {
        self.created.elapsed()
    }
    pub fn is_seated(&self, id: &str) -> bool {
        self.seat(id).is_some()
    }
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
    /// Human seats still at the table.
    pub fn humans(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_robot()).count()
    }
    fn joined(&self) -> usize {
        self.seats.iter().filter(|s| s.status().is_joined()).count()
    }
    pub fn can_join(&self) -> bool {
        self.status.is_open() && self.seats.len() < self.capacity
    }
    pub fn can_start(&self) -> bool {
        self.status.is_open() && (self.minimum..=self.capacity).contains(&self.joined())
    }
    pub fn admits(&self, password: Option<&str>) -> bool {
        match self.password.as_deref() {
            Some(expected) => password == Some(expected),
            None => true,
        }
    }
    /// Whether it is `id`'s turn with less than the grace period left on it.
    fn is_contested(&self, id: &str) -> bool {
        self.status == TableStatus::Playing
            && self
                .round_id(id)
                .zip(self.game.as_ref())
                .is_some_and(|(round, game)| {
                    game.current() == round && game.remaining(self.config.turn) < self.config.grace
                })
    }
}

/// lobby
impl Table {
    /// Seats `id`, or refreshes their activity if already seated.
    /// A returning player skips the phase and capacity checks, but may not
    /// reclaim their own turn once it is nearly over.
    pub fn join(&mut self, id: &str, name: &str, password: Option<&str>) -> anyhow::Result<()> {
        if self.is_seated(id) {
            if self.is_contested(id) {
                bail!("rejoin refused while turn time is running out");
            }
            self.touch(id);
            log::info!("[table {}] {} rejoined", self.id, id);
            return Ok(());
        }
        if !self.admits(password) {
            bail!("wrong password");
        }
        if !self.status.is_open() {
            bail!("table is not accepting players");
        }
        if self.seats.len() >= self.capacity {
            bail!("table is full");
        }
        self.seats.push(Seat::human(id, name));
        self.restatus();
        log::info!("[table {}] {} joined", self.id, id);
        Ok(())
    }

    /// Seats a computer player under a unique name. Returns its lobby id.
    pub fn add_robot<R>(&mut self, difficulty: Difficulty, rng: &mut R) -> anyhow::Result<PlayerId>
    where
        R: Rng,
    {
        if !self.can_join() {
            bail!("table cannot accept more players");
        }
        let id = loop {
            let id = format!("ai_{:08x}", rng.random::<u32>());
            if !self.is_seated(&id) {
                break id;
            }
        };
        let base = ROBOT_NAMES.choose(rng).copied().unwrap_or(ROBOT_NAMES[0]);
        let name = self.unique(base);
        log::info!("[table {}] seating {} as {} ({})", self.id, name, id, difficulty);
        self.seats.push(Seat::robot(id.clone(), name, difficulty));
        self.restatus();
        Ok(id)
    }

    /// Removes `id` from the table. Mid-game their round seat is eliminated.
    /// When no humans remain the computer seats go too and the table closes.
    pub fn leave(&mut self, id: &str) -> anyhow::Result<Option<Ticket>> {
        self.depart(id).ok_or_else(|| anyhow!("player not in this table"))?;
        self.vacate();
        Ok(self.prime())
    }

    pub fn touch(&mut self, id: &str) -> bool {
        match self.seats.iter_mut().find(|s| s.id() == id) {
            Some(seat) => {
                seat.touch();
                true
            }
            None => false,
        }
    }

    fn depart(&mut self, id: &str) -> Option<Seat> {
        let index = self.seats.iter().position(|s| s.id() == id)?;
        let seat = self.seats.remove(index);
        if let (TableStatus::Playing, Some(round), Some(game)) =
            (self.status, self.mapping.get(id), self.game.as_mut())
        {
            game.forfeit(round);
        }
        self.wrap_up();
        if seat.is_host() {
            if let Some(next) = self.seats.iter_mut().find(|s| !s.is_robot()) {
                log::info!("[table {}] {} is now host", self.id, next.id());
                next.crown();
            }
        }
        self.restatus();
        log::info!("[table {}] {} left", self.id, id);
        Some(seat)
    }

    fn unique(&self, base: &str) -> String {
        (0usize..)
            .map(|n| match n {
                0 => base.to_string(),
                n => format!("{}{}", base, n),
            })
            .find(|name| self.seats.iter().all(|s| s.name() != name))
            .unwrap_or_else(|| base.to_string())
    }

    fn restatus(&mut self) {
        if self.status.is_open() {
            self.status = if self.joined() >= self.minimum {
                TableStatus::Ready
            } else {
                TableStatus::Waiting
            };
        }
    }

    /// Dismisses the computer seats once no human remains, then closes
    /// a table left without seats.
    fn vacate(&mut self) {
        if self.humans() == 0 && !self.seats.is_empty() {
            log::info!("[table {}] no humans left, dismissing computers", self.id);
            self.seats.clear();
        }
        if self.seats.is_empty() {
            self.close();
        }
    }

    fn close(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.conclude();
        }
        self.status = TableStatus::Finished;
        log::info!("[table {}] closed", self.id);
    }
}

/// game
impl Table {
    /// Starts the game. Humans take round seats first, then computers,
    /// each in join order, and the host's seat opens round one.
    pub fn start(&mut self, requester: &str) -> anyhow::Result<Option<Ticket>> {
        if self.host().map(Seat::id) != Some(requester) {
            bail!("only the host can start");
        }
        if !self.can_start() {
            bail!("not enough players to start");
        }
        let joined = self
            .seats
            .iter()
            .filter(|s| s.status().is_joined())
            .collect::<Vec<&Seat>>();
        let humans = joined
            .iter()
            .filter(|s| !s.is_robot())
            .enumerate()
            .map(|(i, s)| (s.id(), Player::human(format!("player_{}", i + 1), s.name())));
        let robots = joined
            .iter()
            .filter_map(|s| s.difficulty().map(|d| (s, d)))
            .enumerate()
            .map(|(i, (s, d))| (s.id(), Player::robot(format!("ai_{}", i + 1), s.name(), d)));
        let (mapping, roster): (BTreeMap<PlayerId, PlayerId>, Vec<Player>) = humans
            .chain(robots)
            .map(|(lobby, player)| ((lobby.to_string(), player.id().to_string()), player))
            .unzip();
        let host = mapping.get(requester).cloned();
        let game = Game::seat(roster, host.as_deref());
        log::info!("[table {}] starting game {} with {} seats", self.id, game.id(), mapping.len());
        self.game = Some(game);
        self.mapping = mapping;
        self.pending = None;
        self.status = TableStatus::Playing;
        self.seats
            .iter_mut()
            .filter(|s| s.status().is_joined())
            .for_each(Seat::play);
        Ok(self.prime())
    }

    /// Applies a seated player's requested play and refreshes their activity.
    pub fn perform(&mut self, id: &str, play: Play) -> anyhow::Result<Option<Ticket>> {
        if self.status != TableStatus::Playing {
            bail!("game is not in playing state");
        }
        if !self.touch(id) {
            bail!("player not in this table");
        }
        let round = self
            .round_id(id)
            .map(String::from)
            .ok_or_else(|| anyhow!("player not mapped to game"))?;
        let game = self
            .game
            .as_mut()
            .ok_or_else(|| anyhow!("no game in progress"))?;
        let applied = match play.action() {
            Some(action) => game.apply(&round, action),
            None => {
                let (seat, difficulty) = game
                    .current_player()
                    .map(|p| (p.id().to_string(), p.difficulty()))
                    .ok_or_else(|| anyhow!("current player not found"))?;
                let difficulty = difficulty
                    .ok_or_else(|| anyhow!("cannot process AI turn: current player is human"))?;
                Robot::from(difficulty).play(game, &seat, &mut rand::rng())
            }
        };
        if !applied {
            bail!("invalid {} action", play);
        }
        log::debug!("[table {}] {} performed {}", self.id, id, play);
        self.wrap_up();
        Ok(self.prime())
    }

    /// Issues a ticket if a computer seat is to act and none is outstanding for this turn.
    pub fn prime(&mut self) -> Option<Ticket> {
        if self.status != TableStatus::Playing {
            return None;
        }
        let game = self.game.as_ref()?;
        let player = game
            .current_player()
            .filter(|p| p.is_robot() && p.is_active())?;
        if self.pending == Some(game.ticker()) {
            return None;
        }
        let ticket = Ticket::new(player.id(), game.ticker(), self.config.think(&mut rand::rng()));
        log::debug!("[table {}] ticket {}", self.id, ticket);
        self.pending = Some(ticket.tick());
        Some(ticket)
    }

    /// Runs a computer turn whose thinking delay is over. Stale tickets,
    /// whose seat or turn has since moved on, are dropped. With no humans
    /// left the game is closed instead. Returns the next ticket, if any.
    pub fn redeem(&mut self, ticket: &Ticket) -> Option<Ticket> {
        if self.pending == Some(ticket.tick()) {
            self.pending = None;
        }
        if self.status != TableStatus::Playing {
            return None;
        }
        let game = self.game.as_mut()?;
        if game.ticker() != ticket.tick() || game.current() != ticket.seat() {
            log::debug!("[table {}] dropping stale ticket {}", self.id, ticket);
            return None;
        }
        if game.humans().count() == 0 {
            log::info!("[table {}] no humans remain, ending game", self.id);
            game.conclude();
            self.status = TableStatus::Finished;
            return None;
        }
        self.act(ticket.seat());
        self.wrap_up();
        self.prime()
    }

    /// Plays computer seat `seat` right now, skipping it if its policy fails.
    fn act(&mut self, seat: &str) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };
        let Some(difficulty) = game.player(seat).and_then(Player::difficulty) else {
            return false;
        };
        if Robot::from(difficulty).play(game, seat, &mut rand::rng()) {
            log::debug!("[table {}] {} took its turn", self.id, seat);
            true
        } else {
            log::warn!("[table {}] {} failed its turn, skipping", self.id, seat);
            game.skip(seat);
            false
        }
    }

    /// Marks the table finished once its game has nothing left to play for.
    fn wrap_up(&mut self) -> bool {
        let Some(game) = self.game.as_mut() else {
            return false;
        };
        if self.status != TableStatus::Playing || !game.is_over() {
            return false;
        }
        game.conclude();
        self.status = TableStatus::Finished;
        log::info!("[table {}] game over, winner {:?}", self.id, game.winner());
        true
    }
}

/// maintenance
impl Table {
    /// Forces an expired human turn, plays a computer seat stalled beyond
    /// `timeout` plus grace, and evicts humans silent for as long. Evicting
    /// the last human dismisses the computers as leaving does.
    pub fn sweep(&mut self, timeout: Duration) -> Sweep {
        let mut sweep = Sweep::default();
        let silence = timeout + self.config.grace;
        if self.status == TableStatus::Playing {
            if self.game.as_mut().is_some_and(|g| g.expire(timeout)) {
                log::info!("[table {}] forced an expired turn", self.id);
                sweep.events.push(format!("Player turn timed out in table {}", self.id));
            }
            if let Some(seat) = self.stalled(silence) {
                log::warn!("[table {}] {} stalled, playing it now", self.id, seat);
                self.act(&seat);
                sweep.events.push(format!("AI player {} was played after stalling in table {}", seat, self.id));
            }
            self.wrap_up();
        }
        let gone = self
            .seats
            .iter()
            .filter(|s| !s.is_robot() && s.idle() > silence)
            .map(|s| (s.id().to_string(), s.name().to_string()))
            .collect::<Vec<(PlayerId, String)>>();
        for (id, name) in gone {
            if self.depart(&id).is_some() {
                log::info!("[table {}] evicted {} after {:?} of silence", self.id, id, silence);
                sweep.events.push(format!("Player {} ({}) disconnected from table {}", name, id, self.id));
                sweep.evicted.push(id);
            }
        }
        self.vacate();
        sweep.ticket = self.prime();
        sweep
    }

    fn stalled(&self, silence: Duration) -> Option<PlayerId> {
        let game = self.game.as_ref()?;
        game.current_player()
            .filter(|p| p.is_robot() && p.is_active())
            .filter(|_| game.expired(silence))
            .map(|p| p.id().to_string())
    }
}

/// presentation
impl Table {
    pub fn view(&self) -> TableView {
        TableView {
            table_id: self.id.to_string(),
            table_name: self.name.clone(),
            host_id: self.host().map(|s| s.id().to_string()),
            invite_code: self.code.clone(),
            age_secs: self.age().as_secs(),
            status: self.status,
            max_players: self.capacity,
            min_players: self.minimum,
            current_players: self.seats.len(),
            is_private: self.private,
            has_password: self.password.is_some(),
            can_join: self.can_join(),
            can_start: self.can_start(),
            players: self.seats.iter().map(SeatView::from).collect(),
            game_state: self.game.as_ref().map(|g| g.view(self.config.turn)),
            player_id_mapping: self.mapping.clone(),
        }
    }
}

#[cfg(test)]
impl Table {
    pub(crate) fn game_mut(&mut self) -> Option<&mut Game> {
        self.game.as_mut()
    }
}
