//! Table server core for the card game 31.
//!
//! Players hold three cards and draw/discard to maximise a same-suit total.
//! A knock starts the final round, the lowest hand loses a life, and the last
//! player with lives wins. This crate holds everything below the transport:
//!
//! - [`cards`]: Card primitives and 31-point scoring
//! - [`gameplay`]: Round engine: turns, knocks, settlement, elimination
//! - [`players`]: Computer opponents at four difficulties
//! - [`gameroom`]: Lobby tables, seat mapping, AI turn tickets
//! - [`hosting`]: Process-wide registry, orchestration, and the sweeper
pub mod cards;
pub mod gameplay;
pub mod gameroom;
pub mod hosting;
pub mod players;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Caller-supplied identity of a person or computer at a table.
pub type PlayerId = String;
/// Remaining lives of a round-scoped player.
pub type Lives = u8;
/// Same-suit point total of a hand.
pub type Points = u8;
/// Likelihood used by computer opponents when rolling decisions.
pub type Probability = f64;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

/// str isomorphism, for ids handed back by the transport
impl<T> TryFrom<&str> for ID<T> {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self::from)
            .map_err(|e| anyhow::anyhow!("invalid id {}: {}", s, e))
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Lives each player starts the game with.
pub const LIVES: Lives = 3;
/// Cards held between turns.
pub const HAND_SIZE: usize = 3;
/// Highest possible hand, and the instant-win total.
pub const THIRTY_ONE: Points = 31;
/// Narration entries kept per game; older entries fall off the front.
pub const NARRATION_CAP: usize = 50;

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Fewest seats needed to start a game.
pub const MIN_PLAYERS: usize = 2;
/// Most seats a table may hold.
pub const MAX_PLAYERS: usize = 8;
/// Length of the alphanumeric invite code.
pub const INVITE_CODE_LENGTH: usize = 6;
/// Characters an invite code is drawn from.
pub const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Display names handed to computer seats, suffixed on collision.
pub const ROBOT_NAMES: [&str; 8] = [
    "RoboCard",
    "ChipBot",
    "CardMaster",
    "AceAI",
    "SuitBot",
    "DeckWiz",
    "PokerFace",
    "GameGenie",
];

// ============================================================================
// TIMING
// ============================================================================
/// Seconds a human may spend on a turn before an action is forced.
pub const TURN_TIMEOUT: u64 = 45;
/// Extra seconds of silence, beyond the turn timeout, before a human is evicted.
/// Also the least turn time that must remain for a seated player to rejoin mid-turn.
pub const REJOIN_GRACE: u64 = 20;
/// Shortest simulated thinking time of a computer seat (milliseconds).
pub const THINK_MIN_MS: u64 = 500;
/// Longest simulated thinking time of a computer seat (milliseconds).
pub const THINK_MAX_MS: u64 = 3000;
/// Hours a finished table is kept before it is purged.
pub const RETENTION_HOURS: u64 = 24;
/// Seconds between disconnect/timeout sweeps.
pub const SWEEP_INTERVAL: u64 = 5;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Tables live only in memory, so there is nothing to flush.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, closing all tables");
            std::process::exit(0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn ids_are_unique() {
        let a = ID::<Marker>::default();
        let b = ID::<Marker>::default();
        assert!(a != b);
    }

    #[test]
    fn ids_parse_from_display() {
        let id = ID::<Marker>::default();
        let parsed = ID::<Marker>::try_from(id.to_string().as_str()).unwrap();
        assert_eq!(id, parsed);
        assert!(ID::<Marker>::try_from("not-a-uuid").is_err());
    }
}
