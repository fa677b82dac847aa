//! Hosting Binary
//!
//! Runs the table registry with its disconnect sweeper and plays a demo
//! table: one scripted human host against computer seats, narrating each
//! turn and printing the final game as JSON.

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use thirtyone::gameplay::CardView;
use thirtyone::gameplay::Difficulty;
use thirtyone::gameplay::Phase;
use thirtyone::gameroom::Play;
use thirtyone::gameroom::Setup;
use thirtyone::gameroom::TimerConfig;
use thirtyone::hosting::Casino;
use thirtyone::*;

const HOST: &str = "host";

#[derive(Parser)]
#[command(author, version, about = "Host tables of the card game 31", long_about = None)]
struct Args {
    /// Seconds a human may take per turn
    #[arg(long, default_value_t = TURN_TIMEOUT)]
    turn: u64,
    /// Extra seconds of silence tolerated before eviction
    #[arg(long, default_value_t = REJOIN_GRACE)]
    grace: u64,
    /// Shortest computer thinking time in milliseconds
    #[arg(long, default_value_t = THINK_MIN_MS)]
    think_min: u64,
    /// Longest computer thinking time in milliseconds
    #[arg(long, default_value_t = THINK_MAX_MS)]
    think_max: u64,
    /// Hours a finished table is retained
    #[arg(long, default_value_t = RETENTION_HOURS)]
    retention: u64,
    /// Seconds between sweeps
    #[arg(long, default_value_t = SWEEP_INTERVAL)]
    sweep: u64,
    /// Computer seats at the demo table
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..8))]
    robots: u8,
    /// Difficulty of the demo's computer seats
    #[arg(long, default_value = "medium", value_parser = |s: &str| Difficulty::try_from(s))]
    difficulty: Difficulty,
}

impl Args {
    fn config(&self) -> TimerConfig {
        TimerConfig {
            turn: Duration::from_secs(self.turn),
            grace: Duration::from_secs(self.grace),
            think_min: Duration::from_millis(self.think_min.min(self.think_max)),
            think_max: Duration::from_millis(self.think_max),
            retention: Duration::from_secs(self.retention * 60 * 60),
            sweep: Duration::from_secs(self.sweep.max(1)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log();
    kys();
    let casino = Arc::new(Casino::new(args.config()));
    let patrol = casino.patrol();
    let table = casino.create(HOST, "Host", Setup::named("Demo Table")).await?;
    let id = ID::try_from(table.table_id.as_str())?;
    log::info!("[demo] opened table {} with invite code {}", id, table.invite_code);
    for _ in 0..args.robots {
        casino.add_robot(id, HOST, args.difficulty).await?;
    }
    let table = casino.start(id, HOST).await?;
    let seat = table
        .player_id_mapping
        .get(HOST)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("host missing from game"))?;
    let mut headline = String::new();
    let game = loop {
        tokio::time::sleep(Duration::from_millis(250)).await;
        let game = casino.game(id, Some(HOST)).await?;
        if game.recent_message != headline {
            headline = game.recent_message.clone();
            log::info!("[demo] {}", headline);
        }
        if game.phase == Phase::Finished {
            break game;
        }
        if game.current_player_id != seat {
            continue;
        }
        let game = casino.perform(id, HOST, Play::Draw { from_discard: false }).await?;
        let hand = game
            .players
            .iter()
            .find(|p| p.id == seat)
            .map(|p| p.hand.as_slice())
            .unwrap_or_default();
        casino.perform(id, HOST, Play::Discard(worst(hand))).await?;
    };
    println!("{}", serde_json::to_string_pretty(&game)?);
    patrol.abort();
    Ok(())
}

/// Index of the card whose removal leaves the best same-suit total.
fn worst(hand: &[CardView]) -> usize {
    (0..hand.len())
        .max_by_key(|&i| {
            hand.iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, c)| {
                    hand.iter()
                        .enumerate()
                        .filter(|(k, d)| *k != i && d.suit == c.suit)
                        .map(|(_, d)| value(d))
                        .sum::<u32>()
                })
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0)
}

fn value(card: &CardView) -> u32 {
    match card.value {
        "A" => 11,
        "K" | "Q" | "J" => 10,
        n => n.parse().unwrap_or(0),
    }
}
