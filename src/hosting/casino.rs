use super::*;
use crate::gameplay::Difficulty;
use crate::gameplay::GameView;
use crate::gameroom::*;
use anyhow::anyhow;
use anyhow::bail;
use std::sync::Arc;
use std::time::Duration;

/// Hosts every table in the process.
///
/// Each entry point looks the table up in the [`Registry`], does its work
/// under that table's lock, then updates the registry indices and hands any
/// resulting [`Ticket`] to [`dispatch`]. Refusals come back as errors with a
/// readable reason.
#[derive(Debug, Default)]
pub struct Casino {
    registry: Registry,
    config: TimerConfig,
}

impl Casino {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            registry: Registry::default(),
        }
    }
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
    async fn shared(&self, id: ID<Table>) -> anyhow::Result<Shared> {
        self.registry
            .get(id)
            .await
            .ok_or_else(|| anyhow!("table not found"))
    }
}

/// lobby
impl Casino {
    /// Opens a table with `host` seated as its host, moving them away
    /// from any table they sat at before.
    pub async fn create(&self, host: &str, host_name: &str, setup: Setup) -> anyhow::Result<TableView> {
        self.vacate(host, None).await;
        let code = loop {
            let code = Table::code(&mut rand::rng());
            if !self.registry.has_code(&code).await {
                break code;
            }
        };
        let table = Table::open(host, host_name, setup, code.clone(), self.config);
        let id = table.id();
        let view = table.view();
        self.registry.insert(id, &code, Arc::new(tokio::sync::Mutex::new(table))).await?;
        self.registry.seat(host, id).await;
        log::info!("[casino] {} opened table {}", host, id);
        Ok(view)
    }

    pub async fn join_by_code(
        &self,
        player: &str,
        name: &str,
        code: &str,
        password: Option<&str>,
    ) -> anyhow::Result<TableView> {
        let (id, table) = self
            .registry
            .by_code(&code.trim().to_uppercase())
            .await
            .ok_or_else(|| anyhow!("no table with invite code {}", code))?;
        self.join(player, name, id, table, password).await
    }

    /// Joins a public table directly. Private tables need their invite code.
    pub async fn join_by_id(
        &self,
        player: &str,
        name: &str,
        id: ID<Table>,
        password: Option<&str>,
    ) -> anyhow::Result<TableView> {
        let table = self.shared(id).await?;
        if table.lock().await.is_private() {
            bail!("table is private");
        }
        self.join(player, name, id, table, password).await
    }

    async fn join(
        &self,
        player: &str,
        name: &str,
        id: ID<Table>,
        table: Shared,
        password: Option<&str>,
    ) -> anyhow::Result<TableView> {
        {
            let table = table.lock().await;
            if !table.is_seated(player) {
                if !table.admits(password) {
                    bail!("wrong password");
                }
                if !table.can_join() {
                    bail!("table cannot accept joins");
                }
            }
        }
        self.vacate(player, Some(id)).await;
        let (view, ticket) = {
            let mut table = table.lock().await;
            table.join(player, name, password)?;
            (table.view(), table.prime())
        };
        self.registry.seat(player, id).await;
        if let Some(ticket) = ticket {
            dispatch(table, ticket);
        }
        Ok(view)
    }

    /// Takes `player` out of their current table unless it is `staying`.
    async fn vacate(&self, player: &str, staying: Option<ID<Table>>) {
        let Some(previous) = self.registry.locate(player).await else {
            return;
        };
        if Some(previous) == staying {
            return;
        }
        log::info!("[casino] moving {} away from table {}", player, previous);
        if let Err(e) = self.leave(player).await {
            log::warn!("[casino] could not remove {} from {}: {}", player, previous, e);
            self.registry.unseat(player).await;
        }
    }

    /// Takes `player` out of whatever table they sit at. A table left
    /// without seats is dropped from the registry.
    pub async fn leave(&self, player: &str) -> anyhow::Result<()> {
        let id = self
            .registry
            .locate(player)
            .await
            .ok_or_else(|| anyhow!("player not in any table"))?;
        let Some(table) = self.registry.get(id).await else {
            self.registry.unseat(player).await;
            bail!("table not found");
        };
        let (ticket, empty) = {
            let mut table = table.lock().await;
            let ticket = table.leave(player)?;
            (ticket, table.is_empty())
        };
        self.registry.unseat(player).await;
        if empty {
            self.registry.remove(id).await;
            log::info!("[casino] table {} emptied and removed", id);
        } else if let Some(ticket) = ticket {
            dispatch(table, ticket);
        }
        Ok(())
    }

    /// Seats a computer player. Host only.
    pub async fn add_robot(
        &self,
        id: ID<Table>,
        requester: &str,
        difficulty: Difficulty,
    ) -> anyhow::Result<TableView> {
        let table = self.shared(id).await?;
        let mut table = table.lock().await;
        if table.host().map(Seat::id) != Some(requester) {
            bail!("only the host can add AI players");
        }
        let robot = table.add_robot(difficulty, &mut rand::rng())?;
        log::info!("[casino] {} added {} to table {}", requester, robot, id);
        Ok(table.view())
    }
}

/// play
impl Casino {
    /// Starts the table's game. Host only.
    pub async fn start(&self, id: ID<Table>, requester: &str) -> anyhow::Result<TableView> {
        let table = self.shared(id).await?;
        let (view, ticket) = {
            let mut guard = table.lock().await;
            let ticket = guard.start(requester)?;
            (guard.view(), ticket)
        };
        if let Some(ticket) = ticket {
            dispatch(table, ticket);
        }
        log::info!("[casino] table {} started by {}", id, requester);
        Ok(view)
    }

    /// Applies a player's play and returns the resulting game.
    pub async fn perform(&self, id: ID<Table>, player: &str, play: Play) -> anyhow::Result<GameView> {
        let table = self.shared(id).await?;
        let (view, ticket) = {
            let mut guard = table.lock().await;
            let ticket = guard.perform(player, play)?;
            let view = guard
                .game()
                .map(|g| g.view(self.config.turn))
                .ok_or_else(|| anyhow!("no game in progress"))?;
            (view, ticket)
        };
        if let Some(ticket) = ticket {
            dispatch(table, ticket);
        }
        Ok(view)
    }

    /// The table's current game, refreshing `player`'s activity if seated.
    pub async fn game(&self, id: ID<Table>, player: Option<&str>) -> anyhow::Result<GameView> {
        let table = self.shared(id).await?;
        let mut table = table.lock().await;
        if let Some(player) = player {
            table.touch(player);
        }
        table
            .game()
            .map(|g| g.view(self.config.turn))
            .ok_or_else(|| anyhow!("no game in progress"))
    }
}

/// queries
impl Casino {
    pub async fn table(&self, id: ID<Table>) -> anyhow::Result<TableView> {
        Ok(self.shared(id).await?.lock().await.view())
    }
    /// The table `player` currently sits at.
    pub async fn locate(&self, player: &str) -> Option<TableView> {
        let id = self.registry.locate(player).await?;
        let table = self.registry.get(id).await?;
        let view = table.lock().await.view();
        Some(view)
    }
    /// Public tables still accepting players.
    pub async fn public(&self) -> Vec<TableView> {
        let mut views = Vec::new();
        for (_, table) in self.registry.all().await {
            let table = table.lock().await;
            if !table.is_private() && table.can_join() {
                views.push(table.view());
            }
        }
        views
    }
    /// Refreshes `player`'s activity at their table.
    pub async fn touch(&self, player: &str) -> bool {
        let Some(id) = self.registry.locate(player).await else {
            return false;
        };
        let Some(table) = self.registry.get(id).await else {
            return false;
        };
        table.lock().await.touch(player)
    }
}

/// maintenance
impl Casino {
    /// Sweeps every table for expired turns, stalled computers, and silent
    /// humans. Returns what happened, one line per event.
    pub async fn sweep(&self, timeout: Duration) -> Vec<String> {
        let mut events = Vec::new();
        for (id, table) in self.registry.all().await {
            let (sweep, empty) = {
                let mut guard = table.lock().await;
                (guard.sweep(timeout), guard.is_empty())
            };
            for player in sweep.evicted.iter() {
                self.registry.unseat_from(player, id).await;
            }
            if empty {
                self.registry.remove(id).await;
                log::info!("[casino] table {} emptied by sweep", id);
            } else if let Some(ticket) = sweep.ticket {
                dispatch(table, ticket);
            }
            events.extend(sweep.events);
        }
        events
    }

    /// Purges finished tables older than `age`. Returns how many went.
    pub async fn cleanup(&self, age: Duration) -> usize {
        let mut purged = 0;
        for (id, table) in self.registry.all().await {
            let stale = {
                let table = table.lock().await;
                table.status() == TableStatus::Finished && table.age() > age
            };
            if stale {
                self.registry.remove(id).await;
                log::info!("[casino] purged table {}", id);
                purged += 1;
            }
        }
        purged
    }
}
