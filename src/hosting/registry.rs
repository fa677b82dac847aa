use super::*;
use crate::gameroom::Table;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::RwLock;

/// A table behind its own lock, shared with deferred computer turns.
pub type Shared = Arc<Mutex<Table>>;

/// Tables by id and invite code, plus the table each player sits at.
///
/// Each map has its own lock and no method holds one while awaiting
/// another or a table lock, so lookups never contend with game play.
#[derive(Debug, Default)]
pub struct Registry {
    tables: RwLock<HashMap<ID<Table>, Shared>>,
    codes: RwLock<HashMap<String, ID<Table>>>,
    seated: RwLock<HashMap<PlayerId, ID<Table>>>,
}

impl Registry {
    /// Registers a table under its id and invite code.
    pub async fn insert(&self, id: ID<Table>, code: &str, table: Shared) -> anyhow::Result<()> {
        {
            let mut codes = self.codes.write().await;
            if codes.contains_key(code) {
                anyhow::bail!("invite code {} already in use", code);
            }
            codes.insert(code.to_string(), id);
        }
        self.tables.write().await.insert(id, table);
        Ok(())
    }
    /// Drops a table with its invite code and every seat index pointing at it.
    pub async fn remove(&self, id: ID<Table>) -> Option<Shared> {
        let table = self.tables.write().await.remove(&id);
        self.codes.write().await.retain(|_, t| *t != id);
        self.seated.write().await.retain(|_, t| *t != id);
        table
    }
    pub async fn get(&self, id: ID<Table>) -> Option<Shared> {
        self.tables.read().await.get(&id).cloned()
    }
    pub async fn by_code(&self, code: &str) -> Option<(ID<Table>, Shared)> {
        let id = self.codes.read().await.get(code).copied()?;
        self.get(id).await.map(|table| (id, table))
    }
    pub async fn has_code(&self, code: &str) -> bool {
        self.codes.read().await.contains_key(code)
    }
    /// Snapshot of every table, for sweeps and listings.
    pub async fn all(&self) -> Vec<(ID<Table>, Shared)> {
        self.tables
            .read()
            .await
            .iter()
            .map(|(id, table)| (*id, table.clone()))
            .collect()
    }
    pub async fn len(&self) -> usize {
        self.tables.read().await.len()
    }
    pub async fn is_empty(&self) -> bool {
        self.tables.read().await.is_empty()
    }

    pub async fn seat(&self, player: &str, id: ID<Table>) {
        self.seated.write().await.insert(player.to_string(), id);
    }
    pub async fn unseat(&self, player: &str) -> Option<ID<Table>> {
        self.seated.write().await.remove(player)
    }
    /// Forgets where `player` sits, but only if it is table `id`.
    pub async fn unseat_from(&self, player: &str, id: ID<Table>) {
        let mut seated = self.seated.write().await;
        if seated.get(player) == Some(&id) {
            seated.remove(player);
        }
    }
    pub async fn locate(&self, player: &str) -> Option<ID<Table>> {
        self.seated.read().await.get(player).copied()
    }
}
