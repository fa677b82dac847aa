use super::*;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

impl Casino {
    /// Spawns the recurring sweep. Every period it forces expired turns,
    /// rescues stalled computers, evicts silent humans, and purges finished
    /// tables past retention. Runs until the handle is aborted.
    pub fn patrol(self: &Arc<Self>) -> JoinHandle<()> {
        let casino = self.clone();
        let config = *casino.config();
        log::info!("[sweeper] patrolling every {:?}", config.sweep);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.sweep);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                for event in casino.sweep(config.turn).await {
                    log::info!("[sweeper] {}", event);
                }
                match casino.cleanup(config.retention).await {
                    0 => {}
                    n => log::info!("[sweeper] purged {} finished tables", n),
                }
            }
        })
    }
}
