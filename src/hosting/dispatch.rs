use super::*;
use crate::gameroom::Ticket;

/// Waits out each ticket's thinking delay, then redeems it under the table
/// lock, following the chain while computer seats keep being next to act.
/// Stale tickets redeem to nothing, which ends the chain.
pub fn dispatch(table: Shared, ticket: Ticket) {
    log::debug!("[dispatch] scheduled {}", ticket);
    tokio::spawn(async move {
        let mut next = Some(ticket);
        while let Some(ticket) = next {
            tokio::time::sleep(ticket.delay()).await;
            next = table.lock().await.redeem(&ticket);
        }
    });
}
