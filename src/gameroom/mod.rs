//! Lobby tables and the games they host.
//!
//! A table is synchronous: every method runs under the owning registry's
//! per-table lock and never awaits. Delays are handed back to the caller as
//! [`Ticket`]s, which the hosting layer sleeps on before calling back in.
//!
//! ## Architecture
//!
//! - [`Table`]: Lobby seats, invite code, password, and the running [`Game`](crate::gameplay::Game)
//! - [`Seat`]: Lobby-scoped participant with activity tracking
//! - [`Setup`]: Table creation parameters
//! - [`Play`]: A game action requested through the table
//! - [`Ticket`]: A deferred computer turn, validated again before it runs
//! - [`TimerConfig`]: Turn, grace, thinking, and retention durations
//!
//! ## Views
//!
//! - [`TableView`] / [`SeatView`]: Serializable snapshots for transports
mod play;
mod seat;
mod setup;
mod status;
mod sweep;
mod table;
mod ticket;
mod timer;
mod view;

pub use play::*;
pub use seat::*;
pub use setup::*;
pub use status::*;
pub use sweep::*;
pub use table::*;
pub use ticket::*;
pub use timer::*;
pub use view::*;

use crate::*;
