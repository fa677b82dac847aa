//! Process-wide table hosting.
//!
//! - [`Registry`]: Tables by id and invite code, and where each player sits
//! - [`Casino`]: Orchestration entry points over the registry
//! - [`dispatch`]: Deferred computer turns, one task per chain of tickets
//! - [`Casino::patrol`]: Recurring disconnect/timeout sweep and cleanup
mod casino;
mod dispatch;
mod registry;
mod sweeper;

pub use casino::*;
pub use dispatch::*;
pub use registry::*;

use crate::*;
