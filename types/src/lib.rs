//! Greenfelt domain types.
//!
//! Defines the user/ledger/code/achievement state shared by the settlement
//! engine and any presentation layer. Everything here serializes to the JSON
//! blobs the engine mirrors through its storage port, so field names (via the
//! `camelCase` renames) and achievement id strings are part of the persisted
//! format.

mod achievements;
mod codes;
mod constants;
mod history;
mod user;

pub use achievements::*;
pub use codes::*;
pub use constants::*;
pub use history::*;
pub use user::*;
