//! Greenfelt settlement engine.
//!
//! This crate contains the account ledger, bonus-code registry, per-game
//! settlement rules, and the achievement evaluator behind the greenfelt
//! lobby. All state lives in memory and is mirrored to an injected
//! [`StoragePort`] as JSON after every mutation; reading happens once when a
//! [`Casino`] is opened.
//!
//! ## Ledger invariants
//! - Balances never go below zero; stakes are rejected, never overdrawn.
//! - Every game result flows through [`Casino::settle`]; nothing else mutates
//!   winnings, streaks, or history.
//! - Win and loss streaks are mutually exclusive and their maxima never
//!   decrease.
//! - A bonus code is consumed at most once; marking it used and crediting the
//!   redeemer happen in one operation.
//!
//! Rounds in progress (a coin-flip ladder, a half-revealed mine grid, an open
//! blackjack hand) are short-lived state machines owned by the caller. The
//! ledger only ever sees the resulting [`RoundSettlement`]:
//!
//! ```rust,ignore
//! use greenfelt_engine::{Casino, MemoryStorage};
//! use greenfelt_engine::games::coinflip::{CoinflipRound, Face};
//!
//! let mut casino = Casino::open(MemoryStorage::default(), now_ms);
//! let player = casino.register("Ada", "ada@example.com", "s3cret", None, now_ms)?;
//!
//! casino.stake(&player.id, 100)?;
//! let mut round = CoinflipRound::new(100);
//! round.guess(Face::Heads, &mut rand::thread_rng())?;
//! let settlement = round.cash_out()?;
//! casino.settle(&player.id, settlement, now_ms)?;
//! ```

pub mod accounts;
pub mod achievements;
pub mod casino;
pub mod codes;
pub mod games;
pub mod storage;

#[cfg(test)]
mod integration_tests;

pub use accounts::{AccountStore, AuthError, LedgerError};
pub use casino::Casino;
pub use codes::{CodeError, CodeRegistry};
pub use games::{GameError, RoundSettlement, RoundState};
pub use storage::{DirStorage, MemoryStorage, StoragePort};
