//! Game settlement rules.
//!
//! Each game is a short-lived round state machine: construct it with the bet
//! (already debited via [`crate::Casino::stake`]), feed it moves, and read
//! the [`RoundSettlement`] once it resolves. Outcome math is pure; all
//! randomness comes from the caller-supplied [`rand::Rng`], so tests inject a
//! seeded generator.

pub mod blackjack;
mod cards;
pub mod coinflip;
pub mod mines;
pub mod slots;
pub mod tower;

use greenfelt_types::{GameKind, Outcome, MULTIPLIER_SCALE};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum GameError {
    #[error("round already resolved")]
    RoundComplete,
    #[error("move not valid in the current round state")]
    InvalidMove,
    #[error("game configuration out of range")]
    InvalidConfig,
    #[error("deck exhausted")]
    DeckExhausted,
}

/// Round lifecycle. Rounds start in progress (the stake is placed at
/// construction time) and resolve exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Resolved,
}

/// What one finished round did to the wallet.
///
/// `payout` is the gross amount credited back — the stake was already taken
/// at round start — so a 2x coin-flip win on a 100 bet carries
/// `payout = 200`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundSettlement {
    pub game: GameKind,
    pub bet: u64,
    pub outcome: Outcome,
    pub payout: u64,
    pub multiplier_bps: Option<u64>,
}

impl RoundSettlement {
    pub fn win(game: GameKind, bet: u64, multiplier_bps: u64) -> Self {
        Self {
            game,
            bet,
            outcome: Outcome::Win,
            payout: scale_bet(bet, multiplier_bps),
            multiplier_bps: Some(multiplier_bps),
        }
    }

    pub fn loss(game: GameKind, bet: u64) -> Self {
        Self {
            game,
            bet,
            outcome: Outcome::Loss,
            payout: 0,
            multiplier_bps: None,
        }
    }
}

/// Floor of `bet * multiplier`, widened so large ladder multipliers cannot
/// overflow.
pub(crate) fn scale_bet(bet: u64, multiplier_bps: u64) -> u64 {
    let scaled = bet as u128 * multiplier_bps as u128 / MULTIPLIER_SCALE as u128;
    scaled.min(u64::MAX as u128) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_bet_floors() {
        assert_eq!(scale_bet(100, 20_000), 200);
        assert_eq!(scale_bet(100, 25_000), 250);
        // 1.5x on an odd bet floors.
        assert_eq!(scale_bet(33, 15_000), 49);
        assert_eq!(scale_bet(0, 1_000_000), 0);
    }

    #[test]
    fn scale_bet_widens_before_multiplying() {
        // u64::MAX * 100x would overflow u64 but must not panic or wrap.
        let huge = scale_bet(u64::MAX, 1_000_000);
        assert_eq!(huge, u64::MAX);
    }

    #[test]
    fn settlement_constructors() {
        let win = RoundSettlement::win(GameKind::Tower, 40, 15_000);
        assert_eq!(win.outcome, Outcome::Win);
        assert_eq!(win.payout, 60);
        assert_eq!(win.multiplier_bps, Some(15_000));

        let loss = RoundSettlement::loss(GameKind::Tower, 40);
        assert_eq!(loss.outcome, Outcome::Loss);
        assert_eq!(loss.payout, 0);
        assert_eq!(loss.multiplier_bps, None);
    }
}
