//! Coin flip with a progressive multiplier ladder.
//!
//! Every flip is an independent fair draw. Each correct guess climbs one rung
//! of [`WIN_MULTIPLIERS_BPS`]; the player may cash out after any completed
//! rung to lock in `bet * ladder[wins - 1]`, and a single wrong guess
//! forfeits the entire accumulated value. A plain double-or-nothing flip is
//! rung one of the ladder (2x).

use rand::Rng;

use greenfelt_types::GameKind;

use super::{GameError, RoundSettlement, RoundState};

/// Payout ladder for consecutive correct guesses (index = wins - 1).
pub const WIN_MULTIPLIERS_BPS: [u64; 10] = [
    20_000, 40_000, 60_000, 80_000, 100_000, 200_000, 300_000, 400_000, 500_000, 1_000_000,
];

/// Ladder length; after ten straight wins the only move left is cashing out.
pub const MAX_WINS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Face {
    Heads,
    Tails,
}

/// Single fair draw (p = 0.5).
pub fn flip(rng: &mut impl Rng) -> Face {
    if rng.gen_bool(0.5) {
        Face::Heads
    } else {
        Face::Tails
    }
}

/// Outcome of one flip within a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipResult {
    pub drawn: Face,
    pub won: bool,
    /// Completed rungs after this flip.
    pub wins: u32,
}

/// One progressive coin-flip round.
#[derive(Clone, Debug)]
pub struct CoinflipRound {
    bet: u64,
    wins: u32,
    state: RoundState,
    settlement: Option<RoundSettlement>,
}

impl CoinflipRound {
    pub fn new(bet: u64) -> Self {
        Self {
            bet,
            wins: 0,
            state: RoundState::InProgress,
            settlement: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Multiplier locked in so far, if at least one rung is complete.
    pub fn current_multiplier_bps(&self) -> Option<u64> {
        if self.wins == 0 {
            return None;
        }
        let idx = (self.wins as usize - 1).min(WIN_MULTIPLIERS_BPS.len() - 1);
        Some(WIN_MULTIPLIERS_BPS[idx])
    }

    /// Multiplier the next correct guess would reach.
    pub fn next_multiplier_bps(&self) -> u64 {
        let idx = (self.wins as usize).min(WIN_MULTIPLIERS_BPS.len() - 1);
        WIN_MULTIPLIERS_BPS[idx]
    }

    /// Guess the next flip. A wrong guess resolves the round as a loss.
    pub fn guess(&mut self, guess: Face, rng: &mut impl Rng) -> Result<FlipResult, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        if self.wins >= MAX_WINS {
            // Ladder topped out; the player must cash out.
            return Err(GameError::InvalidMove);
        }

        let drawn = flip(rng);
        let won = drawn == guess;
        if won {
            self.wins += 1;
        } else {
            self.state = RoundState::Resolved;
            self.settlement = Some(RoundSettlement::loss(GameKind::Coinflip, self.bet));
        }
        Ok(FlipResult {
            drawn,
            won,
            wins: self.wins,
        })
    }

    /// Lock in the current rung's multiplier.
    pub fn cash_out(&mut self) -> Result<RoundSettlement, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        let multiplier = self.current_multiplier_bps().ok_or(GameError::InvalidMove)?;
        let settlement = RoundSettlement::win(GameKind::Coinflip, self.bet, multiplier);
        self.state = RoundState::Resolved;
        self.settlement = Some(settlement.clone());
        Ok(settlement)
    }

    pub fn settlement(&self) -> Option<&RoundSettlement> {
        self.settlement.as_ref()
    }
}
