//! Mines: reveal gems on a 5x5 grid without hitting a mine.
//!
//! After `k` safe reveals the multiplier is the product of reciprocal
//! survival probabilities,
//! `prod_{i=1..k} (cells - i + 1) / (safe - i + 1)` in basis points, which is
//! strictly increasing in `k`. Hitting a mine forfeits the bet; cashing out
//! locks in `bet * multiplier`. Revealing every safe cell resolves the round
//! automatically at the full multiplier.

use rand::Rng;

use greenfelt_types::{GameKind, MULTIPLIER_SCALE};

use super::{GameError, RoundSettlement, RoundState};

/// Grid side length.
pub const GRID_SIZE: u32 = 5;
/// Total cells on the grid.
pub const GRID_CELLS: u32 = GRID_SIZE * GRID_SIZE;
/// At least one mine, and at least one safe cell.
pub const MIN_MINES: u32 = 1;
pub const MAX_MINES: u32 = GRID_CELLS - 1;

/// Multiplier in basis points after `revealed` safe reveals against
/// `mine_count` mines.
pub fn multiplier_bps(revealed: u32, mine_count: u32) -> u64 {
    let safe = GRID_CELLS - mine_count;
    let mut acc = MULTIPLIER_SCALE as u128;
    for i in 1..=revealed.min(safe) {
        acc = acc * u128::from(GRID_CELLS - i + 1) / u128::from(safe - i + 1);
    }
    acc.min(u64::MAX as u128) as u64
}

/// Result of revealing one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealResult {
    Gem { multiplier_bps: u64 },
    Mine,
}

/// One mines round.
#[derive(Clone, Debug)]
pub struct MinesRound {
    bet: u64,
    mine_count: u32,
    mines: [bool; GRID_CELLS as usize],
    revealed: [bool; GRID_CELLS as usize],
    gems: u32,
    state: RoundState,
    settlement: Option<RoundSettlement>,
}

impl MinesRound {
    /// Seeds a fresh grid with `mine_count` mines in distinct random cells.
    pub fn new(bet: u64, mine_count: u32, rng: &mut impl Rng) -> Result<Self, GameError> {
        if !(MIN_MINES..=MAX_MINES).contains(&mine_count) {
            return Err(GameError::InvalidConfig);
        }

        let mut mines = [false; GRID_CELLS as usize];
        let mut placed = 0;
        while placed < mine_count {
            let cell = rng.gen_range(0..GRID_CELLS as usize);
            if !mines[cell] {
                mines[cell] = true;
                placed += 1;
            }
        }

        Ok(Self {
            bet,
            mine_count,
            mines,
            revealed: [false; GRID_CELLS as usize],
            gems: 0,
            state: RoundState::InProgress,
            settlement: None,
        })
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn gems_revealed(&self) -> u32 {
        self.gems
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    /// Current accumulated multiplier.
    pub fn multiplier_bps(&self) -> u64 {
        multiplier_bps(self.gems, self.mine_count)
    }

    pub fn is_revealed(&self, cell: usize) -> bool {
        self.revealed.get(cell).copied().unwrap_or(false)
    }

    /// Whether `cell` hides a mine. Only meaningful for post-round display.
    pub fn is_mine(&self, cell: usize) -> bool {
        self.mines.get(cell).copied().unwrap_or(false)
    }

    /// Reveal a cell. A mine resolves the round as a loss; revealing the last
    /// safe cell resolves it as a win at the full multiplier.
    pub fn reveal(&mut self, cell: usize) -> Result<RevealResult, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        if cell >= GRID_CELLS as usize || self.revealed[cell] {
            return Err(GameError::InvalidMove);
        }

        self.revealed[cell] = true;
        if self.mines[cell] {
            self.state = RoundState::Resolved;
            self.settlement = Some(RoundSettlement::loss(GameKind::Mines, self.bet));
            return Ok(RevealResult::Mine);
        }

        self.gems += 1;
        let multiplier = self.multiplier_bps();
        if self.gems == GRID_CELLS - self.mine_count {
            self.state = RoundState::Resolved;
            self.settlement = Some(RoundSettlement::win(GameKind::Mines, self.bet, multiplier));
        }
        Ok(RevealResult::Gem {
            multiplier_bps: multiplier,
        })
    }

    /// Lock in the current multiplier. Requires at least one revealed gem.
    pub fn cash_out(&mut self) -> Result<RoundSettlement, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        if self.gems == 0 {
            return Err(GameError::InvalidMove);
        }
        let settlement = RoundSettlement::win(GameKind::Mines, self.bet, self.multiplier_bps());
        self.state = RoundState::Resolved;
        self.settlement = Some(settlement.clone());
        Ok(settlement)
    }

    pub fn settlement(&self) -> Option<&RoundSettlement> {
        self.settlement.as_ref()
    }
}
