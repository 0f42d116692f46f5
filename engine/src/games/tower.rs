//! Tower climb: pick the safe slot on each level.
//!
//! Every level offers three slots. The lower eight levels hide two safe
//! slots, the upper seven only one. A correct pick advances to the next
//! level's multiplier; a wrong pick forfeits the bet; cashing out locks in
//! the last completed level's multiplier. Completing level 15 resolves the
//! round at the top of the table.

use rand::seq::SliceRandom;
use rand::Rng;

use greenfelt_types::GameKind;

use super::{GameError, RoundSettlement, RoundState};

/// Slots per level.
pub const SLOTS_PER_LEVEL: usize = 3;

/// Per-level configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerLevel {
    /// Safe slots out of [`SLOTS_PER_LEVEL`].
    pub safe_slots: usize,
    /// Multiplier locked in by completing this level.
    pub multiplier_bps: u64,
}

const fn level(safe_slots: usize, multiplier_bps: u64) -> TowerLevel {
    TowerLevel {
        safe_slots,
        multiplier_bps,
    }
}

/// The climb, bottom to top.
pub const TOWER_LEVELS: [TowerLevel; 15] = [
    level(2, 15_000),
    level(2, 22_500),
    level(2, 33_800),
    level(2, 50_600),
    level(2, 75_900),
    level(2, 113_900),
    level(2, 170_900),
    level(2, 256_300),
    level(1, 384_400),
    level(1, 768_800),
    level(1, 1_537_600),
    level(1, 3_075_200),
    level(1, 6_150_400),
    level(1, 12_300_800),
    level(1, 24_601_600),
];

/// Result of one pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickResult {
    pub safe: bool,
    /// Levels completed after this pick.
    pub completed: u32,
}

/// One tower round.
#[derive(Clone, Debug)]
pub struct TowerRound {
    bet: u64,
    completed: u32,
    safe_mask: [bool; SLOTS_PER_LEVEL],
    state: RoundState,
    settlement: Option<RoundSettlement>,
}

impl TowerRound {
    pub fn new(bet: u64, rng: &mut impl Rng) -> Self {
        Self {
            bet,
            completed: 0,
            safe_mask: roll_safe_mask(TOWER_LEVELS[0].safe_slots, rng),
            state: RoundState::InProgress,
            settlement: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn levels_completed(&self) -> u32 {
        self.completed
    }

    /// Multiplier locked in so far, if at least one level is complete.
    pub fn current_multiplier_bps(&self) -> Option<u64> {
        if self.completed == 0 {
            return None;
        }
        Some(TOWER_LEVELS[self.completed as usize - 1].multiplier_bps)
    }

    /// Safe-slot layout of the level currently being played. Only meaningful
    /// for post-pick display.
    pub fn safe_mask(&self) -> [bool; SLOTS_PER_LEVEL] {
        self.safe_mask
    }

    /// Pick a slot on the current level. A wrong pick resolves the round as a
    /// loss; completing the top level resolves it as a win.
    pub fn pick(&mut self, slot: usize, rng: &mut impl Rng) -> Result<PickResult, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        if slot >= SLOTS_PER_LEVEL {
            return Err(GameError::InvalidMove);
        }

        if !self.safe_mask[slot] {
            self.state = RoundState::Resolved;
            self.settlement = Some(RoundSettlement::loss(GameKind::Tower, self.bet));
            return Ok(PickResult {
                safe: false,
                completed: self.completed,
            });
        }

        self.completed += 1;
        if self.completed as usize == TOWER_LEVELS.len() {
            let top = TOWER_LEVELS[TOWER_LEVELS.len() - 1].multiplier_bps;
            self.state = RoundState::Resolved;
            self.settlement = Some(RoundSettlement::win(GameKind::Tower, self.bet, top));
        } else {
            self.safe_mask = roll_safe_mask(TOWER_LEVELS[self.completed as usize].safe_slots, rng);
        }
        Ok(PickResult {
            safe: true,
            completed: self.completed,
        })
    }

    /// Lock in the last completed level's multiplier.
    pub fn cash_out(&mut self) -> Result<RoundSettlement, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        let multiplier = self.current_multiplier_bps().ok_or(GameError::InvalidMove)?;
        let settlement = RoundSettlement::win(GameKind::Tower, self.bet, multiplier);
        self.state = RoundState::Resolved;
        self.settlement = Some(settlement.clone());
        Ok(settlement)
    }

    pub fn settlement(&self) -> Option<&RoundSettlement> {
        self.settlement.as_ref()
    }
}

fn roll_safe_mask(safe_slots: usize, rng: &mut impl Rng) -> [bool; SLOTS_PER_LEVEL] {
    let mut slots = [0, 1, 2];
    slots.shuffle(rng);
    let mut mask = [false; SLOTS_PER_LEVEL];
    for &slot in &slots[..safe_slots] {
        mask[slot] = true;
    }
    mask
}
