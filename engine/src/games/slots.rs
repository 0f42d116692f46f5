//! Three-reel slot machine.
//!
//! Each reel draws a symbol from [`SYMBOL_TABLE`] by weight. Three of a kind
//! pays the symbol's full multiplier; two of a kind pays 30% of it; mixed
//! reels forfeit the bet. A spin is a single atomic round, so [`play`]
//! returns the reels and the settlement together.

use rand::Rng;

use greenfelt_types::GameKind;

use super::RoundSettlement;

/// One symbol on the reel strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSymbol {
    pub name: &'static str,
    /// Three-of-a-kind multiplier.
    pub multiplier_bps: u64,
    /// Relative draw weight.
    pub weight: u32,
}

const fn symbol(name: &'static str, multiplier_bps: u64, weight: u32) -> SlotSymbol {
    SlotSymbol {
        name,
        multiplier_bps,
        weight,
    }
}

/// The reel strip. Every reel draws from the same table.
pub const SYMBOL_TABLE: [SlotSymbol; 8] = [
    symbol("Cherry", 20_000, 1),
    symbol("Lemon", 30_000, 1),
    symbol("Orange", 40_000, 1),
    symbol("Grape", 50_000, 1),
    symbol("Star", 100_000, 1),
    symbol("Diamond", 200_000, 1),
    symbol("Seven", 500_000, 1),
    symbol("Bell", 250_000, 1),
];

/// Pair payout as a fraction of the symbol's full multiplier (30%).
const PAIR_NUMERATOR: u64 = 3;
const PAIR_DENOMINATOR: u64 = 10;

fn total_weight() -> u32 {
    SYMBOL_TABLE.iter().map(|s| s.weight).sum()
}

fn draw_symbol(rng: &mut impl Rng) -> usize {
    let mut roll = rng.gen_range(0..total_weight());
    for (idx, symbol) in SYMBOL_TABLE.iter().enumerate() {
        if roll < symbol.weight {
            return idx;
        }
        roll -= symbol.weight;
    }
    SYMBOL_TABLE.len() - 1
}

/// Spin all three reels.
pub fn spin(rng: &mut impl Rng) -> [usize; 3] {
    [draw_symbol(rng), draw_symbol(rng), draw_symbol(rng)]
}

/// Multiplier for a reel line, zero when the line pays nothing.
pub fn line_multiplier_bps(reels: [usize; 3]) -> u64 {
    let [a, b, c] = reels;
    if a == b && b == c {
        return SYMBOL_TABLE[a].multiplier_bps;
    }
    let pair = if a == b {
        Some(a)
    } else if b == c {
        Some(b)
    } else if a == c {
        Some(a)
    } else {
        None
    };
    match pair {
        Some(idx) => SYMBOL_TABLE[idx].multiplier_bps * PAIR_NUMERATOR / PAIR_DENOMINATOR,
        None => 0,
    }
}

/// Spin once and settle the bet.
pub fn play(bet: u64, rng: &mut impl Rng) -> ([usize; 3], RoundSettlement) {
    let reels = spin(rng);
    let multiplier = line_multiplier_bps(reels);
    let settlement = if multiplier > 0 {
        RoundSettlement::win(GameKind::Slots, bet, multiplier)
    } else {
        RoundSettlement::loss(GameKind::Slots, bet)
    };
    (reels, settlement)
}
