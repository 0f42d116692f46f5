//! Shared playing-card helpers.
//!
//! Cards are encoded as `0..=51`, where:
//! - suit = card / 13 (0..=3)
//! - rank = card % 13 (0..=12, 0 is Ace)
//!
//! Blackjack counts Ace as 11 first, dropping aces to 1 one at a time while
//! the hand would otherwise bust.

use rand::seq::SliceRandom;
use rand::Rng;

/// Total cards in a standard deck.
pub(crate) const CARDS_PER_DECK: u8 = 52;

/// Ranks per suit.
pub(crate) const RANKS_PER_SUIT: u8 = 13;

/// The target total.
pub(crate) const BLACKJACK: u32 = 21;

/// Returns the 0-based rank (0..=12), where 0 is Ace.
pub(crate) fn card_rank(card: u8) -> u8 {
    card % RANKS_PER_SUIT
}

pub(crate) fn is_ace(card: u8) -> bool {
    card_rank(card) == 0
}

/// Blackjack value with Ace high: Ace 11, faces 10, pips at face value.
pub(crate) fn card_value(card: u8) -> u32 {
    match card_rank(card) {
        0 => 11,
        r @ 1..=9 => u32::from(r) + 1,
        _ => 10,
    }
}

/// Hand total with aces devalued one at a time to avoid busting. The total
/// is never reported above 21 while an ace can still count as 1.
pub(crate) fn hand_value(cards: &[u8]) -> u32 {
    let mut total: u32 = cards.iter().map(|&c| card_value(c)).sum();
    let mut soft_aces = cards.iter().filter(|&&c| is_ace(c)).count();
    while total > BLACKJACK && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    total
}

/// Freshly shuffled 52-card deck; draw by popping from the back.
pub(crate) fn fresh_deck(rng: &mut impl Rng) -> Vec<u8> {
    let mut deck: Vec<u8> = (0..CARDS_PER_DECK).collect();
    deck.shuffle(rng);
    deck
}
