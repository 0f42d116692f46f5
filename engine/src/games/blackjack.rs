//! Blackjack against a dealer standing on 17.
//!
//! The deal alternates player, dealer, player, dealer from a freshly shuffled
//! 52-card deck. Naturals settle immediately: a player natural pays 2.5x, a
//! dealer natural forfeits the bet, and two naturals push. Otherwise the
//! player hits or stands; on stand the dealer draws to 17 and the higher
//! total wins 2x. A push returns the stake, recorded as a 1x win.

use rand::Rng;

use greenfelt_types::GameKind;

use super::cards::{fresh_deck, hand_value, BLACKJACK};
use super::{GameError, RoundSettlement, RoundState};

/// Dealer draws while below this total.
pub const DEALER_STAND: u32 = 17;

/// Payout for a natural (ace and a ten on the deal).
pub const NATURAL_MULTIPLIER_BPS: u64 = 25_000;
/// Payout for beating the dealer.
pub const WIN_MULTIPLIER_BPS: u64 = 20_000;
/// A push returns the stake.
pub const PUSH_MULTIPLIER_BPS: u64 = 10_000;

/// One blackjack round.
#[derive(Clone, Debug)]
pub struct BlackjackRound {
    bet: u64,
    deck: Vec<u8>,
    player: Vec<u8>,
    dealer: Vec<u8>,
    state: RoundState,
    settlement: Option<RoundSettlement>,
}

impl BlackjackRound {
    pub fn new(bet: u64, rng: &mut impl Rng) -> Result<Self, GameError> {
        Self::from_deck(bet, fresh_deck(rng))
    }

    fn from_deck(bet: u64, deck: Vec<u8>) -> Result<Self, GameError> {
        let mut round = Self {
            bet,
            deck,
            player: Vec::with_capacity(8),
            dealer: Vec::with_capacity(8),
            state: RoundState::InProgress,
            settlement: None,
        };
        // Alternating deal.
        for _ in 0..2 {
            let card = round.draw()?;
            round.player.push(card);
            let card = round.draw()?;
            round.dealer.push(card);
        }
        round.settle_naturals();
        Ok(round)
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn player_hand(&self) -> &[u8] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[u8] {
        &self.dealer
    }

    pub fn player_total(&self) -> u32 {
        hand_value(&self.player)
    }

    pub fn dealer_total(&self) -> u32 {
        hand_value(&self.dealer)
    }

    /// Draw another card. Busting resolves the round as a loss.
    pub fn hit(&mut self) -> Result<u32, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        let card = self.draw()?;
        self.player.push(card);
        let total = self.player_total();
        if total > BLACKJACK {
            self.resolve_loss();
        }
        Ok(total)
    }

    /// Stop drawing; the dealer plays out and the round settles.
    pub fn stand(&mut self) -> Result<RoundSettlement, GameError> {
        if self.state == RoundState::Resolved {
            return Err(GameError::RoundComplete);
        }
        while self.dealer_total() < DEALER_STAND {
            let card = self.draw()?;
            self.dealer.push(card);
        }

        let player = self.player_total();
        let dealer = self.dealer_total();
        let settlement = if dealer > BLACKJACK || player > dealer {
            RoundSettlement::win(GameKind::BlackJack, self.bet, WIN_MULTIPLIER_BPS)
        } else if dealer > player {
            RoundSettlement::loss(GameKind::BlackJack, self.bet)
        } else {
            RoundSettlement::win(GameKind::BlackJack, self.bet, PUSH_MULTIPLIER_BPS)
        };
        self.state = RoundState::Resolved;
        self.settlement = Some(settlement.clone());
        Ok(settlement)
    }

    pub fn settlement(&self) -> Option<&RoundSettlement> {
        self.settlement.as_ref()
    }

    fn draw(&mut self) -> Result<u8, GameError> {
        self.deck.pop().ok_or(GameError::DeckExhausted)
    }

    fn settle_naturals(&mut self) {
        let player_natural = self.player.len() == 2 && self.player_total() == BLACKJACK;
        let dealer_natural = self.dealer.len() == 2 && self.dealer_total() == BLACKJACK;
        match (player_natural, dealer_natural) {
            (true, true) => self.resolve_win(PUSH_MULTIPLIER_BPS),
            (true, false) => self.resolve_win(NATURAL_MULTIPLIER_BPS),
            (false, true) => self.resolve_loss(),
            (false, false) => {}
        }
    }

    fn resolve_win(&mut self, multiplier_bps: u64) {
        self.state = RoundState::Resolved;
        self.settlement = Some(RoundSettlement::win(
            GameKind::BlackJack,
            self.bet,
            multiplier_bps,
        ));
    }

    fn resolve_loss(&mut self) {
        self.state = RoundState::Resolved;
        self.settlement = Some(RoundSettlement::loss(GameKind::BlackJack, self.bet));
    }
}
