use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::{GameHistory, HISTORY_CAP};

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum UserInvariantError {
    #[error("history over cap (len={len}, max={max})")]
    HistoryOverCap { len: usize, max: usize },
    #[error("win and loss streak both non-zero (win={win}, loss={loss})")]
    StreakConflict { win: u32, loss: u32 },
}

/// One account in the roster.
///
/// Mutated only through the account store's operations; balances are whole
/// dollars and never go below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub balance: u64,
    pub total_winnings: u64,
    pub total_losses: u64,
    pub games_played: u32,
    pub achievements: Vec<String>,
    pub game_history: Vec<GameHistory>,
    pub win_streak: u32,
    pub max_win_streak: u32,
    pub loss_streak: u32,
    pub max_loss_streak: u32,
    /// Personal referral code owned by this user, when a dev assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    /// Code this user consumed, at registration or later from the profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed_code: Option<String>,
    pub is_admin: bool,
    pub created_at: u64,
    pub last_login: u64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::new(),
            email: String::new(),
            balance: 0,
            total_winnings: 0,
            total_losses: 0,
            games_played: 0,
            achievements: Vec::new(),
            game_history: Vec::new(),
            win_streak: 0,
            max_win_streak: 0,
            loss_streak: 0,
            max_loss_streak: 0,
            referral_code: None,
            redeemed_code: None,
            is_admin: false,
            created_at: 0,
            last_login: 0,
        }
    }
}

impl User {
    pub fn new(id: String, username: String, email: String, balance: u64, now_ms: u64) -> Self {
        Self {
            id,
            username,
            email,
            balance,
            created_at: now_ms,
            last_login: now_ms,
            ..Self::default()
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    pub fn validate_invariants(&self) -> Result<(), UserInvariantError> {
        if self.game_history.len() > HISTORY_CAP {
            return Err(UserInvariantError::HistoryOverCap {
                len: self.game_history.len(),
                max: HISTORY_CAP,
            });
        }
        if self.win_streak > 0 && self.loss_streak > 0 {
            return Err(UserInvariantError::StreakConflict {
                win: self.win_streak,
                loss: self.loss_streak,
            });
        }
        Ok(())
    }
}

/// Admin-panel field overwrite.
///
/// `None` leaves a field untouched. This path deliberately bypasses the
/// settlement rules and never recomputes derived counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub balance: Option<u64>,
    pub is_admin: Option<bool>,
}

impl UserPatch {
    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
    }
}
