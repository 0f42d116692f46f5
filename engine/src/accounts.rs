//! Account roster and session ledger.
//!
//! The store exclusively owns user records and the active session. Every
//! wager flows through [`AccountStore::stake`] and
//! [`AccountStore::apply_settlement`]; balances are u64 dollars, so the zero
//! floor holds by construction and debits are checked up front. Admin edits
//! bypass the settlement rules on purpose and never recompute derived
//! counters.

use tracing::info;
use uuid::Uuid;

use greenfelt_types::{
    Achievement, GameHistory, Outcome, User, UserPatch, ADMIN_EMAIL, ADMIN_SECRET,
    ADMIN_STARTING_BALANCE, ADMIN_USERNAME, ADMIN_USER_ID, HISTORY_CAP,
};
use thiserror::Error as ThisError;

use crate::achievements;
use crate::games::RoundSettlement;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum AuthError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid or already used code")]
    InvalidCode,
    #[error("account not found")]
    NotFound,
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum LedgerError {
    #[error("user not found")]
    UserNotFound,
    #[error("insufficient balance (needed={needed}, have={have})")]
    InsufficientBalance { needed: u64, have: u64 },
    #[error("bet must be positive")]
    InvalidBet,
}

/// Roster of users plus the single active session.
#[derive(Clone, Debug, Default)]
pub struct AccountStore {
    users: Vec<User>,
    session: Option<String>,
}

impl AccountStore {
    /// Rebuilds the store from persisted state. A session id that no longer
    /// resolves to a roster entry is dropped.
    pub fn from_roster(users: Vec<User>, session: Option<String>) -> Self {
        let session = session.filter(|id| users.iter().any(|u| &u.id == id));
        Self { users, session }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session.as_deref()
    }

    pub fn session_user(&self) -> Option<&User> {
        self.session.as_deref().and_then(|id| self.find(id))
    }

    /// Synthesizes the privileged account on first run. Returns whether
    /// anything changed.
    pub fn ensure_admin(&mut self, now_ms: u64) -> bool {
        if self.find(ADMIN_USER_ID).is_some() {
            return false;
        }
        info!(user = ADMIN_USER_ID, "seeding administrator account");
        let mut admin = User::new(
            ADMIN_USER_ID.to_owned(),
            ADMIN_USERNAME.to_owned(),
            ADMIN_EMAIL.to_owned(),
            ADMIN_STARTING_BALANCE,
            now_ms,
        );
        admin.is_admin = true;
        admin.achievements.push(Achievement::Admin.id().to_owned());
        self.users.push(admin);
        true
    }

    /// Adds a freshly built user to the roster and opens their session.
    pub fn register(&mut self, user: User) -> Result<&User, AuthError> {
        if self.email_taken(&user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        info!(user = %user.id, email = %user.email, "account registered");
        self.session = Some(user.id.clone());
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Mock credential check: the privileged account requires its exact
    /// secret, every other account accepts any non-empty secret.
    pub fn login(&mut self, email: &str, secret: &str, now_ms: u64) -> Result<&User, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::NotFound);
        }
        let user = self
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(AuthError::NotFound)?;
        if user.is_admin && secret != ADMIN_SECRET {
            return Err(AuthError::NotFound);
        }
        user.last_login = now_ms;
        let id = user.id.clone();
        info!(user = %id, "login");
        self.session = Some(id.clone());
        self.find(&id).ok_or(AuthError::NotFound)
    }

    /// Clears the session; the roster is untouched.
    pub fn logout(&mut self) {
        if let Some(id) = self.session.take() {
            info!(user = %id, "logout");
        }
    }

    /// Debits a wager up front. The settlement later credits any payout.
    pub fn stake(&mut self, user_id: &str, bet: u64) -> Result<(), LedgerError> {
        if bet == 0 {
            return Err(LedgerError::InvalidBet);
        }
        let user = self.find_mut(user_id)?;
        if user.balance < bet {
            return Err(LedgerError::InsufficientBalance {
                needed: bet,
                have: user.balance,
            });
        }
        user.balance -= bet;
        Ok(())
    }

    /// The single mutation path for game results: credits the payout,
    /// updates totals and streaks, prepends the history entry, and appends
    /// any newly earned achievements.
    pub fn apply_settlement(
        &mut self,
        user_id: &str,
        settlement: &RoundSettlement,
        now_ms: u64,
    ) -> Result<Vec<Achievement>, LedgerError> {
        let user = self.find_mut(user_id)?;

        user.game_history.insert(
            0,
            GameHistory {
                id: Uuid::new_v4().to_string(),
                game: settlement.game,
                bet: settlement.bet,
                result: settlement.outcome,
                win_amount: settlement.payout,
                multiplier_bps: settlement.multiplier_bps,
                timestamp: now_ms,
            },
        );
        user.game_history.truncate(HISTORY_CAP);
        user.games_played = user.games_played.saturating_add(1);

        match settlement.outcome {
            Outcome::Win => {
                user.balance = user.balance.saturating_add(settlement.payout);
                user.total_winnings = user.total_winnings.saturating_add(settlement.payout);
                user.win_streak = user.win_streak.saturating_add(1);
                user.loss_streak = 0;
                user.max_win_streak = user.max_win_streak.max(user.win_streak);
            }
            Outcome::Loss => {
                // The stake was already debited; only the counters move.
                user.total_losses = user.total_losses.saturating_add(settlement.bet);
                user.loss_streak = user.loss_streak.saturating_add(1);
                user.win_streak = 0;
                user.max_loss_streak = user.max_loss_streak.max(user.loss_streak);
            }
        }
        info!(
            user = %user.id,
            game = %settlement.game,
            outcome = ?settlement.outcome,
            payout = settlement.payout,
            balance = user.balance,
            "settlement applied"
        );
        Ok(achievements::refresh(user))
    }

    /// Credits a bonus outside the settlement path (code redemption).
    pub fn credit(&mut self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        let user = self.find_mut(user_id)?;
        user.balance = user.balance.saturating_add(amount);
        Ok(user.balance)
    }

    /// Stamps the code a user consumed from their profile.
    pub fn mark_redeemed(&mut self, user_id: &str, code: &str) -> Result<(), LedgerError> {
        let user = self.find_mut(user_id)?;
        user.redeemed_code = Some(code.to_owned());
        Ok(())
    }

    /// Hands a user their personal referral code and re-evaluates badges,
    /// since owning a code is itself an achievement.
    pub fn set_referral_code(
        &mut self,
        user_id: &str,
        code: &str,
    ) -> Result<Vec<Achievement>, LedgerError> {
        let user = self.find_mut(user_id)?;
        user.referral_code = Some(code.to_owned());
        Ok(achievements::refresh(user))
    }

    /// Direct admin-panel overwrite.
    pub fn admin_edit(&mut self, user_id: &str, patch: &UserPatch) -> Result<(), LedgerError> {
        let user = self.find_mut(user_id)?;
        patch.apply(user);
        info!(user = %user_id, "admin edit applied");
        Ok(())
    }

    /// Removes a user. A no-op for the reserved administrator id. Clears the
    /// session when the deleted user was active.
    pub fn delete_user(&mut self, user_id: &str) -> bool {
        if user_id == ADMIN_USER_ID {
            return false;
        }
        let before = self.users.len();
        self.users.retain(|u| u.id != user_id);
        if self.users.len() == before {
            return false;
        }
        if self.session.as_deref() == Some(user_id) {
            self.session = None;
        }
        info!(user = %user_id, "account deleted");
        true
    }

    fn find_mut(&mut self, user_id: &str) -> Result<&mut User, LedgerError> {
        self.users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(LedgerError::UserNotFound)
    }
}
