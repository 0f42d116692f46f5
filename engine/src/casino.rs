//! Casino facade: ties the account store, the code registry, and the
//! persistence port together.
//!
//! Opening a [`Casino`] reads the persisted blobs once and seeds the
//! administrator account and the launch promo code when missing. Every
//! mutating operation writes the affected blobs back before returning, so
//! the storage always mirrors the in-memory state. Callers run game rounds
//! themselves and hand the resulting [`RoundSettlement`] to [`Casino::settle`].

use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use greenfelt_types::{Achievement, BonusCode, User, UserPatch};

use crate::accounts::{AccountStore, AuthError, LedgerError};
use crate::codes::{CodeError, CodeRegistry};
use crate::games::RoundSettlement;
use crate::storage::{StoragePort, CODES_KEY, SESSION_KEY, USERS_KEY};

pub struct Casino<S: StoragePort> {
    storage: S,
    accounts: AccountStore,
    codes: CodeRegistry,
}

impl<S: StoragePort> Casino<S> {
    /// Loads persisted state and seeds the bootstrap records.
    pub fn open(storage: S, now_ms: u64) -> Self {
        let users: Vec<User> = load_json(&storage, USERS_KEY).unwrap_or_default();
        let codes: Vec<BonusCode> = load_json(&storage, CODES_KEY).unwrap_or_default();
        let session = load_json::<User, S>(&storage, SESSION_KEY).map(|u| u.id);

        let mut casino = Self {
            storage,
            accounts: AccountStore::from_roster(users, session),
            codes: CodeRegistry::from_codes(codes),
        };
        let seeded_admin = casino.accounts.ensure_admin(now_ms);
        let seeded_code = casino.codes.ensure_release_code(now_ms);
        if seeded_admin {
            casino.persist_users();
        }
        if seeded_code {
            casino.persist_codes();
        }
        casino
    }

    pub fn users(&self) -> &[User] {
        self.accounts.users()
    }

    pub fn codes(&self) -> &[BonusCode] {
        self.codes.codes()
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.accounts.find(user_id)
    }

    pub fn session_user(&self) -> Option<&User> {
        self.accounts.session_user()
    }

    /// Creates an account, redeeming the optional bonus code into the
    /// starting balance, and opens the session. The secret is accepted
    /// as-is; this is mock authentication.
    pub fn register(
        &mut self,
        username: &str,
        email: &str,
        _secret: &str,
        code: Option<&str>,
        now_ms: u64,
    ) -> Result<User, AuthError> {
        if self.accounts.email_taken(email) {
            return Err(AuthError::DuplicateEmail);
        }

        let id = Uuid::new_v4().to_string();
        let mut bonus = 0;
        if let Some(code) = code {
            bonus = self
                .codes
                .redeem(code, &id, now_ms)
                .map_err(|_| AuthError::InvalidCode)?;
        }

        let mut user = User::new(id, username.to_owned(), email.to_owned(), bonus, now_ms);
        user.redeemed_code = code.map(str::to_owned);
        let registered = self.accounts.register(user)?.clone();

        self.persist_users();
        self.persist_codes();
        self.persist_session();
        Ok(registered)
    }

    pub fn login(&mut self, email: &str, secret: &str, now_ms: u64) -> Result<User, AuthError> {
        let user = self.accounts.login(email, secret, now_ms)?.clone();
        self.persist_users();
        self.persist_session();
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.accounts.logout();
        self.persist_session();
    }

    /// Debits a wager at round start.
    pub fn stake(&mut self, user_id: &str, bet: u64) -> Result<(), LedgerError> {
        self.accounts.stake(user_id, bet)?;
        self.persist_users();
        self.persist_session();
        Ok(())
    }

    /// Applies one finished round to the ledger and reports any newly
    /// unlocked achievements.
    pub fn settle(
        &mut self,
        user_id: &str,
        settlement: RoundSettlement,
        now_ms: u64,
    ) -> Result<Vec<Achievement>, LedgerError> {
        let unlocked = self.accounts.apply_settlement(user_id, &settlement, now_ms)?;
        self.persist_users();
        self.persist_session();
        Ok(unlocked)
    }

    /// Redeems a bonus code from the profile: marks the code used and
    /// credits the bonus in one operation.
    pub fn redeem_code(
        &mut self,
        user_id: &str,
        code: &str,
        now_ms: u64,
    ) -> Result<u64, CodeError> {
        if self.accounts.find(user_id).is_none() {
            return Err(CodeError::UnknownRedeemer);
        }
        let bonus = self.codes.redeem(code, user_id, now_ms)?;
        // The user was just checked; these cannot miss.
        self.accounts
            .credit(user_id, bonus)
            .map_err(|_| CodeError::UnknownRedeemer)?;
        self.accounts
            .mark_redeemed(user_id, code)
            .map_err(|_| CodeError::UnknownRedeemer)?;

        self.persist_users();
        self.persist_codes();
        self.persist_session();
        Ok(bonus)
    }

    /// Registers a new bonus code. Returns false when the name is taken.
    pub fn create_code(
        &mut self,
        code: &str,
        created_by: &str,
        created_for: Option<&str>,
        balance: u64,
        now_ms: u64,
    ) -> bool {
        let created = self.codes.create(
            code.to_owned(),
            created_by.to_owned(),
            created_for.map(str::to_owned),
            balance,
            now_ms,
        );
        if created {
            self.persist_codes();
        }
        created
    }

    /// Gives a user a personal referral code: a registry entry reserved-free
    /// for others to redeem, credited to the user as its creator. Returns
    /// false when the code name is taken.
    pub fn assign_referral_code(
        &mut self,
        user_id: &str,
        code: &str,
        bonus: u64,
        now_ms: u64,
    ) -> Result<bool, LedgerError> {
        if self.accounts.find(user_id).is_none() {
            return Err(LedgerError::UserNotFound);
        }
        let created = self
            .codes
            .create(code.to_owned(), user_id.to_owned(), None, bonus, now_ms);
        if !created {
            return Ok(false);
        }
        self.accounts.set_referral_code(user_id, code)?;
        self.persist_users();
        self.persist_codes();
        self.persist_session();
        Ok(true)
    }

    /// Admin-panel field overwrite.
    pub fn admin_edit(&mut self, user_id: &str, patch: &UserPatch) -> Result<(), LedgerError> {
        self.accounts.admin_edit(user_id, patch)?;
        self.persist_users();
        self.persist_session();
        Ok(())
    }

    /// Removes a user; a no-op for the reserved administrator id.
    pub fn delete_user(&mut self, user_id: &str) -> bool {
        let deleted = self.accounts.delete_user(user_id);
        if deleted {
            self.persist_users();
            self.persist_session();
        }
        deleted
    }

    /// Hands the storage back, e.g. to reopen the casino in tests.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist_users(&mut self) {
        store_json(&mut self.storage, USERS_KEY, &self.accounts.users());
    }

    fn persist_codes(&mut self) {
        store_json(&mut self.storage, CODES_KEY, &self.codes.codes());
    }

    fn persist_session(&mut self) {
        match self.accounts.session_user() {
            Some(user) => {
                let snapshot = user.clone();
                store_json(&mut self.storage, SESSION_KEY, &snapshot);
            }
            None => self.storage.remove(SESSION_KEY),
        }
    }
}

/// Reads and decodes one blob. Corrupt blobs are dropped with a warning, the
/// same as an absent key.
fn load_json<T: DeserializeOwned, S: StoragePort>(storage: &S, key: &str) -> Option<T> {
    let blob = storage.load(key)?;
    match serde_json::from_str(&blob) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(%key, %err, "dropping corrupt persisted blob");
            None
        }
    }
}

fn store_json<T: serde::Serialize, S: StoragePort>(storage: &mut S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(blob) => storage.store(key, &blob),
        Err(err) => warn!(%key, %err, "failed to encode blob"),
    }
}
