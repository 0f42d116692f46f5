//! Bonus code registry.
//!
//! Codes are single-use credits. The registry owns lookup and the used
//! stamp; crediting the redeemer happens at the casino level in the same
//! operation so a code can never pay out twice.

use tracing::info;
use uuid::Uuid;

use greenfelt_types::{
    BonusCode, ADMIN_USER_ID, RELEASE_CODE, RELEASE_CODE_BONUS, RELEASE_CODE_ID,
};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum CodeError {
    #[error("invalid code")]
    NotFound,
    #[error("code already used")]
    AlreadyUsed,
    #[error("code reserved for another account")]
    NotYours,
    #[error("redeeming account not found")]
    UnknownRedeemer,
}

/// All known bonus codes.
#[derive(Clone, Debug, Default)]
pub struct CodeRegistry {
    codes: Vec<BonusCode>,
}

impl CodeRegistry {
    pub fn from_codes(codes: Vec<BonusCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[BonusCode] {
        &self.codes
    }

    pub fn find(&self, code: &str) -> Option<&BonusCode> {
        self.codes.iter().find(|c| c.code == code)
    }

    /// Seeds the launch promo code if no code by that name exists yet.
    /// Returns whether anything changed.
    pub fn ensure_release_code(&mut self, now_ms: u64) -> bool {
        if self.find(RELEASE_CODE).is_some() {
            return false;
        }
        info!(code = RELEASE_CODE, "seeding launch promo code");
        self.codes.push(BonusCode {
            id: RELEASE_CODE_ID.to_owned(),
            code: RELEASE_CODE.to_owned(),
            created_by: ADMIN_USER_ID.to_owned(),
            balance: RELEASE_CODE_BONUS,
            created_at: now_ms,
            ..BonusCode::default()
        });
        true
    }

    /// Registers a new code. Returns false when the code name is taken.
    pub fn create(
        &mut self,
        code: String,
        created_by: String,
        created_for: Option<String>,
        balance: u64,
        now_ms: u64,
    ) -> bool {
        if self.find(&code).is_some() {
            return false;
        }
        info!(code = %code, balance, "bonus code created");
        self.codes.push(BonusCode::new(
            Uuid::new_v4().to_string(),
            code,
            created_by,
            created_for,
            balance,
            now_ms,
        ));
        true
    }

    /// Marks the code used by `user_id` and returns the bonus to credit.
    pub fn redeem(&mut self, code: &str, user_id: &str, now_ms: u64) -> Result<u64, CodeError> {
        let found = self
            .codes
            .iter_mut()
            .find(|c| c.code == code && c.is_active)
            .ok_or(CodeError::NotFound)?;
        if found.used_by.is_some() {
            return Err(CodeError::AlreadyUsed);
        }
        if let Some(created_for) = &found.created_for {
            if created_for != user_id {
                return Err(CodeError::NotYours);
            }
        }
        found.used_by = Some(user_id.to_owned());
        found.used_at = Some(now_ms);
        info!(code = %code, user = %user_id, bonus = found.balance, "bonus code redeemed");
        Ok(found.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_code_is_seeded_once() {
        let mut registry = CodeRegistry::default();
        assert!(registry.ensure_release_code(1));
        assert!(!registry.ensure_release_code(2));

        let release = registry.find(RELEASE_CODE).expect("seeded");
        assert_eq!(release.id, RELEASE_CODE_ID);
        assert_eq!(release.balance, RELEASE_CODE_BONUS);
        assert_eq!(release.created_at, 1);
    }

    #[test]
    fn duplicate_code_names_are_rejected() {
        let mut registry = CodeRegistry::default();
        assert!(registry.create("VIP".into(), "admin".into(), None, 50, 1));
        assert!(!registry.create("VIP".into(), "admin".into(), None, 999, 2));
        assert_eq!(registry.codes().len(), 1);
    }

    #[test]
    fn redeem_pays_once() {
        let mut registry = CodeRegistry::default();
        registry.ensure_release_code(1);

        assert_eq!(registry.redeem(RELEASE_CODE, "u1", 5), Ok(100));
        let release = registry.find(RELEASE_CODE).expect("code");
        assert_eq!(release.used_by.as_deref(), Some("u1"));
        assert_eq!(release.used_at, Some(5));

        assert_eq!(
            registry.redeem(RELEASE_CODE, "u2", 6),
            Err(CodeError::AlreadyUsed)
        );
    }

    #[test]
    fn unknown_or_inactive_codes_do_not_redeem() {
        let mut registry = CodeRegistry::default();
        assert_eq!(registry.redeem("NOPE", "u1", 1), Err(CodeError::NotFound));

        registry.create("PAUSED".into(), "admin".into(), None, 10, 1);
        if let Some(code) = registry.codes.iter_mut().find(|c| c.code == "PAUSED") {
            code.is_active = false;
        }
        assert_eq!(registry.redeem("PAUSED", "u1", 2), Err(CodeError::NotFound));
    }

    #[test]
    fn reserved_codes_check_the_redeemer() {
        let mut registry = CodeRegistry::default();
        registry.create("FORYOU".into(), "admin".into(), Some("u7".into()), 25, 1);

        assert_eq!(
            registry.redeem("FORYOU", "u1", 2),
            Err(CodeError::NotYours)
        );
        assert_eq!(registry.redeem("FORYOU", "u7", 3), Ok(25));
    }
}
