use serde::{Deserialize, Serialize};

/// Promotional / referral code.
///
/// A code is redeemable exactly once, optionally only by a designated
/// account. Redemption stamps `used_by`/`used_at`; the credit to the
/// redeemer's balance happens in the same operation at the engine level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BonusCode {
    pub id: String,
    pub code: String,
    pub created_by: String,
    /// When set, only this user id may redeem the code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_for: Option<String>,
    /// Bonus credited on redemption.
    pub balance: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<u64>,
    pub is_active: bool,
    pub created_at: u64,
}

impl Default for BonusCode {
    fn default() -> Self {
        Self {
            id: String::new(),
            code: String::new(),
            created_by: String::new(),
            created_for: None,
            balance: 0,
            used_by: None,
            used_at: None,
            is_active: true,
            created_at: 0,
        }
    }
}

impl BonusCode {
    pub fn new(
        id: String,
        code: String,
        created_by: String,
        created_for: Option<String>,
        balance: u64,
        now_ms: u64,
    ) -> Self {
        Self {
            id,
            code,
            created_by,
            created_for,
            balance,
            created_at: now_ms,
            ..Self::default()
        }
    }

    /// True while the code can still be redeemed by someone.
    pub fn is_available(&self) -> bool {
        self.is_active && self.used_by.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_code_is_available() {
        let code = BonusCode::new(
            "c1".into(),
            "WELCOME".into(),
            "admin".into(),
            None,
            250,
            1,
        );
        assert!(code.is_available());
        assert_eq!(code.balance, 250);
    }

    #[test]
    fn used_or_inactive_code_is_unavailable() {
        let mut code = BonusCode::new("c1".into(), "X".into(), "admin".into(), None, 10, 1);
        code.used_by = Some("u1".into());
        assert!(!code.is_available());

        let mut code = BonusCode::new("c2".into(), "Y".into(), "admin".into(), None, 10, 1);
        code.is_active = false;
        assert!(!code.is_available());
    }

    #[test]
    fn blob_round_trips_with_camel_case_keys() {
        let code = BonusCode::new(
            "c3".into(),
            "VIP".into(),
            "admin".into(),
            Some("u7".into()),
            500,
            9,
        );
        let json = serde_json::to_string(&code).expect("encode");
        assert!(json.contains(r#""createdBy":"admin""#));
        assert!(json.contains(r#""createdFor":"u7""#));
        let decoded: BonusCode = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, code);
    }
}
