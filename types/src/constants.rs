/// Reserved id of the bootstrap administrator account. Deletion requests for
/// this id are ignored.
pub const ADMIN_USER_ID: &str = "admin";

/// Email the administrator account is registered under.
pub const ADMIN_EMAIL: &str = "admin@greenfelt.casino";

/// Display name of the administrator account.
pub const ADMIN_USERNAME: &str = "Admin";

/// The administrator secret is checked exactly; every other account accepts
/// any non-empty secret. Not a security mechanism, a lobby convenience.
pub const ADMIN_SECRET: &str = "admin123";

/// Balance the administrator account is synthesized with on first run.
pub const ADMIN_STARTING_BALANCE: u64 = 1_000_000;

/// Balance new accounts start with before any code bonus.
pub const STARTING_BALANCE: u64 = 0;

/// Always-available promotional code synthesized on first run.
pub const RELEASE_CODE: &str = "Release";
pub const RELEASE_CODE_ID: &str = "release-promo";
pub const RELEASE_CODE_BONUS: u64 = 100;

/// Maximum retained game-history entries per user (newest first).
pub const HISTORY_CAP: usize = 100;

/// Fixed-point scale for payout multipliers (basis points, 1.0x = 10_000).
pub const MULTIPLIER_SCALE: u64 = 10_000;
