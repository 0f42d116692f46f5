//! Achievement evaluator.
//!
//! Unlock conditions read the user's lifetime counters, so the evaluator is
//! re-runnable at any point: [`refresh`] appends whatever is newly earned and
//! never removes a badge. The admin badge is granted at bootstrap only and is
//! never derived here.

use tracing::info;

use greenfelt_types::{Achievement, User};

/// Lifetime winnings thresholds.
const BIG_WIN_WINNINGS: u64 = 100;
const MASSIVE_WINNINGS: u64 = 2_000;

/// Games-played thresholds.
const GETTING_SOMEWHERE_GAMES: u32 = 10;
const TRUE_GAMER_GAMES: u32 = 100;

/// Streak thresholds.
const HOT_POTATO_STREAK: u32 = 5;
const INFERNO_STREAK: u32 = 20;
const RIGGED_STREAK: u32 = 10;

/// Balance threshold.
const OVER_9000_BALANCE: u64 = 9_000;

fn earned(user: &User, achievement: Achievement) -> bool {
    match achievement {
        Achievement::FirstWin => user.total_winnings > 0,
        Achievement::GettingSomewhere => user.games_played >= GETTING_SOMEWHERE_GAMES,
        Achievement::HotPotato => user.max_win_streak >= HOT_POTATO_STREAK,
        Achievement::Inferno => user.max_win_streak >= INFERNO_STREAK,
        Achievement::BigWin => user.total_winnings >= BIG_WIN_WINNINGS,
        Achievement::Massive => user.total_winnings >= MASSIVE_WINNINGS,
        Achievement::TrueGamer => user.games_played >= TRUE_GAMER_GAMES,
        Achievement::Influence => user.referral_code.is_some(),
        Achievement::Over9000 => user.balance >= OVER_9000_BALANCE,
        Achievement::Rigged => user.max_loss_streak >= RIGGED_STREAK,
        // Bootstrap-only.
        Achievement::Admin => false,
    }
}

/// Every achievement the user's current stats qualify for.
pub fn qualified(user: &User) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|&a| earned(user, a))
        .collect()
}

/// Appends newly earned achievements to the user and returns them.
pub fn refresh(user: &mut User) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    for achievement in Achievement::ALL {
        if earned(user, achievement) && !user.has_achievement(achievement.id()) {
            info!(user = %user.id, achievement = achievement.id(), "achievement unlocked");
            user.achievements.push(achievement.id().to_owned());
            unlocked.push(achievement);
        }
    }
    unlocked
}
