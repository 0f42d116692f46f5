//! End-to-end flows through the casino facade: rounds played against a real
//! store, persistence across reopen, and the ledger properties that must
//! hold over any sequence of settlements.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use greenfelt_types::{
    Achievement, GameKind, Outcome, UserPatch, ADMIN_EMAIL, ADMIN_SECRET, ADMIN_USER_ID,
    HISTORY_CAP, RELEASE_CODE, RELEASE_CODE_BONUS,
};

use crate::games::coinflip::{flip, CoinflipRound, Face};
use crate::games::mines::MinesRound;
use crate::games::tower::TowerRound;
use crate::games::RoundSettlement;
use crate::storage::{DirStorage, MemoryStorage, SESSION_KEY, USERS_KEY};
use crate::{Casino, GameError, LedgerError, StoragePort};

fn fresh_casino() -> Casino<MemoryStorage> {
    Casino::open(MemoryStorage::default(), 0)
}

fn register_player(casino: &mut Casino<MemoryStorage>, name: &str) -> String {
    let user = casino
        .register(name, &format!("{name}@example.com"), "pw", None, 0)
        .expect("register");
    user.id
}

fn fund(casino: &mut Casino<MemoryStorage>, user_id: &str, balance: u64) {
    casino
        .admin_edit(
            user_id,
            &UserPatch {
                balance: Some(balance),
                ..UserPatch::default()
            },
        )
        .expect("fund");
}

/// Peeks at what the next flip will draw so tests can force the outcome.
fn next_draw(rng: &ChaCha8Rng) -> Face {
    flip(&mut rng.clone())
}

#[test]
fn coinflip_round_trip_nets_the_bet() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "ada");
    fund(&mut casino, &id, 1_000);

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    casino.stake(&id, 100).expect("stake");
    let mut round = CoinflipRound::new(100);
    let result = round.guess(next_draw(&rng), &mut rng).expect("flip");
    assert!(result.won);
    let settlement = round.cash_out().expect("cash out");
    let unlocked = casino.settle(&id, settlement, 1).expect("settle");

    let user = casino.user(&id).expect("user");
    assert_eq!(user.balance, 1_100);
    assert_eq!(user.total_winnings, 200);
    assert_eq!(user.games_played, 1);
    assert!(unlocked.contains(&Achievement::FirstWin));
    assert!(unlocked.contains(&Achievement::BigWin));
}

#[test]
fn mines_loss_only_costs_the_stake() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "li");
    fund(&mut casino, &id, 500);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    casino.stake(&id, 200).expect("stake");
    let mut round = MinesRound::new(200, 3, &mut rng).expect("round");
    let mine = (0..25).find(|&c| round.is_mine(c)).expect("a mine");
    round.reveal(mine).expect("reveal");
    let settlement = round.settlement().expect("resolved").clone();
    assert_eq!(settlement.outcome, Outcome::Loss);
    casino.settle(&id, settlement, 1).expect("settle");

    let user = casino.user(&id).expect("user");
    assert_eq!(user.balance, 300);
    assert_eq!(user.total_losses, 200);
    assert_eq!(user.loss_streak, 1);
}

#[test]
fn balance_never_goes_negative() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "bo");
    fund(&mut casino, &id, 50);

    // Wagering the whole balance and losing leaves exactly zero.
    casino.stake(&id, 50).expect("stake");
    casino
        .settle(&id, RoundSettlement::loss(GameKind::Slots, 50), 1)
        .expect("settle");
    assert_eq!(casino.user(&id).expect("user").balance, 0);

    // Broke players cannot wager at all.
    assert_eq!(
        casino.stake(&id, 1),
        Err(LedgerError::InsufficientBalance { needed: 1, have: 0 })
    );
}

#[test]
fn long_session_respects_history_and_streak_properties() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "vi");
    fund(&mut casino, &id, 1_000_000);

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut max_win = 0;
    let mut max_loss = 0;
    for ts in 0..150u64 {
        casino.stake(&id, 10).expect("stake");
        let mut round = CoinflipRound::new(10);
        let result = round.guess(Face::Heads, &mut rng).expect("flip");
        let settlement = if result.won {
            round.cash_out().expect("cash out")
        } else {
            round.settlement().expect("resolved").clone()
        };
        casino.settle(&id, settlement, ts).expect("settle");

        let user = casino.user(&id).expect("user");
        assert!(user.game_history.len() <= HISTORY_CAP);
        assert_eq!(user.game_history[0].timestamp, ts);
        assert!(user.win_streak == 0 || user.loss_streak == 0);
        assert!(user.max_win_streak >= max_win);
        assert!(user.max_loss_streak >= max_loss);
        max_win = user.max_win_streak;
        max_loss = user.max_loss_streak;
    }
    let user = casino.user(&id).expect("user");
    assert_eq!(user.game_history.len(), HISTORY_CAP);
    assert_eq!(user.games_played, 150);
    assert!(user.has_achievement("True Gamer"));
}

#[test]
fn release_code_registration_scenario() {
    let mut casino = fresh_casino();
    let first = casino
        .register("first", "first@example.com", "pw", Some(RELEASE_CODE), 1)
        .expect("register");
    assert_eq!(first.balance, RELEASE_CODE_BONUS);

    // The next registrant finds the code spent.
    assert!(casino
        .register("second", "second@example.com", "pw", Some(RELEASE_CODE), 2)
        .is_err());
}

#[test]
fn deleting_the_admin_changes_nothing() {
    let mut casino = fresh_casino();
    casino
        .login(ADMIN_EMAIL, ADMIN_SECRET, 1)
        .expect("admin login");
    let roster_before = casino.users().len();

    assert!(!casino.delete_user(ADMIN_USER_ID));
    assert_eq!(casino.users().len(), roster_before);
    assert_eq!(
        casino.session_user().expect("session intact").id,
        ADMIN_USER_ID
    );
}

#[test]
fn tower_cash_out_flows_through_the_ledger() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "kit");
    fund(&mut casino, &id, 400);

    let mut rng = ChaCha8Rng::seed_from_u64(12);
    casino.stake(&id, 400).expect("stake");
    let mut round = TowerRound::new(400, &mut rng);
    let slot = round
        .safe_mask()
        .iter()
        .position(|&safe| safe)
        .expect("safe slot");
    round.pick(slot, &mut rng).expect("pick");
    let settlement = round.cash_out().expect("cash out");
    casino.settle(&id, settlement, 1).expect("settle");

    // Level one pays 1.5x: 400 staked, 600 back.
    assert_eq!(casino.user(&id).expect("user").balance, 600);
}

#[test]
fn abandoned_round_forfeits_the_stake() {
    let mut casino = fresh_casino();
    let id = register_player(&mut casino, "max");
    fund(&mut casino, &id, 100);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    casino.stake(&id, 100).expect("stake");
    let mut round = MinesRound::new(100, 3, &mut rng).expect("round");
    let gem = (0..25).find(|&c| !round.is_mine(c)).expect("gem");
    round.reveal(gem).expect("reveal");
    // The caller walks away without settling; the debit stands.
    drop(round);
    assert_eq!(casino.user(&id).expect("user").balance, 0);
}

#[test]
fn state_survives_a_restart_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let id;
    {
        let storage = DirStorage::open(dir.path()).expect("open dir");
        let mut casino = Casino::open(storage, 1);
        let user = casino
            .register("ada", "ada@example.com", "pw", Some(RELEASE_CODE), 2)
            .expect("register");
        id = user.id;
        casino
            .admin_edit(
                &id,
                &UserPatch {
                    balance: Some(777),
                    ..UserPatch::default()
                },
            )
            .expect("edit");
    }

    let storage = DirStorage::open(dir.path()).expect("reopen dir");
    let casino = Casino::open(storage, 3);
    let user = casino.user(&id).expect("user survived");
    assert_eq!(user.balance, 777);
    assert_eq!(user.redeemed_code.as_deref(), Some(RELEASE_CODE));
    // Session snapshot was restored too.
    assert_eq!(casino.session_user().expect("session").id, id);
    // The release code is still marked used.
    let release = casino
        .codes()
        .iter()
        .find(|c| c.code == RELEASE_CODE)
        .expect("code");
    assert_eq!(release.used_by.as_deref(), Some(id.as_str()));
}

#[test]
fn logout_removes_the_session_blob() {
    let mut casino = fresh_casino();
    register_player(&mut casino, "ada");
    casino.logout();

    let storage = casino.into_storage();
    assert_eq!(storage.load(SESSION_KEY), None);
    assert!(storage.load(USERS_KEY).is_some());
}

#[test]
fn resolved_rounds_reject_further_moves() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut round = CoinflipRound::new(10);
    // Force a loss by guessing the opposite of the upcoming draw.
    let wrong = match next_draw(&rng) {
        Face::Heads => Face::Tails,
        Face::Tails => Face::Heads,
    };
    let result = round.guess(wrong, &mut rng).expect("flip");
    assert!(!result.won);
    assert_eq!(round.guess(Face::Heads, &mut rng), Err(GameError::RoundComplete));
    assert_eq!(round.cash_out(), Err(GameError::RoundComplete));
}
