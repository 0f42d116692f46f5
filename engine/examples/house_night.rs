//! A short evening at the tables: registers a player with the launch promo
//! code, plays a round of each game, and prints the resulting ledger.
//!
//! Run with `cargo run --example house_night`.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use rand::Rng;

use greenfelt_engine::games::blackjack::BlackjackRound;
use greenfelt_engine::games::coinflip::{CoinflipRound, Face};
use greenfelt_engine::games::mines::MinesRound;
use greenfelt_engine::games::slots;
use greenfelt_engine::games::tower::TowerRound;
use greenfelt_engine::{Casino, MemoryStorage, RoundState};
use greenfelt_types::{UserPatch, RELEASE_CODE};

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let mut rng = rand::thread_rng();
    let mut casino = Casino::open(MemoryStorage::default(), now_ms());

    let player = casino
        .register("ada", "ada@example.com", "s3cret", Some(RELEASE_CODE), now_ms())
        .context("registering the player")?;
    println!("registered {} with ${}", player.username, player.balance);

    // Top the wallet up so every game gets a turn.
    casino.admin_edit(
        &player.id,
        &UserPatch {
            balance: Some(1_000),
            ..UserPatch::default()
        },
    )?;

    // Coin flip: one guess, cash out if it lands.
    casino.stake(&player.id, 100)?;
    let mut round = CoinflipRound::new(100);
    let guess = if rng.gen_bool(0.5) { Face::Heads } else { Face::Tails };
    let result = round.guess(guess, &mut rng)?;
    let settlement = if result.won {
        round.cash_out()?
    } else {
        round.settlement().context("resolved round")?.clone()
    };
    casino.settle(&player.id, settlement, now_ms())?;

    // Mines: reveal three cells, cash out if still standing.
    casino.stake(&player.id, 100)?;
    let mut round = MinesRound::new(100, 3, &mut rng)?;
    for cell in 0..3 {
        if round.state() == RoundState::Resolved {
            break;
        }
        round.reveal(cell)?;
    }
    let settlement = match round.state() {
        RoundState::InProgress => round.cash_out()?,
        RoundState::Resolved => round.settlement().context("resolved round")?.clone(),
    };
    casino.settle(&player.id, settlement, now_ms())?;

    // Tower: climb two levels, then take the money.
    casino.stake(&player.id, 100)?;
    let mut round = TowerRound::new(100, &mut rng);
    for _ in 0..2 {
        if round.state() == RoundState::Resolved {
            break;
        }
        let slot = rng.gen_range(0..3);
        round.pick(slot, &mut rng)?;
    }
    let settlement = match round.state() {
        // A pick either advances or resolves, so an open round has at
        // least one completed level to cash out.
        RoundState::InProgress => round.cash_out()?,
        RoundState::Resolved => round.settlement().context("resolved round")?.clone(),
    };
    casino.settle(&player.id, settlement, now_ms())?;

    // Blackjack: hit below 17, then stand.
    casino.stake(&player.id, 100)?;
    let mut round = BlackjackRound::new(100, &mut rng)?;
    while round.state() == RoundState::InProgress && round.player_total() < 17 {
        round.hit()?;
    }
    let settlement = match round.state() {
        RoundState::InProgress => round.stand()?,
        RoundState::Resolved => round.settlement().context("resolved round")?.clone(),
    };
    println!(
        "blackjack: player {} vs dealer {}",
        round.player_total(),
        round.dealer_total()
    );
    casino.settle(&player.id, settlement, now_ms())?;

    // Slots: one pull.
    casino.stake(&player.id, 100)?;
    let (reels, settlement) = slots::play(100, &mut rng);
    println!(
        "slots: [{} | {} | {}]",
        slots::SYMBOL_TABLE[reels[0]].name,
        slots::SYMBOL_TABLE[reels[1]].name,
        slots::SYMBOL_TABLE[reels[2]].name,
    );
    casino.settle(&player.id, settlement, now_ms())?;

    print_ledger(&casino, &player.id);
    Ok(())
}

fn print_ledger(casino: &Casino<MemoryStorage>, user_id: &str) {
    if let Some(user) = casino.user(user_id) {
        println!();
        println!("=== {} ===", user.username);
        println!("balance:        ${}", user.balance);
        println!("games played:   {}", user.games_played);
        println!("total winnings: ${}", user.total_winnings);
        println!("total losses:   ${}", user.total_losses);
        println!("achievements:   {}", user.achievements.join(", "));
        for entry in user.game_history.iter().take(5) {
            println!(
                "  {} bet ${} -> {:?} (${})",
                entry.game, entry.bet, entry.result, entry.win_amount
            );
        }
    }
}
