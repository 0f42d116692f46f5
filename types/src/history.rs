use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for each wager game offered by the lobby.
///
/// The serialized form doubles as the display name shown in history views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Coinflip,
    Mines,
    Tower,
    BlackJack,
    Slots,
}

impl GameKind {
    pub const ALL: [GameKind; 5] = [
        GameKind::Coinflip,
        GameKind::Mines,
        GameKind::Tower,
        GameKind::BlackJack,
        GameKind::Slots,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Coinflip => "Coinflip",
            GameKind::Mines => "Mines",
            GameKind::Tower => "Tower",
            GameKind::BlackJack => "BlackJack",
            GameKind::Slots => "Slots",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one settled round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
}

/// Immutable record of one settled round.
///
/// Created once at settlement, prepended to the owning user's history, never
/// mutated afterwards. `win_amount` is the gross payout credited back; the
/// stake was already debited at round start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistory {
    pub id: String,
    pub game: GameKind,
    pub bet: u64,
    pub result: Outcome,
    pub win_amount: u64,
    /// Payout multiplier in basis points, when the game reports one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub multiplier_bps: Option<u64>,
    pub timestamp: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_entry_serializes_camel_case() {
        let entry = GameHistory {
            id: "e1".into(),
            game: GameKind::Coinflip,
            bet: 100,
            result: Outcome::Win,
            win_amount: 200,
            multiplier_bps: Some(20_000),
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_string(&entry).expect("encode");
        assert!(json.contains(r#""winAmount":200"#));
        assert!(json.contains(r#""result":"win""#));
        assert!(json.contains(r#""game":"Coinflip""#));

        let decoded: GameHistory = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, entry);
    }

    #[test]
    fn multiplier_is_omitted_when_absent() {
        let entry = GameHistory {
            id: "e2".into(),
            game: GameKind::Slots,
            bet: 50,
            result: Outcome::Loss,
            win_amount: 0,
            multiplier_bps: None,
            timestamp: 0,
        };

        let json = serde_json::to_string(&entry).expect("encode");
        assert!(!json.contains("multiplierBps"));
    }

    #[test]
    fn game_names_are_stable() {
        assert_eq!(GameKind::BlackJack.to_string(), "BlackJack");
        assert_eq!(GameKind::ALL.len(), 5);
    }
}
