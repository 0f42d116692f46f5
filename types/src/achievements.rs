use std::fmt;

/// Badges a user can earn.
///
/// The id strings are stored verbatim in the roster blob, so they must never
/// change for existing badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Achievement {
    FirstWin,
    GettingSomewhere,
    HotPotato,
    Inferno,
    BigWin,
    Massive,
    TrueGamer,
    Influence,
    Admin,
    Over9000,
    Rigged,
}

impl Achievement {
    pub const ALL: [Achievement; 11] = [
        Achievement::FirstWin,
        Achievement::GettingSomewhere,
        Achievement::HotPotato,
        Achievement::Inferno,
        Achievement::BigWin,
        Achievement::Massive,
        Achievement::TrueGamer,
        Achievement::Influence,
        Achievement::Admin,
        Achievement::Over9000,
        Achievement::Rigged,
    ];

    /// Persisted identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Achievement::FirstWin => "First Win",
            Achievement::GettingSomewhere => "Its Getting Somewhere",
            Achievement::HotPotato => "Hot Potato",
            Achievement::Inferno => "Inferno",
            Achievement::BigWin => "Big Win",
            Achievement::Massive => "Massive",
            Achievement::TrueGamer => "True Gamer",
            Achievement::Influence => "Influence",
            Achievement::Admin => "Admin",
            Achievement::Over9000 => "Its Over 9000",
            Achievement::Rigged => "THESE GAMES ARE RIGGED!",
        }
    }

    /// Short description for profile views.
    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstWin => "Win your first game",
            Achievement::GettingSomewhere => "Play 10 games",
            Achievement::HotPotato => "Win 5 games in a row without losing",
            Achievement::Inferno => "Win 20 games in a row without losing",
            Achievement::BigWin => "Earn total $100",
            Achievement::Massive => "Earn total $2,000",
            Achievement::TrueGamer => "Play 100 games total",
            Achievement::Influence => "Get your own referral code",
            Achievement::Admin => "Only on admin accounts",
            Achievement::Over9000 => "Get a balance of $9,000 at least once",
            Achievement::Rigged => "Lose 10 games in a row",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.id() == id)
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
