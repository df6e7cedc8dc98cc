use crate::r#match::MatchStats;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Score { home, away }
    }

    pub fn is_draw(&self) -> bool {
        self.home == self.away
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.home, self.away)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub home_id: u32,
    pub away_id: u32,
    pub score: Score,
    pub expected: ExpectedGoals,
    pub stats: MatchStats,
}

impl MatchOutcome {
    /// `None` on a draw.
    pub fn winner(&self) -> Option<u32> {
        if self.score.home > self.score.away {
            Some(self.home_id)
        } else if self.score.away > self.score.home {
            Some(self.away_id)
        } else {
            None
        }
    }

    pub fn goals_for(&self, club_id: u32) -> u8 {
        if club_id == self.home_id {
            self.score.home
        } else if club_id == self.away_id {
            self.score.away
        } else {
            0
        }
    }

    pub fn involves(&self, club_id: u32) -> bool {
        self.home_id == club_id || self.away_id == club_id
    }
}
