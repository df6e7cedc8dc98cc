use crate::club::ClubRegistry;
use crate::league::{LeagueTable, ScheduleGenerator};
use crate::r#match::{ExpectedGoals, MatchOutcome, MatchStats, Score};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeasonId {
    pub start_year: u16,
}

impl SeasonId {
    pub fn new(start_year: u16) -> Self {
        SeasonId { start_year }
    }

    pub fn next(&self) -> Self {
        SeasonId {
            start_year: self.start_year.saturating_add(1),
        }
    }
}

impl fmt::Display for SeasonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.start_year, (self.start_year + 1) % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonState {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueMatch {
    pub id: usize,
    pub round: usize,
    pub home_id: u32,
    pub away_id: u32,
    pub played: bool,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub expected: Option<ExpectedGoals>,
    #[serde(default)]
    pub stats: Option<MatchStats>,
}

impl LeagueMatch {
    /// Stores the outcome once; a played match never changes again.
    pub fn record(&mut self, outcome: &MatchOutcome) -> bool {
        if self.played {
            return false;
        }

        self.played = true;
        self.score = outcome.score;
        self.expected = Some(outcome.expected);
        self.stats = Some(outcome.stats);

        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRound {
    pub index: usize,
    pub match_ids: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
    pub champion_id: Option<u32>,
    pub champion_name: Option<String>,
    pub user_position: Option<usize>,
    pub user_points: u32,
    pub club_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub league_id: u32,
    pub rounds: Vec<SeasonRound>,
    pub matches: Vec<LeagueMatch>,
    pub table: LeagueTable,
    pub current_round: usize,
    pub completed: bool,
    #[serde(default)]
    pub summary: Option<SeasonSummary>,
}

impl Season {
    /// Schedules every club currently registered in `league_id`. The club
    /// order is shuffled first so the fixture list differs between seasons.
    pub fn generate<R: Rng + ?Sized>(
        id: SeasonId,
        league_id: u32,
        clubs: &ClubRegistry,
        rng: &mut R,
    ) -> Self {
        let mut club_ids = clubs.league_club_ids(league_id);
        club_ids.shuffle(rng);

        let mut rounds = Vec::new();
        let mut matches = Vec::new();

        for (index, fixtures) in ScheduleGenerator::double_round_robin(&club_ids)
            .into_iter()
            .enumerate()
        {
            let mut match_ids = Vec::with_capacity(fixtures.len());

            for fixture in fixtures {
                let match_id = matches.len();

                matches.push(LeagueMatch {
                    id: match_id,
                    round: index,
                    home_id: fixture.home,
                    away_id: fixture.away,
                    played: false,
                    score: Score::default(),
                    expected: None,
                    stats: None,
                });

                match_ids.push(match_id);
            }

            rounds.push(SeasonRound { index, match_ids });
        }

        let table = LeagueTable::new(
            clubs
                .in_league(league_id)
                .into_iter()
                .map(|club| (club.id, club.name.as_str())),
        );

        Season {
            id,
            league_id,
            rounds,
            matches,
            table,
            current_round: 0,
            completed: false,
            summary: None,
        }
    }

    pub fn state(&self) -> SeasonState {
        if self.completed {
            SeasonState::Completed
        } else if self.current_round == 0 {
            SeasonState::NotStarted
        } else {
            SeasonState::InProgress
        }
    }

    pub fn total_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current_round >= self.rounds.len()
    }

    pub fn club_ids(&self) -> Vec<u32> {
        self.table.rows.iter().map(|r| r.club_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;
    use crate::utils::RandomSource;

    #[test]
    fn season_key_uses_year_pair() {
        assert_eq!(SeasonId::new(2025).to_string(), "2025/26");
        assert_eq!(SeasonId::new(2099).to_string(), "2099/00");
        assert_eq!(SeasonId::new(2025).next(), SeasonId::new(2026));
    }

    #[test]
    fn generated_season_covers_league() {
        let clubs = ClubRegistry::new(
            (1..=6)
                .map(|id| Club::new(id, &format!("Club {}", id), "ENG", 10, 60.0))
                .chain(std::iter::once(Club::new(7, "Elsewhere", "ENG", 11, 60.0)))
                .collect(),
        );
        let mut rng = RandomSource::seeded(1);

        let season = Season::generate(SeasonId::new(2025), 10, &clubs, &mut rng);

        assert_eq!(season.total_rounds(), 10);
        assert_eq!(season.matches.len(), 30);
        assert_eq!(season.table.len(), 6);
        assert_eq!(season.state(), SeasonState::NotStarted);
        assert!(season.matches.iter().all(|m| m.home_id != 7 && m.away_id != 7));
    }
}
