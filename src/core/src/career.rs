use crate::club::ClubRegistry;
use crate::league::{SeasonId, SeasonSummary};
use log::info;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPUTATION: u8 = 50;
const MAX_REPUTATION: i32 = 100;

const OBJECTIVE_MET_BONUS: i32 = 10;
const OBJECTIVE_MISSED_PENALTY: i32 = 5;
const PLACE_WEIGHT: i32 = 2;
const LEAGUE_TITLE_BONUS: i32 = 25;
const CONTINENTAL_TITLE_BONUS: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrophyKind {
    League,
    Continental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trophy {
    pub season: SeasonId,
    pub competition: String,
    pub kind: TrophyKind,
}

/// Board target for a season: finish at or above `target_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardObjective {
    pub season: SeasonId,
    pub league_id: u32,
    pub target_position: usize,
}

impl BoardObjective {
    /// Expected finish is the club's rating rank inside its league.
    pub fn for_club(season: SeasonId, clubs: &ClubRegistry, club_id: u32) -> Option<Self> {
        let club = clubs.get(club_id)?;

        let stronger = clubs
            .in_league(club.league_id)
            .into_iter()
            .filter(|other| other.id != club_id && other.rating > club.rating)
            .count();

        Some(BoardObjective {
            season,
            league_id: club.league_id,
            target_position: stronger + 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub season: SeasonId,
    pub league_id: u32,
    pub position: Option<usize>,
    pub points: u32,
    pub target_position: Option<usize>,
    pub champion_name: Option<String>,
    pub score_delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerRecord {
    #[serde(default)]
    pub score: i32,
    #[serde(default = "default_reputation")]
    pub reputation: u8,
    #[serde(default)]
    pub trophies: Vec<Trophy>,
    #[serde(default)]
    pub history: Vec<SeasonRecord>,
    #[serde(default)]
    pub objective: Option<BoardObjective>,
}

fn default_reputation() -> u8 {
    DEFAULT_REPUTATION
}

impl Default for CareerRecord {
    fn default() -> Self {
        CareerRecord {
            score: 0,
            reputation: DEFAULT_REPUTATION,
            trophies: Vec::new(),
            history: Vec::new(),
            objective: None,
        }
    }
}

impl CareerRecord {
    pub fn set_objective(&mut self, objective: Option<BoardObjective>) {
        if let Some(objective) = &objective {
            info!(
                "📋 Board objective {}: finish in the top {}",
                objective.season, objective.target_position
            );
        }

        self.objective = objective;
    }

    /// Books the user's domestic season once; a season already in the
    /// history is ignored and yields zero.
    pub fn record_season(
        &mut self,
        season: SeasonId,
        league_id: u32,
        user_club_id: u32,
        summary: &SeasonSummary,
        league_name: &str,
    ) -> i32 {
        if self.history.iter().any(|r| r.season == season) {
            return 0;
        }

        let target = self
            .objective
            .filter(|o| o.season == season)
            .map(|o| o.target_position);

        let mut delta = match (summary.user_position, target) {
            (Some(position), Some(target)) if position <= target => {
                OBJECTIVE_MET_BONUS + (target - position) as i32 * PLACE_WEIGHT
            }
            (Some(position), Some(target)) => {
                -OBJECTIVE_MISSED_PENALTY - (position - target) as i32 * PLACE_WEIGHT
            }
            _ => 0,
        };

        if summary.champion_id == Some(user_club_id) {
            delta += LEAGUE_TITLE_BONUS;
            self.trophies.push(Trophy {
                season,
                competition: league_name.to_string(),
                kind: TrophyKind::League,
            });

            info!("🏆 {} won for season {}", league_name, season);
        }

        self.apply_delta(delta);

        self.history.push(SeasonRecord {
            season,
            league_id,
            position: summary.user_position,
            points: summary.user_points,
            target_position: target,
            champion_name: summary.champion_name.clone(),
            score_delta: delta,
        });

        delta
    }

    pub fn award_continental(&mut self, season: SeasonId, tournament_name: &str) -> i32 {
        let duplicate = self
            .trophies
            .iter()
            .any(|t| t.season == season && t.kind == TrophyKind::Continental && t.competition == tournament_name);

        if duplicate {
            return 0;
        }

        self.trophies.push(Trophy {
            season,
            competition: tournament_name.to_string(),
            kind: TrophyKind::Continental,
        });

        self.apply_delta(CONTINENTAL_TITLE_BONUS);

        info!("🏆 {} won for season {}", tournament_name, season);

        CONTINENTAL_TITLE_BONUS
    }

    fn apply_delta(&mut self, delta: i32) {
        self.score += delta;

        let reputation = (self.reputation as i32 + delta / 5).clamp(0, MAX_REPUTATION);
        self.reputation = reputation as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;

    fn summary(position: usize, champion_id: u32) -> SeasonSummary {
        SeasonSummary {
            champion_id: Some(champion_id),
            champion_name: Some(format!("Club {}", champion_id)),
            user_position: Some(position),
            user_points: 50,
            club_count: 10,
        }
    }

    fn clubs() -> ClubRegistry {
        ClubRegistry::new(vec![
            Club::new(1, "Northfield", "ENG", 10, 72.0),
            Club::new(2, "Southport", "ENG", 10, 75.0),
            Club::new(3, "Eastmoor", "ENG", 10, 68.0),
            Club::new(4, "Westbay", "ENG", 20, 90.0),
        ])
    }

    #[test]
    fn objective_follows_rating_rank_in_league() {
        let season = SeasonId::new(2025);

        let objective = BoardObjective::for_club(season, &clubs(), 1).unwrap();

        assert_eq!(objective.target_position, 2);
        assert_eq!(objective.league_id, 10);
        assert!(BoardObjective::for_club(season, &clubs(), 99).is_none());
    }

    #[test]
    fn beating_objective_and_title_add_score_once() {
        let season = SeasonId::new(2025);
        let mut record = CareerRecord::default();
        record.set_objective(BoardObjective::for_club(season, &clubs(), 1));

        let delta = record.record_season(season, 10, 1, &summary(1, 1), "First Division");

        assert_eq!(delta, OBJECTIVE_MET_BONUS + PLACE_WEIGHT + LEAGUE_TITLE_BONUS);
        assert_eq!(record.score, delta);
        assert_eq!(record.trophies.len(), 1);
        assert_eq!(record.reputation, DEFAULT_REPUTATION + (delta / 5) as u8);

        assert_eq!(record.record_season(season, 10, 1, &summary(1, 1), "First Division"), 0);
        assert_eq!(record.history.len(), 1);
    }

    #[test]
    fn missing_objective_costs_score() {
        let season = SeasonId::new(2025);
        let mut record = CareerRecord::default();
        record.set_objective(BoardObjective::for_club(season, &clubs(), 1));

        let delta = record.record_season(season, 10, 1, &summary(5, 2), "First Division");

        assert_eq!(delta, -OBJECTIVE_MISSED_PENALTY - 3 * PLACE_WEIGHT);
        assert!(record.trophies.is_empty());
        assert_eq!(record.history[0].target_position, Some(2));
    }

    #[test]
    fn continental_title_is_awarded_once() {
        let season = SeasonId::new(2025);
        let mut record = CareerRecord::default();

        assert_eq!(record.award_continental(season, "Champions Cup"), CONTINENTAL_TITLE_BONUS);
        assert_eq!(record.award_continental(season, "Champions Cup"), 0);
        assert_eq!(record.trophies[0].kind, TrophyKind::Continental);
    }
}
