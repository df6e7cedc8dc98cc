use crate::r#match::{ExpectedGoals, Score};
use crate::utils::IntegerUtils;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideStats {
    pub possession: u8,
    pub shots: u8,
    pub shots_on_target: u8,
    pub fouls: u8,
}

/// Display statistics derived after the score is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchStats {
    pub home: SideStats,
    pub away: SideStats,
}

impl MatchStats {
    pub fn derive<R: Rng + ?Sized>(expected: &ExpectedGoals, score: &Score, rng: &mut R) -> Self {
        let total = (expected.home + expected.away).max(f64::EPSILON);
        let share = (expected.home - expected.away) / total;
        let home_possession = (50.0 + share * 20.0).round().clamp(30.0, 70.0) as u8;

        MatchStats {
            home: Self::side(expected.home, score.home, home_possession, rng),
            away: Self::side(expected.away, score.away, 100 - home_possession, rng),
        }
    }

    fn side<R: Rng + ?Sized>(expected: f64, goals: u8, possession: u8, rng: &mut R) -> SideStats {
        let base_shots = (expected * 7.0).round() as i32 + IntegerUtils::random(rng, 1, 5);
        let shots = base_shots.max(goals as i32).clamp(0, 40) as u8;

        let on_target_floor = goals as i32;
        let on_target_ceiling = (shots as i32).max(on_target_floor);
        let shots_on_target =
            IntegerUtils::random(rng, on_target_floor, on_target_ceiling + 1) as u8;

        SideStats {
            possession,
            shots,
            shots_on_target,
            fouls: IntegerUtils::random(rng, 7, 17) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::RandomSource;

    #[test]
    fn stats_are_consistent_with_score() {
        let mut rng = RandomSource::seeded(11);
        let expected = ExpectedGoals {
            home: 2.4,
            away: 0.6,
        };

        for goals in 0..=7u8 {
            let score = Score::new(goals, 7 - goals);
            let stats = MatchStats::derive(&expected, &score, &mut rng);

            assert_eq!(stats.home.possession as u32 + stats.away.possession as u32, 100);
            assert!(stats.home.possession > stats.away.possession);
            assert!(stats.home.shots >= stats.home.shots_on_target);
            assert!(stats.home.shots_on_target >= score.home);
            assert!(stats.away.shots >= stats.away.shots_on_target);
            assert!(stats.away.shots_on_target >= score.away);
        }
    }
}
