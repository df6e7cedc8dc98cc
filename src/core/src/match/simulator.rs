use crate::club::{ClubRegistry, ClubStrength, StrengthContext, StrengthModel};
use crate::r#match::{ExpectedGoals, MatchOutcome, MatchStats, Score};
use log::debug;
use rand::Rng;
use rand_distr::{Distribution, Poisson};

pub const HOME_ADVANTAGE: f64 = 3.0;
pub const BASE_EXPECTED_GOALS: f64 = 1.35;
/// Expected goals gained per point of strength difference.
pub const EXPECTED_GOALS_SLOPE: f64 = 0.045;
pub const MIN_EXPECTED_GOALS: f64 = 0.2;
pub const MAX_EXPECTED_GOALS: f64 = 3.6;
pub const MAX_GOALS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Neutral,
}

pub struct MatchSimulator;

impl MatchSimulator {
    pub fn play<R: Rng + ?Sized>(
        clubs: &ClubRegistry,
        home_id: u32,
        away_id: u32,
        ctx: &StrengthContext,
        venue: Venue,
        rng: &mut R,
    ) -> MatchOutcome {
        let home = StrengthModel::strength(clubs, home_id, ctx, rng);
        let away = StrengthModel::strength(clubs, away_id, ctx, rng);

        let expected = Self::expected_goals(&home, &away, venue);

        let score = Score::new(
            Self::draw_goals(expected.home, rng),
            Self::draw_goals(expected.away, rng),
        );

        let stats = MatchStats::derive(&expected, &score, rng);

        debug!(
            "match: {} - {} ended {} (xg {:.2} - {:.2})",
            home_id, away_id, score, expected.home, expected.away
        );

        MatchOutcome {
            home_id,
            away_id,
            score,
            expected,
            stats,
        }
    }

    /// Monotonic in the strength difference, clamped on both sides.
    pub fn expected_goals(home: &ClubStrength, away: &ClubStrength, venue: Venue) -> ExpectedGoals {
        let advantage = match venue {
            Venue::Home => HOME_ADVANTAGE,
            Venue::Neutral => 0.0,
        };

        let diff = home.value - away.value + advantage;

        let home_xg = Self::clamp_expected(BASE_EXPECTED_GOALS + diff * EXPECTED_GOALS_SLOPE);
        let away_xg = Self::clamp_expected(BASE_EXPECTED_GOALS - diff * EXPECTED_GOALS_SLOPE);

        ExpectedGoals {
            home: Self::clamp_expected(
                home_xg * home.modifiers.attack / away.modifiers.defense.max(f64::EPSILON),
            ),
            away: Self::clamp_expected(
                away_xg * away.modifiers.attack / home.modifiers.defense.max(f64::EPSILON),
            ),
        }
    }

    pub fn draw_goals<R: Rng + ?Sized>(expected: f64, rng: &mut R) -> u8 {
        match Poisson::new(expected.max(MIN_EXPECTED_GOALS)) {
            Ok(poisson) => {
                let goals: f64 = poisson.sample(rng);
                (goals.max(0.0) as u64).min(MAX_GOALS as u64) as u8
            }
            Err(_) => 0,
        }
    }

    fn clamp_expected(value: f64) -> f64 {
        value.clamp(MIN_EXPECTED_GOALS, MAX_EXPECTED_GOALS)
    }
}
