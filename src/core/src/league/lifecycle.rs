use crate::club::{ClubRegistry, StrengthContext};
use crate::league::{Season, SeasonId, SeasonSummary};
use crate::r#match::{MatchOutcome, MatchSimulator, Venue};
use log::{debug, info, warn};
use rand::Rng;

/// Results of one domestic round.
#[derive(Debug, Clone, Default)]
pub struct RoundReport {
    pub round: usize,
    pub outcomes: Vec<MatchOutcome>,
}

impl RoundReport {
    pub fn outcome_for(&self, club_id: u32) -> Option<&MatchOutcome> {
        self.outcomes.iter().find(|o| o.involves(club_id))
    }
}

pub struct SeasonLifecycle;

impl SeasonLifecycle {
    /// Creates the season on first use, and replaces one whose league no
    /// longer matches the club's league.
    pub fn ensure_season<'s, R: Rng + ?Sized>(
        season: &'s mut Option<Season>,
        id: SeasonId,
        league_id: u32,
        clubs: &ClubRegistry,
        rng: &mut R,
    ) -> &'s mut Season {
        let stale = season
            .as_ref()
            .is_some_and(|s| s.id != id || s.league_id != league_id);

        if stale {
            warn!("season: stored season does not match {} / league {}, regenerating", id, league_id);
        }

        if season.is_none() || stale {
            info!("📅 Season {} scheduled for league {}", id, league_id);
        }

        if stale {
            *season = None;
        }

        season.get_or_insert_with(|| Season::generate(id, league_id, clubs, rng))
    }

    /// Plays the current round. Returns `None` once every round is played.
    pub fn play_round<R: Rng + ?Sized>(
        season: &mut Season,
        clubs: &ClubRegistry,
        ctx: &StrengthContext,
        rng: &mut R,
    ) -> Option<RoundReport> {
        if season.completed || season.is_finished() {
            return None;
        }

        let round = season.current_round;
        let match_ids = season.rounds[round].match_ids.clone();
        let mut report = RoundReport {
            round,
            outcomes: Vec::with_capacity(match_ids.len()),
        };

        for match_id in match_ids {
            let Some(league_match) = season.matches.get_mut(match_id) else {
                continue;
            };

            if league_match.played {
                continue;
            }

            let outcome = MatchSimulator::play(
                clubs,
                league_match.home_id,
                league_match.away_id,
                ctx,
                Venue::Home,
                rng,
            );

            league_match.record(&outcome);
            season.table.apply_result(
                outcome.home_id,
                outcome.away_id,
                outcome.score.home,
                outcome.score.away,
            );

            report.outcomes.push(outcome);
        }

        season.current_round += 1;

        debug!(
            "season {}: league {} round {}/{} played",
            season.id,
            season.league_id,
            season.current_round,
            season.total_rounds()
        );

        Some(report)
    }

    pub fn play_remaining<R: Rng + ?Sized>(
        season: &mut Season,
        clubs: &ClubRegistry,
        ctx: &StrengthContext,
        rng: &mut R,
    ) {
        while Self::play_round(season, clubs, ctx, rng).is_some() {}
    }

    /// Completes the season the first time every round has been played.
    /// Afterwards it returns `None` without touching the season.
    pub fn finalize_if_needed(season: &mut Season, user_club_id: Option<u32>) -> Option<SeasonSummary> {
        if season.completed || !season.is_finished() {
            return None;
        }

        let standings = season.table.sorted();
        let champion = standings.first();

        let user_row = user_club_id.and_then(|id| {
            standings
                .iter()
                .position(|r| r.club_id == id)
                .map(|index| (index + 1, standings[index].points))
        });

        let summary = SeasonSummary {
            champion_id: champion.map(|r| r.club_id),
            champion_name: champion.map(|r| r.name.clone()),
            user_position: user_row.map(|(position, _)| position),
            user_points: user_row.map(|(_, points)| points).unwrap_or(0),
            club_count: standings.len(),
        };

        season.completed = true;
        season.summary = Some(summary.clone());

        info!("🏆 Season {} ended for league {}", season.id, season.league_id);

        if let Some(name) = &summary.champion_name {
            info!("🥇 Champions: {}", name);
        }

        Some(summary)
    }
}
