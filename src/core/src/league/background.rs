use crate::club::{ClubRegistry, StrengthContext};
use crate::league::{LeagueTable, Season, SeasonId, SeasonLifecycle};
use crate::utils::Logging;
use log::info;
use rand::Rng;

/// Leagues the user does not play in are not tracked round by round; their
/// whole season is simulated in one pass when a final table is needed.
pub struct BackgroundLeague;

impl BackgroundLeague {
    pub fn simulate<R: Rng + ?Sized>(
        season_id: SeasonId,
        league_id: u32,
        clubs: &ClubRegistry,
        rng: &mut R,
    ) -> LeagueTable {
        let ctx = StrengthContext::neutral();

        let table = Logging::estimate_result(
            || {
                let mut season = Season::generate(season_id, league_id, clubs, rng);
                SeasonLifecycle::play_remaining(&mut season, clubs, &ctx, rng);
                season.table
            },
            &format!("background league {} simulated", league_id),
        );

        if let Some(leader) = table.sorted().first() {
            info!("⚽ League {} {} winner: {}", league_id, season_id, leader.name);
        }

        table
    }
}
