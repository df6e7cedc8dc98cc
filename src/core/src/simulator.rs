use crate::career::BoardObjective;
use crate::club::{CashLedger, ClubFinances, LedgerKind, StrengthContext, World};
use crate::context::CareerContext;
use crate::continent::{
    ContinentalProgression, MatchdaySummary, QualificationAllocator, TournamentContext,
};
use crate::league::{
    BackgroundLeague, PromotionRelegation, RoundReport, SeasonLifecycle,
};
use crate::save::{CareerSave, SaveError};
use crate::shared::Money;
use crate::transfers::{
    OfferStatus, TransferError, TransferPipeline, TransferRoundReport, TransferState,
};
use crate::utils::Logging;
use log::{debug, info, warn};
use thiserror::Error;

const FORM_SHIFT_WIN: f32 = 0.6;
const FORM_SHIFT_LOSS: f32 = -0.6;

#[derive(Debug, Error)]
pub enum CareerError {
    #[error("club {0} is not in the club catalog")]
    UnknownClub(u32),
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Operations the presentation layer drives a career with. Every operation
/// mutates the save in place; the caller persists the whole document after.
pub struct CareerSimulator;

impl CareerSimulator {
    pub fn new_career(user_club_id: u32, ctx: &mut CareerContext<'_>) -> Result<CareerSave, CareerError> {
        let rules = ctx.rules();
        let world = World::from_reference(ctx.reference);

        let club_name = world
            .clubs
            .get(user_club_id)
            .map(|c| c.name.clone())
            .ok_or(CareerError::UnknownClub(user_club_id))?;

        let mut save = CareerSave::new(
            user_club_id,
            rules.start_year,
            world,
            ClubFinances::new(rules.starting_cash, rules.currency()),
            TransferState::new(rules.history_limit),
        );

        info!("🆕 New career with {} from {}", club_name, rules.start_year);

        Self::ensure_season_state(&mut save, ctx);

        Ok(save)
    }

    /// Reads a save of any known version, merges the club catalog into its
    /// world once and repairs missing season state.
    pub fn load(json: &str, ctx: &mut CareerContext<'_>) -> Result<CareerSave, CareerError> {
        let mut save = CareerSave::from_json(json, ctx.rules())?;

        save.world = std::mem::take(&mut save.world).merged_with(ctx.reference);

        if save.world.clubs.get(save.user_club_id).is_none() {
            return Err(CareerError::UnknownClub(save.user_club_id));
        }

        Self::ensure_season_state(&mut save, ctx);

        Ok(save)
    }

    /// Creates whatever the current season is missing: the domestic
    /// schedule, the board objective, the continental qualification and draw.
    pub fn ensure_season_state(save: &mut CareerSave, ctx: &mut CareerContext<'_>) {
        let season_id = save.season_id();

        let Some(league_id) = save.user_league_id() else {
            warn!("career: club {} has no league, nothing to schedule", save.user_club_id);
            return;
        };

        // a completed season stays until the next one is started
        if save.season.as_ref().is_some_and(|s| s.completed) {
            return;
        }

        SeasonLifecycle::ensure_season(&mut save.season, season_id, league_id, &save.world.clubs, ctx.rng);

        if save.career.objective.map(|o| o.season) != Some(season_id) {
            save.career
                .set_objective(BoardObjective::for_club(season_id, &save.world.clubs, save.user_club_id));
        }

        Self::ensure_continental(save, ctx);
    }

    fn ensure_continental(save: &mut CareerSave, ctx: &mut CareerContext<'_>) {
        let year = save.current_year;

        if !save.qualifications.contains_key(&year) {
            let previous = year.checked_sub(1).and_then(|y| save.tables.season(y));
            let qualification = QualificationAllocator::allocate(year, ctx.reference, &save.world.clubs, previous);

            save.qualifications.insert(year, qualification);
        }

        if save.continental.contains_key(&year) {
            return;
        }

        let Some(qualification) = save.qualifications.get(&year) else {
            return;
        };

        let state = ContinentalProgression::build(
            save.season_id(),
            qualification,
            ctx.qualifications(),
            &save.world.clubs,
            ctx.rng,
        );

        if let Some(tournament) = state.tournament_of(save.user_club_id) {
            let prize = ctx.rules().continental_prizes.participation;
            let round = current_round(save);

            info!("🌍 {} entered into {}", save.world.clubs.name(save.user_club_id), tournament.name);

            save.finances
                .push_income(round, LedgerKind::ContinentalPrize, prize);
        }

        save.continental.insert(year, state);
    }

    /// Plays one domestic round and everything that hangs off it: finances,
    /// a live continental step when one is due and the transfer pass. The
    /// season is completed after its last round.
    pub fn advance_round(save: &mut CareerSave, ctx: &mut CareerContext<'_>) -> Option<RoundReport> {
        Self::ensure_season_state(save, ctx);

        let user_club_id = save.user_club_id;
        let strength = StrengthContext::for_user(&save.world, user_club_id, &save.tactics, &save.staff);

        let season = save.season.as_mut()?;
        let report = SeasonLifecycle::play_round(season, &save.world.clubs, &strength, ctx.rng)?;

        if let Some(outcome) = report.outcome_for(user_club_id) {
            let shift = match outcome.winner() {
                Some(winner) if winner == user_club_id => FORM_SHIFT_WIN,
                Some(_) => FORM_SHIFT_LOSS,
                None => 0.0,
            };

            save.world.update_form(user_club_id, shift);

            debug!(
                "round {}: {} {} {}",
                report.round,
                save.world.clubs.name(outcome.home_id),
                outcome.score,
                save.world.clubs.name(outcome.away_id)
            );
        }

        let rules = ctx.rules();
        save.finances.process_round(
            report.round,
            rules.weekly_costs,
            save.world.wage_bill(user_club_id),
            rules.sponsor_income_per_round,
        );

        Self::advance_continental_matchday(save, ctx, false);

        let rounds_played = current_round(save) as u32;
        Self::process_transfers(save, ctx, rounds_played);

        Self::finalize_season_if_needed(save, ctx);

        save.touch();

        Some(report)
    }

    /// One continental matchday across every active tournament. The
    /// automatic call from a domestic round only plays when the live step is
    /// due; a manual call always plays.
    pub fn advance_continental_matchday(
        save: &mut CareerSave,
        ctx: &mut CareerContext<'_>,
        manual: bool,
    ) -> MatchdaySummary {
        Self::ensure_continental(save, ctx);

        let year = save.current_year;
        let rounds_played = current_round(save);

        let due = save.continental.get(&year).is_some_and(|state| {
            manual || ContinentalProgression::is_due(state, rounds_played, ctx.rules().continental_interval())
        });

        if !due {
            return MatchdaySummary::default();
        }

        let Some(state) = save.continental.remove(&year) else {
            return MatchdaySummary::default();
        };

        let strength = StrengthContext::for_user(&save.world, save.user_club_id, &save.tactics, &save.staff);
        let mut tournament_ctx = TournamentContext::new(&save.world.clubs, &strength, ctx.rng);

        let (mut state, summary) = ContinentalProgression::advance_matchday(state, &mut tournament_ctx);

        if !manual {
            state.last_live_round = Some(rounds_played);
        }

        if !summary.is_empty() {
            info!(
                "🌍 Continental matchday {} ({}): {} matches",
                summary.matchday,
                state.season,
                summary.matches.len()
            );
        }

        save.continental.insert(year, state);

        Self::credit_continental(save, ctx, &summary);

        summary
    }

    /// Completes the domestic season once every round is played. Returns
    /// whether the completion happened on this call.
    pub fn finalize_season_if_needed(save: &mut CareerSave, ctx: &mut CareerContext<'_>) -> bool {
        let user_club_id = save.user_club_id;

        let Some(season) = save.season.as_mut() else {
            return false;
        };

        let Some(summary) = SeasonLifecycle::finalize_if_needed(season, Some(user_club_id)) else {
            return false;
        };

        let season_id = season.id;
        let year = season_id.start_year;
        let league_id = season.league_id;
        let league_name = ctx.reference.league_name(league_id);

        save.career
            .record_season(season_id, league_id, user_club_id, &summary, &league_name);

        save.tables.snapshot(year, league_id, season.table.clone());

        Logging::estimate_result(
            || {
                for competition in &ctx.reference.competitions {
                    if save.tables.contains(year, competition.id)
                        || save.world.clubs.league_club_ids(competition.id).len() < 2
                    {
                        continue;
                    }

                    let table = BackgroundLeague::simulate(season_id, competition.id, &save.world.clubs, ctx.rng);
                    save.tables.snapshot(year, competition.id, table);
                }
            },
            "background leagues simulated",
        );

        let mut movements = Vec::new();

        for (upper_id, lower_id) in ctx.reference.linked_pairs() {
            let (Some(upper), Some(lower)) = (save.tables.get(year, upper_id), save.tables.get(year, lower_id)) else {
                continue;
            };

            let movement = PromotionRelegation::swap(
                upper_id,
                upper,
                lower_id,
                lower,
                ctx.qualifications().promotion_slots(),
            );

            PromotionRelegation::apply(&movement, &mut save.world.clubs);
            movements.push(movement);
        }

        save.movements.insert(year, movements);

        Self::resolve_continental(save, ctx);

        let next_year = year.saturating_add(1);
        let qualification =
            QualificationAllocator::allocate(next_year, ctx.reference, &save.world.clubs, save.tables.season(year));
        save.qualifications.insert(next_year, qualification);

        info!(
            "🏁 Season {} complete: career score {}, reputation {}",
            season_id, save.career.score, save.career.reputation
        );

        save.touch();

        true
    }

    /// Batch mode: whatever the live steps left unplayed is decided now.
    fn resolve_continental(save: &mut CareerSave, ctx: &mut CareerContext<'_>) {
        let year = save.current_year;

        let Some(state) = save.continental.remove(&year) else {
            return;
        };

        let strength = StrengthContext::for_user(&save.world, save.user_club_id, &save.tactics, &save.staff);
        let mut tournament_ctx = TournamentContext::new(&save.world.clubs, &strength, ctx.rng);

        let (state, summaries) = ContinentalProgression::resolve_all(state, &mut tournament_ctx);

        for (tournament_id, champion) in state.champions() {
            let name = state
                .tournament(tournament_id)
                .map(|t| t.name.clone())
                .unwrap_or_default();

            info!("🏆 {} {}: {}", name, state.season, save.world.clubs.name(champion));
        }

        let champions: Vec<(String, u32)> = state
            .champions()
            .into_iter()
            .map(|(id, club)| (id.to_string(), club))
            .collect();

        save.continental.insert(year, state);

        for summary in &summaries {
            Self::credit_continental(save, ctx, summary);
        }

        // champions decided outside a matchday step
        let remaining = MatchdaySummary {
            champions,
            ..MatchdaySummary::default()
        };
        Self::credit_continental(save, ctx, &remaining);
    }

    /// Prize money for the user's continental results, and the title bonus.
    fn credit_continental(save: &mut CareerSave, ctx: &CareerContext<'_>, summary: &MatchdaySummary) {
        let user_club_id = save.user_club_id;
        let round = current_round(save);
        let prizes = &ctx.rules().continental_prizes;

        for played in summary.matches_for(user_club_id) {
            let prize = match played.result_for(user_club_id) {
                Some(true) => prizes.win,
                Some(false) => 0,
                None => prizes.draw,
            };

            save.finances
                .push_income(round, LedgerKind::ContinentalPrize, prize);
        }

        let Some(state) = save.continental.get(&save.current_year) else {
            return;
        };

        for (tournament_id, _) in summary.champions.iter().filter(|(_, club)| *club == user_club_id) {
            let name = state
                .tournament(tournament_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| tournament_id.clone());

            if save.career.award_continental(state.season, &name) > 0 {
                save.finances
                    .push_income(round, LedgerKind::ContinentalPrize, prizes.champion);
            }
        }
    }

    /// Replaces a completed season with the next one. An unfinished season
    /// is left alone and `false` is returned.
    pub fn start_new_season(save: &mut CareerSave, ctx: &mut CareerContext<'_>) -> bool {
        Self::finalize_season_if_needed(save, ctx);

        if save.season.as_ref().is_some_and(|s| !s.completed) {
            warn!("career: season {} is still in progress", save.season_id());
            return false;
        }

        save.current_year = save.current_year.saturating_add(1);
        save.season = None;
        save.finances.reset_for_new_season();

        Self::pipeline(save, ctx).reset_for_new_season();

        Self::ensure_season_state(save, ctx);

        info!("📅 Season {} started", save.season_id());

        save.touch();

        true
    }

    fn pipeline<'s>(save: &'s mut CareerSave, ctx: &'s CareerContext<'_>) -> TransferPipeline<'s, ClubFinances> {
        TransferPipeline::new(
            &mut save.transfers,
            &mut save.world,
            &mut save.finances,
            save.user_club_id,
            ctx.rules(),
        )
    }

    /// Transfer pass keyed by rounds played, so offers made before a round
    /// are answered after it.
    fn process_transfers(save: &mut CareerSave, ctx: &mut CareerContext<'_>, round: u32) -> TransferRoundReport {
        let rules = ctx.rules();

        let mut pipeline = TransferPipeline::new(
            &mut save.transfers,
            &mut save.world,
            &mut save.finances,
            save.user_club_id,
            rules,
        );

        pipeline.process_round(round, ctx.rng)
    }

    pub fn make_offer(
        save: &mut CareerSave,
        ctx: &CareerContext<'_>,
        player_id: u32,
        fee: Money,
        wage: Money,
    ) -> Result<u32, TransferError> {
        let round = current_round(save) as u32;
        let result = Self::pipeline(save, ctx).make_offer(player_id, fee, wage, round);

        save.touch();
        result
    }

    pub fn cancel_offer(save: &mut CareerSave, ctx: &CareerContext<'_>, offer_id: u32) -> Result<(), TransferError> {
        let round = current_round(save) as u32;
        let result = Self::pipeline(save, ctx).cancel_offer(offer_id, round);

        save.touch();
        result
    }

    pub fn respond_to_counter(
        save: &mut CareerSave,
        ctx: &CareerContext<'_>,
        offer_id: u32,
        accept: bool,
    ) -> Result<OfferStatus, TransferError> {
        let round = current_round(save) as u32;
        let result = Self::pipeline(save, ctx).respond_to_counter(offer_id, accept, round);

        save.touch();
        result
    }

    pub fn respond_to_incoming(
        save: &mut CareerSave,
        ctx: &CareerContext<'_>,
        offer_id: u32,
        accept: bool,
    ) -> Result<OfferStatus, TransferError> {
        let round = current_round(save) as u32;
        let result = Self::pipeline(save, ctx).respond_to_incoming(offer_id, accept, round);

        save.touch();
        result
    }

    /// Retries payment for an accepted purchase that was short of cash.
    pub fn settle_offer(save: &mut CareerSave, ctx: &CareerContext<'_>, offer_id: u32) -> Result<(), TransferError> {
        let round = current_round(save) as u32;
        let result = Self::pipeline(save, ctx).settle(offer_id, round);

        save.touch();
        result
    }
}

/// Rounds already played in the current domestic season.
fn current_round(save: &CareerSave) -> usize {
    save.season.as_ref().map_or(0, |s| s.current_round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::continent::TournamentFormat;
    use crate::league::SeasonId;
    use crate::reference::{
        ClubEntry, CompetitionEntry, PlayerEntry, PlayerPosition, QualificationRules, QualificationZone,
        ReferenceData, TournamentRule,
    };
    use crate::utils::{RandomSource, SimRng};

    const USER: u32 = 101;

    /// Two associations with two six-club divisions each.
    fn reference() -> ReferenceData {
        let mut competitions = Vec::new();
        let mut clubs = Vec::new();
        let mut players = Vec::new();

        for (index, association) in ["ENG", "ESP"].iter().enumerate() {
            for level in 1..=2u8 {
                let league_id = (index as u32 + 1) * 10 + level as u32;

                competitions.push(CompetitionEntry {
                    id: league_id,
                    name: format!("{} Division {}", association, level),
                    association: association.to_string(),
                    level,
                });

                for slot in 0..6u32 {
                    let id = league_id * 10 + slot;
                    let id = if league_id == 11 && slot == 0 { USER } else { id };

                    clubs.push(ClubEntry {
                        id,
                        name: format!("{} {} {}", association, level, slot),
                        association: association.to_string(),
                        league_id,
                        rating: 80.0 - level as f32 * 10.0 - slot as f32,
                        budget: 0,
                    });
                }
            }
        }

        for slot in 0..5u32 {
            players.push(PlayerEntry {
                id: 1000 + slot,
                club_id: USER,
                name: format!("User Player {}", slot),
                position: PlayerPosition::Midfielder,
                age: 25,
                rating: 70,
                value: 2_000_000,
                wage: 20_000,
            });
            players.push(PlayerEntry {
                id: 2000 + slot,
                club_id: 112,
                name: format!("Rival Player {}", slot),
                position: PlayerPosition::Forward,
                age: 27,
                rating: 68,
                value: 3_000_000,
                wage: 25_000,
            });
        }

        ReferenceData {
            clubs,
            players,
            competitions,
            qualifications: QualificationRules {
                tournaments: vec![TournamentRule::new("cup", "Continental Cup", 1, 8, TournamentFormat::Ko)],
                default_zones: vec![QualificationZone::new("cup", 1, 4)],
                promotion_slots: 2,
                ..QualificationRules::default()
            },
            ..ReferenceData::default()
        }
    }

    fn play_season(save: &mut CareerSave, reference: &ReferenceData, rng: &mut SimRng) -> usize {
        let mut ctx = CareerContext::new(reference, rng);
        let mut rounds = 0;

        while CareerSimulator::advance_round(save, &mut ctx).is_some() {
            rounds += 1;
        }

        rounds
    }

    #[test]
    fn unknown_club_cannot_start_a_career() {
        let reference = reference();
        let mut rng = RandomSource::seeded(1);
        let mut ctx = CareerContext::new(&reference, &mut rng);

        assert!(matches!(
            CareerSimulator::new_career(4242, &mut ctx),
            Err(CareerError::UnknownClub(4242))
        ));
    }

    #[test]
    fn new_career_prepares_first_season() {
        let reference = reference();
        let mut rng = RandomSource::seeded(1);
        let mut ctx = CareerContext::new(&reference, &mut rng);

        let save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        let season = save.season.as_ref().unwrap();
        assert_eq!(season.league_id, 11);
        assert_eq!(season.total_rounds(), 10);
        assert_eq!(save.career.objective.map(|o| o.target_position), Some(1));

        let continental = save.continental.get(&2025).unwrap();
        assert!(continental.tournament_of(USER).is_some());

        let participation = reference.rules.continental_prizes.participation;
        assert_eq!(save.finances.cash, reference.rules.starting_cash + participation);
    }

    #[test]
    fn full_season_completes_once_and_moves_clubs() {
        let reference = reference();
        let mut rng = RandomSource::seeded(7);
        let mut ctx = CareerContext::new(&reference, &mut rng);
        let mut save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        let rounds = play_season(&mut save, &reference, &mut rng);
        assert_eq!(rounds, 10);

        let season = save.season.as_ref().unwrap();
        assert!(season.completed);
        assert!(season.summary.is_some());
        assert_eq!(save.career.history.len(), 1);

        for league_id in [11, 12, 21, 22] {
            assert!(save.tables.contains(2025, league_id));
        }

        let movements = save.movements.get(&2025).unwrap();
        assert_eq!(movements.len(), 2);
        assert!(movements.iter().all(|m| m.promoted.len() == 2 && m.relegated.len() == 2));

        for league_id in [11, 12, 21, 22] {
            assert_eq!(save.world.clubs.league_club_ids(league_id).len(), 6);
        }

        let continental = save.continental.get(&2025).unwrap();
        assert!(continental.is_complete());
        assert_eq!(continental.champions().len(), 1);
        assert!(save.qualifications.contains_key(&2026));

        let snapshot = save.clone();
        let mut ctx = CareerContext::new(&reference, &mut rng);
        assert!(!CareerSimulator::finalize_season_if_needed(&mut save, &mut ctx));
        assert!(CareerSimulator::advance_round(&mut save, &mut ctx).is_none());
        assert_eq!(save.career, snapshot.career);
        assert_eq!(save.world, snapshot.world);
        assert_eq!(save.tables, snapshot.tables);
    }

    #[test]
    fn live_matchdays_follow_the_interval() {
        let reference = reference();
        let mut rng = RandomSource::seeded(3);
        let mut ctx = CareerContext::new(&reference, &mut rng);
        let mut save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        let interval = reference.rules.continental_interval();

        for _ in 0..interval - 1 {
            CareerSimulator::advance_round(&mut save, &mut ctx);
        }
        assert_eq!(save.continental.get(&2025).unwrap().matchdays_played, 0);

        CareerSimulator::advance_round(&mut save, &mut ctx);
        let state = save.continental.get(&2025).unwrap();
        assert_eq!(state.matchdays_played, 1);
        assert_eq!(state.last_live_round, Some(interval));

        let summary = CareerSimulator::advance_continental_matchday(&mut save, &mut ctx, true);
        assert_eq!(summary.matchday, 2);
        assert_eq!(save.continental.get(&2025).unwrap().matchdays_played, 2);
    }

    #[test]
    fn new_season_starts_only_after_completion() {
        let reference = reference();
        let mut rng = RandomSource::seeded(9);
        let mut ctx = CareerContext::new(&reference, &mut rng);
        let mut save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        CareerSimulator::advance_round(&mut save, &mut ctx);
        assert!(!CareerSimulator::start_new_season(&mut save, &mut ctx));

        play_season(&mut save, &reference, &mut rng);

        let mut ctx = CareerContext::new(&reference, &mut rng);
        assert!(CareerSimulator::start_new_season(&mut save, &mut ctx));

        assert_eq!(save.season_id(), SeasonId::new(2026));

        let season = save.season.as_ref().unwrap();
        assert_eq!(season.id, SeasonId::new(2026));
        assert_eq!(season.current_round, 0);
        assert_eq!(Some(season.league_id), save.user_league_id());
        assert!(season.table.rows.iter().all(|r| r.played == 0));
        assert!(save.transfers.outbox.is_empty() && save.transfers.inbox.is_empty());
        assert!(save.continental.contains_key(&2026));
    }

    #[test]
    fn transfer_actions_use_the_current_round() {
        let reference = reference();
        let mut rng = RandomSource::seeded(2);
        let mut ctx = CareerContext::new(&reference, &mut rng);
        let mut save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        let offer_id = CareerSimulator::make_offer(&mut save, &ctx, 2000, 3_000_000, 25_000).unwrap();
        assert_eq!(save.transfers.offer(offer_id).map(|o| o.created_round), Some(0));

        CareerSimulator::advance_round(&mut save, &mut ctx);

        assert_eq!(save.world.player(2000).map(|p| p.club_id), Some(USER));
        assert_eq!(CareerSimulator::cancel_offer(&mut save, &ctx, offer_id), Err(TransferError::UnknownOffer(offer_id)));
    }

    #[test]
    fn saved_career_loads_back() {
        let reference = reference();
        let mut rng = RandomSource::seeded(4);
        let mut ctx = CareerContext::new(&reference, &mut rng);
        let mut save = CareerSimulator::new_career(USER, &mut ctx).unwrap();

        CareerSimulator::advance_round(&mut save, &mut ctx);

        let json = save.to_json().unwrap();
        let loaded = CareerSimulator::load(&json, &mut ctx).unwrap();

        assert_eq!(loaded.season, save.season);
        assert_eq!(loaded.world, save.world);
        assert_eq!(loaded.finances, save.finances);
    }
}
