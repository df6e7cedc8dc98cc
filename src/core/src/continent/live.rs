use crate::club::ClubRegistry;
use crate::continent::{ContinentalTournament, Participant, PlayedMatch, QualificationResult, TournamentContext};
use crate::league::SeasonId;
use crate::reference::QualificationRules;
use crate::utils::SimRng;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Every continental tournament of one season plus the live cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentalSeason {
    pub season: SeasonId,
    pub tournaments: Vec<ContinentalTournament>,
    #[serde(default)]
    pub matchdays_played: usize,
    /// Domestic round that last triggered a live step.
    #[serde(default)]
    pub last_live_round: Option<usize>,
}

impl ContinentalSeason {
    pub fn is_complete(&self) -> bool {
        self.tournaments.iter().all(|t| !t.is_active())
    }

    pub fn champions(&self) -> Vec<(&str, u32)> {
        self.tournaments
            .iter()
            .filter_map(|t| t.champion.map(|c| (t.id.as_str(), c)))
            .collect()
    }

    pub fn tournament(&self, id: &str) -> Option<&ContinentalTournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn tournament_of(&self, club_id: u32) -> Option<&ContinentalTournament> {
        self.tournaments.iter().find(|t| t.involves(club_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchdaySummary {
    pub matchday: usize,
    pub matches: Vec<PlayedMatch>,
    /// Tournaments decided during this step, with their champion.
    pub champions: Vec<(String, u32)>,
}

impl MatchdaySummary {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn matches_for(&self, club_id: u32) -> impl Iterator<Item = &PlayedMatch> {
        self.matches.iter().filter(move |m| m.involves(club_id))
    }
}

pub struct ContinentalProgression;

impl ContinentalProgression {
    pub fn build(
        season: SeasonId,
        qualification: &QualificationResult,
        rules: &QualificationRules,
        clubs: &ClubRegistry,
        rng: &mut SimRng,
    ) -> ContinentalSeason {
        let tournaments = rules
            .tournaments_by_tier()
            .into_iter()
            .map(|rule| {
                let participants = qualification
                    .tournament(&rule.id)
                    .map(|q| {
                        q.clubs
                            .iter()
                            .map(|c| Participant::from_registry(clubs, c.club_id))
                            .collect()
                    })
                    .unwrap_or_default();

                ContinentalTournament::build(rule, participants, rng)
            })
            .collect();

        info!("🌍 Continental season {} drawn", season);

        ContinentalSeason {
            season,
            tournaments,
            matchdays_played: 0,
            last_live_round: None,
        }
    }

    /// Whether the live step is due after `rounds_played` domestic rounds.
    pub fn is_due(state: &ContinentalSeason, rounds_played: usize, interval: usize) -> bool {
        rounds_played > 0
            && rounds_played % interval.max(1) == 0
            && state.last_live_round != Some(rounds_played)
            && !state.is_complete()
    }

    /// One matchday for every active tournament.
    pub fn advance_matchday(
        mut state: ContinentalSeason,
        ctx: &mut TournamentContext<'_>,
    ) -> (ContinentalSeason, MatchdaySummary) {
        if state.is_complete() {
            return (state, MatchdaySummary::default());
        }

        let mut summary = MatchdaySummary {
            matchday: state.matchdays_played + 1,
            ..MatchdaySummary::default()
        };

        for tournament in state.tournaments.iter_mut().filter(|t| t.is_active()) {
            summary.matches.extend(tournament.play_matchday(ctx));

            if let Some(champion) = tournament.champion.filter(|_| !tournament.is_active()) {
                summary.champions.push((tournament.id.clone(), champion));
            }
        }

        state.matchdays_played += 1;

        debug!(
            "continental season {}: matchday {} played, {} matches",
            state.season,
            summary.matchday,
            summary.matches.len()
        );

        (state, summary)
    }

    /// Batch mode: plays matchdays until every tournament is decided.
    pub fn resolve_all(
        mut state: ContinentalSeason,
        ctx: &mut TournamentContext<'_>,
    ) -> (ContinentalSeason, Vec<MatchdaySummary>) {
        let mut summaries = Vec::new();

        while !state.is_complete() {
            let (next, summary) = Self::advance_matchday(state, ctx);
            state = next;

            if summary.is_empty() && summary.champions.is_empty() {
                for tournament in state.tournaments.iter_mut() {
                    tournament.resolve(ctx);
                }
                break;
            }

            summaries.push(summary);
        }

        (state, summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::{Club, StrengthContext};
    use crate::continent::{QualificationAllocator, TournamentStage};
    use crate::reference::{CompetitionEntry, ReferenceData};
    use crate::utils::RandomSource;

    fn setup() -> (ReferenceData, ClubRegistry) {
        let associations = ["ENG", "ESP", "GER", "ITA"];
        let mut competitions = Vec::new();
        let mut clubs = Vec::new();

        for (index, association) in associations.iter().enumerate() {
            let league_id = index as u32 + 1;
            competitions.push(CompetitionEntry {
                id: league_id,
                name: format!("{} First", association),
                association: association.to_string(),
                level: 1,
            });

            for slot in 0..18u32 {
                let id = league_id * 100 + slot;
                clubs.push(Club::new(id, &format!("{} {}", association, slot), association, league_id, 80.0 - slot as f32));
            }
        }

        (
            ReferenceData {
                competitions,
                ..ReferenceData::default()
            },
            ClubRegistry::new(clubs),
        )
    }

    #[test]
    fn live_steps_then_batch_resolution_crown_every_tournament() {
        let (reference, clubs) = setup();
        let strength = StrengthContext::neutral();
        let mut rng = RandomSource::seeded(2025);

        let qualification = QualificationAllocator::allocate(2025, &reference, &clubs, None);
        let state = ContinentalProgression::build(
            SeasonId::new(2025),
            &qualification,
            &reference.qualifications,
            &clubs,
            &mut rng,
        );

        assert_eq!(state.tournaments.len(), 3);
        assert_eq!(state.tournaments[0].stage, TournamentStage::Groups);
        assert_eq!(state.tournaments[1].stage, TournamentStage::LeaguePhase);
        assert_eq!(state.tournaments[2].stage, TournamentStage::Knockout);

        let mut ctx = TournamentContext::new(&clubs, &strength, &mut rng);

        let (state, first) = ContinentalProgression::advance_matchday(state, &mut ctx);
        assert_eq!(first.matchday, 1);
        assert_eq!(first.matches.len(), 16 + 12 + 8);
        assert_eq!(state.matchdays_played, 1);

        let (state, rest) = ContinentalProgression::resolve_all(state, &mut ctx);

        assert!(state.is_complete());
        assert_eq!(state.champions().len(), 3);
        assert_eq!(rest.iter().map(|s| s.champions.len()).sum::<usize>(), 3);

        let (state, nothing) = ContinentalProgression::advance_matchday(state, &mut ctx);
        assert!(nothing.is_empty());
        assert_eq!(state.champions().len(), 3);
    }

    #[test]
    fn live_step_is_due_once_per_interval() {
        let (_, clubs) = setup();
        let mut rng = RandomSource::seeded(1);
        let rule = crate::reference::TournamentRule::new("cup", "Cup", 1, 4, crate::continent::TournamentFormat::Ko);
        let participants = [100, 101, 200, 201]
            .iter()
            .map(|id| Participant::from_registry(&clubs, *id))
            .collect();

        let mut state = ContinentalSeason {
            season: SeasonId::new(2025),
            tournaments: vec![ContinentalTournament::build(&rule, participants, &mut rng)],
            matchdays_played: 0,
            last_live_round: None,
        };

        assert!(!ContinentalProgression::is_due(&state, 0, 3));
        assert!(!ContinentalProgression::is_due(&state, 2, 3));
        assert!(ContinentalProgression::is_due(&state, 3, 3));

        state.last_live_round = Some(3);
        assert!(!ContinentalProgression::is_due(&state, 3, 3));
        assert!(ContinentalProgression::is_due(&state, 6, 3));
    }
}
