use crate::club::{ClubRegistry, StrengthContext, StrengthModel};
use crate::continent::{GroupStage, Knockout, LeaguePhase};
use crate::r#match::{MatchSimulator, Score, Venue};
use crate::reference::TournamentRule;
use crate::utils::SimRng;
use log::{info, warn};
use serde::{Deserialize, Serialize};

pub const GROUPS_MIN_PARTICIPANTS: usize = 16;
pub const LEAGUE_PHASE_MIN_PARTICIPANTS: usize = 8;
pub const KNOCKOUT_MIN_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentFormat {
    GroupsKo,
    LeagueKo,
    Ko,
}

impl TournamentFormat {
    /// The configured format if the field is large enough, otherwise the next
    /// simpler one. `None` when not even a knockout can be played.
    pub fn effective(self, participants: usize) -> Option<TournamentFormat> {
        match self {
            TournamentFormat::GroupsKo if participants >= GROUPS_MIN_PARTICIPANTS => {
                Some(TournamentFormat::GroupsKo)
            }
            TournamentFormat::GroupsKo | TournamentFormat::LeagueKo
                if participants >= LEAGUE_PHASE_MIN_PARTICIPANTS =>
            {
                Some(TournamentFormat::LeagueKo)
            }
            _ if participants >= KNOCKOUT_MIN_PARTICIPANTS => Some(TournamentFormat::Ko),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentStage {
    Placeholder,
    Groups,
    LeaguePhase,
    Knockout,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub club_id: u32,
    pub name: String,
    pub association: String,
    pub rating: f32,
}

impl Participant {
    pub fn from_registry(clubs: &ClubRegistry, club_id: u32) -> Self {
        match clubs.get(club_id) {
            Some(club) => Participant {
                club_id,
                name: club.name.clone(),
                association: club.association.clone(),
                rating: club.rating,
            },
            None => Participant {
                club_id,
                name: clubs.name(club_id),
                association: String::new(),
                rating: StrengthModel::base_rating(clubs, club_id) as f32,
            },
        }
    }
}

/// Highest rating first; ids break ties.
pub fn seed_order(participants: &mut [Participant]) {
    participants.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then_with(|| a.club_id.cmp(&b.club_id))
    });
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentalMatch {
    pub home_id: u32,
    pub away_id: u32,
    pub played: bool,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub penalties: Option<Score>,
}

impl ContinentalMatch {
    pub fn new(home_id: u32, away_id: u32) -> Self {
        ContinentalMatch {
            home_id,
            away_id,
            played: false,
            score: Score::default(),
            penalties: None,
        }
    }

    /// Winner after extra time and penalties; `None` for an unplayed match or
    /// a drawn group game.
    pub fn winner(&self) -> Option<u32> {
        if !self.played {
            return None;
        }

        let decisive = match self.penalties {
            Some(penalties) if self.score.is_draw() => penalties,
            _ => self.score,
        };

        if decisive.home > decisive.away {
            Some(self.home_id)
        } else if decisive.away > decisive.home {
            Some(self.away_id)
        } else {
            None
        }
    }

    pub fn involves(&self, club_id: u32) -> bool {
        self.home_id == club_id || self.away_id == club_id
    }
}

/// Everything a tournament needs to play its matches.
pub struct TournamentContext<'a> {
    pub clubs: &'a ClubRegistry,
    pub strength: &'a StrengthContext,
    pub rng: &'a mut SimRng,
}

impl<'a> TournamentContext<'a> {
    pub fn new(clubs: &'a ClubRegistry, strength: &'a StrengthContext, rng: &'a mut SimRng) -> Self {
        TournamentContext {
            clubs,
            strength,
            rng,
        }
    }

    /// Plays one fixture in place. Knockout ties that end level go to penalties.
    pub fn play(&mut self, fixture: &mut ContinentalMatch, venue: Venue, knockout: bool) {
        if fixture.played {
            return;
        }

        let outcome = MatchSimulator::play(
            self.clubs,
            fixture.home_id,
            fixture.away_id,
            self.strength,
            venue,
            self.rng,
        );

        fixture.played = true;
        fixture.score = outcome.score;

        if knockout && outcome.score.is_draw() {
            fixture.penalties = Some(crate::continent::PenaltyShootout::decide(
                StrengthModel::base_rating(self.clubs, fixture.home_id),
                StrengthModel::base_rating(self.clubs, fixture.away_id),
                self.rng,
            ));
        }
    }
}

/// A fixture played during one step, with a label for the step it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct StageMatch {
    pub label: String,
    pub fixture: ContinentalMatch,
}

/// One phase of a tournament, advanced a matchday at a time.
pub trait TournamentPhase {
    fn play_matchday(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<StageMatch>;

    fn is_finished(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedMatch {
    pub tournament_id: String,
    pub tournament_name: String,
    pub stage: String,
    pub home_id: u32,
    pub home_name: String,
    pub away_id: u32,
    pub away_name: String,
    pub score: Score,
    pub penalties: Option<Score>,
    pub winner_id: Option<u32>,
}

impl PlayedMatch {
    pub fn involves(&self, club_id: u32) -> bool {
        self.home_id == club_id || self.away_id == club_id
    }

    /// `Some(true)` win, `Some(false)` loss, `None` draw in normal time.
    pub fn result_for(&self, club_id: u32) -> Option<bool> {
        if !self.involves(club_id) || self.score.is_draw() {
            return None;
        }

        let scored = if self.home_id == club_id {
            self.score.home
        } else {
            self.score.away
        };
        let conceded = if self.home_id == club_id {
            self.score.away
        } else {
            self.score.home
        };

        Some(scored > conceded)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinentalTournament {
    pub id: String,
    pub name: String,
    pub tier: u8,
    pub format: TournamentFormat,
    pub effective_format: Option<TournamentFormat>,
    pub participants: Vec<Participant>,
    pub stage: TournamentStage,
    #[serde(default)]
    pub groups: Option<GroupStage>,
    #[serde(default)]
    pub league_phase: Option<LeaguePhase>,
    #[serde(default)]
    pub knockout: Option<Knockout>,
    #[serde(default)]
    pub champion: Option<u32>,
}

impl ContinentalTournament {
    pub fn build(rule: &TournamentRule, mut participants: Vec<Participant>, rng: &mut SimRng) -> Self {
        seed_order(&mut participants);

        let effective_format = rule.format.effective(participants.len());

        let mut tournament = ContinentalTournament {
            id: rule.id.clone(),
            name: rule.name.clone(),
            tier: rule.tier,
            format: rule.format,
            effective_format,
            participants,
            stage: TournamentStage::Placeholder,
            groups: None,
            league_phase: None,
            knockout: None,
            champion: None,
        };

        if effective_format != Some(rule.format) {
            warn!(
                "🏟️ {}: {} participants, format {:?} degraded to {:?}",
                tournament.name,
                tournament.participants.len(),
                rule.format,
                effective_format
            );
        }

        match effective_format {
            Some(TournamentFormat::GroupsKo) => {
                tournament.groups = Some(GroupStage::draw(&tournament.participants, rule.groups, rng));
                tournament.stage = TournamentStage::Groups;
            }
            Some(TournamentFormat::LeagueKo) => {
                tournament.league_phase = Some(LeaguePhase::new(
                    &tournament.participants,
                    rule.league_phase_rounds,
                ));
                tournament.stage = TournamentStage::LeaguePhase;
            }
            Some(TournamentFormat::Ko) => {
                let seeds = tournament.participants.iter().map(|p| p.club_id).collect();
                tournament.start_knockout(seeds);
            }
            None => {}
        }

        info!(
            "🎲 {} drawn: {} clubs, stage {:?}",
            tournament.name,
            tournament.participants.len(),
            tournament.stage
        );

        tournament
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.stage,
            TournamentStage::Groups | TournamentStage::LeaguePhase | TournamentStage::Knockout
        )
    }

    pub fn involves(&self, club_id: u32) -> bool {
        self.participants.iter().any(|p| p.club_id == club_id)
    }

    pub fn participant_name(&self, club_id: u32) -> String {
        self.participants
            .iter()
            .find(|p| p.club_id == club_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Club {}", club_id))
    }

    /// Advances every phase by one matchday. Phase transitions happen as part
    /// of the step that finishes the previous phase.
    pub fn play_matchday(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<PlayedMatch> {
        let played = match self.stage {
            TournamentStage::Groups => {
                let (played, seeds) = match self.groups.as_mut() {
                    Some(groups) => {
                        let played = groups.play_matchday(ctx);
                        let seeds = groups.is_finished().then(|| groups.qualifiers());
                        (played, seeds)
                    }
                    None => (Vec::new(), Some(Vec::new())),
                };

                if let Some(seeds) = seeds {
                    self.start_knockout(seeds);
                }

                played
            }
            TournamentStage::LeaguePhase => {
                let (played, seeds) = match self.league_phase.as_mut() {
                    Some(phase) => {
                        let played = phase.play_matchday(ctx);
                        let seeds = phase.is_finished().then(|| phase.qualifiers());
                        (played, seeds)
                    }
                    None => (Vec::new(), Some(Vec::new())),
                };

                if let Some(seeds) = seeds {
                    self.start_knockout(seeds);
                }

                played
            }
            TournamentStage::Knockout => {
                let (played, champion) = match self.knockout.as_mut() {
                    Some(knockout) => {
                        let played = knockout.play_matchday(ctx);
                        (played, knockout.champion)
                    }
                    None => (Vec::new(), None),
                };

                if let Some(champion) = champion {
                    self.crown(champion);
                }

                played
            }
            TournamentStage::Placeholder | TournamentStage::Completed => Vec::new(),
        };

        played
            .into_iter()
            .map(|stage_match| self.to_played(stage_match))
            .collect()
    }

    /// Plays every remaining matchday.
    pub fn resolve(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<PlayedMatch> {
        let mut played = Vec::new();

        while self.is_active() {
            let before = self.stage;
            let matchday = self.play_matchday(ctx);

            if matchday.is_empty() && before == self.stage {
                warn!("🏟️ {}: no progress possible, stopping at {:?}", self.name, self.stage);
                self.stage = TournamentStage::Placeholder;
                break;
            }

            played.extend(matchday);
        }

        played
    }

    fn start_knockout(&mut self, seeds: Vec<u32>) {
        if seeds.len() < KNOCKOUT_MIN_PARTICIPANTS {
            warn!("🏟️ {}: {} knockout entrants, left unresolved", self.name, seeds.len());
            self.stage = TournamentStage::Placeholder;
            return;
        }

        self.knockout = Some(Knockout::seeded(seeds));
        self.stage = TournamentStage::Knockout;
    }

    fn crown(&mut self, club_id: u32) {
        if self.champion.is_none() {
            self.champion = Some(club_id);
            info!("🏆 {} won by {}", self.name, self.participant_name(club_id));
        }

        self.stage = TournamentStage::Completed;
    }

    fn to_played(&self, stage_match: StageMatch) -> PlayedMatch {
        let fixture = stage_match.fixture;

        PlayedMatch {
            tournament_id: self.id.clone(),
            tournament_name: self.name.clone(),
            stage: stage_match.label,
            home_id: fixture.home_id,
            home_name: self.participant_name(fixture.home_id),
            away_id: fixture.away_id,
            away_name: self.participant_name(fixture.away_id),
            score: fixture.score,
            penalties: fixture.penalties,
            winner_id: fixture.winner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;
    use crate::utils::RandomSource;

    fn registry(count: u32) -> ClubRegistry {
        ClubRegistry::new(
            (1..=count)
                .map(|id| {
                    let association = ["ENG", "ESP", "GER", "ITA"][(id % 4) as usize];
                    Club::new(id, &format!("Club {:02}", id), association, id % 4, 50.0 + id as f32)
                })
                .collect(),
        )
    }

    fn participants(clubs: &ClubRegistry) -> Vec<Participant> {
        clubs.iter().map(|c| Participant::from_registry(clubs, c.id)).collect()
    }

    #[test]
    fn format_degrades_with_small_fields() {
        assert_eq!(TournamentFormat::GroupsKo.effective(32), Some(TournamentFormat::GroupsKo));
        assert_eq!(TournamentFormat::GroupsKo.effective(12), Some(TournamentFormat::LeagueKo));
        assert_eq!(TournamentFormat::GroupsKo.effective(5), Some(TournamentFormat::Ko));
        assert_eq!(TournamentFormat::LeagueKo.effective(24), Some(TournamentFormat::LeagueKo));
        assert_eq!(TournamentFormat::Ko.effective(40), Some(TournamentFormat::Ko));
        assert_eq!(TournamentFormat::Ko.effective(1), None);
    }

    #[test]
    fn thirty_two_clubs_play_groups_then_sixteen_team_knockout() {
        let clubs = registry(32);
        let strength = StrengthContext::neutral();
        let mut rng = RandomSource::seeded(32);
        let rule = TournamentRule::new("cup", "Cup", 1, 32, TournamentFormat::GroupsKo);

        let mut tournament = ContinentalTournament::build(&rule, participants(&clubs), &mut rng);

        let groups = tournament.groups.as_ref().unwrap();
        assert_eq!(groups.groups.len(), 8);
        assert!(groups.groups.iter().all(|g| g.club_ids.len() == 4));
        assert_eq!(groups.total_matchdays(), 3);

        let mut ctx = TournamentContext::new(&clubs, &strength, &mut rng);

        for _ in 0..3 {
            assert_eq!(tournament.stage, TournamentStage::Groups);
            assert_eq!(tournament.play_matchday(&mut ctx).len(), 16);
        }

        assert_eq!(tournament.stage, TournamentStage::Knockout);
        let knockout = tournament.knockout.as_ref().unwrap();
        assert_eq!(knockout.seeds.len(), 16);
        assert_eq!(knockout.rounds[0].matches.len(), 8);

        let played = tournament.resolve(&mut ctx);

        assert_eq!(played.len(), 8 + 4 + 2 + 1);
        assert_eq!(tournament.stage, TournamentStage::Completed);
        assert!(tournament.champion.is_some());
        assert_eq!(played.last().map(|m| m.stage.as_str()), Some("Final"));
        assert_eq!(played.last().and_then(|m| m.winner_id), tournament.champion);
    }

    #[test]
    fn champion_is_never_recomputed() {
        let clubs = registry(4);
        let strength = StrengthContext::neutral();
        let mut rng = RandomSource::seeded(8);
        let rule = TournamentRule::new("cup", "Cup", 1, 4, TournamentFormat::Ko);

        let mut tournament = ContinentalTournament::build(&rule, participants(&clubs), &mut rng);
        let mut ctx = TournamentContext::new(&clubs, &strength, &mut rng);

        tournament.resolve(&mut ctx);
        let champion = tournament.champion;

        assert!(champion.is_some());
        assert!(tournament.play_matchday(&mut ctx).is_empty());
        assert!(tournament.resolve(&mut ctx).is_empty());
        assert_eq!(tournament.champion, champion);
    }

    #[test]
    fn lone_participant_stays_placeholder() {
        let clubs = registry(1);
        let mut rng = RandomSource::seeded(1);
        let rule = TournamentRule::new("cup", "Cup", 1, 8, TournamentFormat::Ko);

        let tournament = ContinentalTournament::build(&rule, participants(&clubs), &mut rng);

        assert_eq!(tournament.stage, TournamentStage::Placeholder);
        assert!(!tournament.is_active());
        assert!(tournament.champion.is_none());
    }

    #[test]
    fn knockout_draw_needs_penalty_winner() {
        let mut fixture = ContinentalMatch::new(1, 2);
        fixture.played = true;
        fixture.score = Score::new(1, 1);

        assert_eq!(fixture.winner(), None);

        fixture.penalties = Some(Score::new(3, 4));
        assert_eq!(fixture.winner(), Some(2));
    }
}
