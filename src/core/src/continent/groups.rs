use crate::continent::{ContinentalMatch, Participant, StageMatch, TournamentContext, TournamentPhase};
use crate::league::{LeagueTable, LeagueTableRow, ScheduleGenerator, compare_rows};
use crate::r#match::Venue;
use crate::utils::SimRng;
use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const CLUBS_PER_GROUP: usize = 4;
pub const MIN_GROUPS: usize = 4;
pub const QUALIFIERS_PER_GROUP: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentGroup {
    pub name: String,
    pub club_ids: Vec<u32>,
    pub table: LeagueTable,
    pub matchdays: Vec<Vec<ContinentalMatch>>,
}

impl TournamentGroup {
    fn new(index: usize, participants: &[&Participant]) -> Self {
        let club_ids: Vec<u32> = participants.iter().map(|p| p.club_id).collect();

        let matchdays = ScheduleGenerator::single_round_robin(&club_ids)
            .into_iter()
            .map(|round| {
                round
                    .into_iter()
                    .map(|fixture| ContinentalMatch::new(fixture.home, fixture.away))
                    .collect()
            })
            .collect();

        TournamentGroup {
            name: group_name(index),
            club_ids,
            table: LeagueTable::new(participants.iter().map(|p| (p.club_id, p.name.as_str()))),
            matchdays,
        }
    }

    pub fn standings(&self) -> Vec<LeagueTableRow> {
        self.table.sorted()
    }
}

fn group_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Group {}", letter)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStage {
    pub groups: Vec<TournamentGroup>,
    pub matchday: usize,
}

impl GroupStage {
    pub fn group_count(participants: usize, max_groups: usize) -> usize {
        (participants / CLUBS_PER_GROUP).clamp(MIN_GROUPS, max_groups.max(MIN_GROUPS))
    }

    /// Pots are cut from the seeding order, one pot per group slot, and every
    /// pot is shuffled before its clubs are dealt one per group.
    pub fn draw(participants: &[Participant], max_groups: usize, rng: &mut SimRng) -> Self {
        let group_count = Self::group_count(participants.len(), max_groups);

        let mut members: Vec<Vec<&Participant>> = vec![Vec::new(); group_count];

        for pot in participants.chunks(group_count) {
            let mut pot: Vec<&Participant> = pot.iter().collect();
            pot.shuffle(rng);

            for (group, participant) in pot.into_iter().enumerate() {
                members[group].push(participant);
            }
        }

        GroupStage {
            groups: members
                .iter()
                .enumerate()
                .map(|(index, clubs)| TournamentGroup::new(index, clubs))
                .collect(),
            matchday: 0,
        }
    }

    pub fn total_matchdays(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.matchdays.len())
            .max()
            .unwrap_or(0)
    }

    pub fn bracket_size(&self) -> usize {
        if self.groups.len() * QUALIFIERS_PER_GROUP >= 12 {
            16
        } else {
            8
        }
    }

    /// Winners first, then runners-up, each ranked across groups by their
    /// record. Best third-placed clubs fill a bracket the top two cannot.
    pub fn qualifiers(&self) -> Vec<u32> {
        let by_place = |place: usize| -> Vec<LeagueTableRow> {
            self.groups
                .iter()
                .filter_map(|g| g.standings().into_iter().nth(place))
                .sorted_by(compare_rows)
                .collect()
        };

        let bracket = self.bracket_size();

        by_place(0)
            .into_iter()
            .chain(by_place(1))
            .chain(by_place(2))
            .map(|row| row.club_id)
            .take(bracket)
            .collect()
    }
}

impl TournamentPhase for GroupStage {
    fn play_matchday(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<StageMatch> {
        let matchday = self.matchday;
        let mut played = Vec::new();

        for group in &mut self.groups {
            let Some(fixtures) = group.matchdays.get_mut(matchday) else {
                continue;
            };

            for fixture in fixtures.iter_mut().filter(|f| !f.played) {
                ctx.play(fixture, Venue::Home, false);

                group.table.apply_result(
                    fixture.home_id,
                    fixture.away_id,
                    fixture.score.home,
                    fixture.score.away,
                );

                played.push(StageMatch {
                    label: format!("{} Matchday {}", group.name, matchday + 1),
                    fixture: fixture.clone(),
                });
            }
        }

        self.matchday += 1;

        played
    }

    fn is_finished(&self) -> bool {
        self.matchday >= self.total_matchdays()
    }
}
