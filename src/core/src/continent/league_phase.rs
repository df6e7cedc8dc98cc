use crate::continent::{ContinentalMatch, Participant, StageMatch, TournamentContext, TournamentPhase};
use crate::league::LeagueTable;
use crate::r#match::Venue;
use log::warn;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const PAIRING_ATTEMPTS: usize = 200;
pub const LARGE_FIELD: usize = 20;

/// Single shared table; every club meets a different opponent each round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaguePhase {
    pub club_ids: Vec<u32>,
    pub table: LeagueTable,
    pub rounds: Vec<Vec<ContinentalMatch>>,
    pub total_rounds: usize,
    /// Rounds that had to repeat an opponent.
    #[serde(default)]
    pub fallback_rounds: usize,
}

impl LeaguePhase {
    pub fn new(participants: &[Participant], configured_rounds: usize) -> Self {
        LeaguePhase {
            club_ids: participants.iter().map(|p| p.club_id).collect(),
            table: LeagueTable::new(participants.iter().map(|p| (p.club_id, p.name.as_str()))),
            rounds: Vec::new(),
            total_rounds: configured_rounds.min(participants.len().saturating_sub(1)),
            fallback_rounds: 0,
        }
    }

    pub fn has_met(&self, a: u32, b: u32) -> bool {
        self.rounds
            .iter()
            .flatten()
            .any(|m| (m.home_id == a && m.away_id == b) || (m.home_id == b && m.away_id == a))
    }

    /// Random pairing without repeat opponents. After `PAIRING_ATTEMPTS`
    /// failed shuffles the round is paired in shuffled order, repeats allowed.
    pub fn pair_round<R: Rng + ?Sized>(&self, rng: &mut R) -> (Vec<(u32, u32)>, bool) {
        let mut ids = self.club_ids.clone();

        for _ in 0..PAIRING_ATTEMPTS {
            ids.shuffle(rng);

            if let Some(pairs) = self.greedy_pairs(&ids) {
                return (pairs, false);
            }
        }

        ids.shuffle(rng);

        let pairs = ids.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();

        (pairs, true)
    }

    fn greedy_pairs(&self, ids: &[u32]) -> Option<Vec<(u32, u32)>> {
        let mut used = BTreeSet::new();
        let mut pairs = Vec::with_capacity(ids.len() / 2);

        for (index, &club) in ids.iter().enumerate() {
            if used.contains(&club) {
                continue;
            }

            let opponent = ids[index + 1..]
                .iter()
                .copied()
                .find(|other| !used.contains(other) && !self.has_met(club, *other));

            match opponent {
                Some(opponent) => {
                    used.insert(club);
                    used.insert(opponent);
                    pairs.push((club, opponent));
                }
                // an odd field leaves exactly one club without a match
                None if used.len() + 1 == ids.len() && ids.len() % 2 == 1 => {
                    used.insert(club);
                }
                None => return None,
            }
        }

        Some(pairs)
    }

    /// Top 16 advance from a field of 20 or more, otherwise the top 8.
    pub fn qualifiers(&self) -> Vec<u32> {
        let advance = if self.club_ids.len() >= LARGE_FIELD {
            16
        } else {
            8
        };

        self.table
            .club_ids_in_order()
            .into_iter()
            .take(advance)
            .collect()
    }
}

impl TournamentPhase for LeaguePhase {
    fn play_matchday(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<StageMatch> {
        if self.is_finished() {
            return Vec::new();
        }

        let (pairs, fallback) = self.pair_round(ctx.rng);
        let round_number = self.rounds.len() + 1;

        if fallback {
            self.fallback_rounds += 1;
            warn!(
                "league phase round {}: no pairing without repeat opponents after {} attempts",
                round_number, PAIRING_ATTEMPTS
            );
        }

        let mut fixtures: Vec<ContinentalMatch> = pairs
            .into_iter()
            .map(|(home, away)| ContinentalMatch::new(home, away))
            .collect();

        let mut played = Vec::with_capacity(fixtures.len());

        for fixture in fixtures.iter_mut() {
            ctx.play(fixture, Venue::Home, false);

            self.table.apply_result(
                fixture.home_id,
                fixture.away_id,
                fixture.score.home,
                fixture.score.away,
            );

            played.push(StageMatch {
                label: format!("League Phase Round {}", round_number),
                fixture: fixture.clone(),
            });
        }

        self.rounds.push(fixtures);

        played
    }

    fn is_finished(&self) -> bool {
        self.rounds.len() >= self.total_rounds
    }
}
