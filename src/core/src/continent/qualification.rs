use crate::club::ClubRegistry;
use crate::league::LeagueTable;
use crate::reference::{QualificationRules, ReferenceData, TournamentRule};
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How a club earned its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualificationRoute {
    Guaranteed,
    Merit,
    Backfill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualifiedClub {
    pub club_id: u32,
    pub association: String,
    pub league_position: Option<usize>,
    pub route: QualificationRoute,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentQualification {
    pub tournament_id: String,
    pub target_size: usize,
    pub clubs: Vec<QualifiedClub>,
}

impl TournamentQualification {
    pub fn club_ids(&self) -> Vec<u32> {
        self.clubs.iter().map(|c| c.club_id).collect()
    }
}

/// Participants for one continental season, keyed by the season they play in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationResult {
    pub start_year: u16,
    pub tournaments: Vec<TournamentQualification>,
}

impl QualificationResult {
    pub fn tournament(&self, id: &str) -> Option<&TournamentQualification> {
        self.tournaments.iter().find(|t| t.tournament_id == id)
    }

    pub fn tournament_of(&self, club_id: u32) -> Option<&TournamentQualification> {
        self.tournaments
            .iter()
            .find(|t| t.clubs.iter().any(|c| c.club_id == club_id))
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    club_id: u32,
    association: String,
    rating: f32,
    position: Option<usize>,
}

/// Strongest first; a better finishing position, then the id, break ties.
fn by_strength(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.position.unwrap_or(usize::MAX).cmp(&b.position.unwrap_or(usize::MAX)))
        .then_with(|| a.club_id.cmp(&b.club_id))
}

pub struct QualificationAllocator;

impl QualificationAllocator {
    /// Fills every tournament, most prestigious first:
    /// zone candidates plus the previous tier's overflow form the candidate
    /// list; association guarantees are served first, the rest is filled by
    /// strength; leftovers overflow to the next tier; any shortfall is
    /// backfilled from first-division clubs nobody has taken.
    pub fn allocate(
        start_year: u16,
        reference: &ReferenceData,
        clubs: &ClubRegistry,
        tables: Option<&BTreeMap<u32, LeagueTable>>,
    ) -> QualificationResult {
        let rules = &reference.qualifications;
        let standings = Self::standings(reference, clubs, tables);

        let mut taken: BTreeSet<u32> = BTreeSet::new();
        let mut overflow: Vec<Candidate> = Vec::new();
        let mut tournaments = Vec::new();

        for rule in rules.tournaments_by_tier() {
            let mut candidates: Vec<Candidate> = Vec::new();

            for (league_id, order) in &standings {
                for zone in rules
                    .zones_for(*league_id)
                    .iter()
                    .filter(|z| z.tournament == rule.id)
                {
                    for position in zone.from..=zone.to {
                        let Some(club_id) = order.get(position.wrapping_sub(1)).copied() else {
                            continue;
                        };

                        if let Some(candidate) = Self::candidate(clubs, club_id, Some(position)) {
                            candidates.push(candidate);
                        }
                    }
                }
            }

            candidates.append(&mut overflow);

            let candidates: Vec<Candidate> = candidates
                .into_iter()
                .filter(|c| !taken.contains(&c.club_id) && rules.is_eligible(rule, &c.association))
                .unique_by(|c| c.club_id)
                .collect();

            let (mut selected, leftovers) = Self::select(rules, rule, candidates);
            overflow = leftovers;

            if selected.len() < rule.target_size {
                let needed = rule.target_size - selected.len();
                let backfill = Self::backfill(reference, clubs, rules, rule, &taken, &selected, &overflow, needed);

                if !backfill.is_empty() {
                    warn!(
                        "🎫 {}: {} places backfilled by strength",
                        rule.name,
                        backfill.len()
                    );
                }

                selected.extend(backfill);
            }

            taken.extend(selected.iter().map(|c| c.club_id));

            info!("🎫 {} {}: {} clubs qualified", rule.name, start_year, selected.len());

            tournaments.push(TournamentQualification {
                tournament_id: rule.id.clone(),
                target_size: rule.target_size,
                clubs: selected,
            });
        }

        QualificationResult {
            start_year,
            tournaments,
        }
    }

    /// Final order for every first division, or a rating ranking when no
    /// table is available.
    fn standings(
        reference: &ReferenceData,
        clubs: &ClubRegistry,
        tables: Option<&BTreeMap<u32, LeagueTable>>,
    ) -> BTreeMap<u32, Vec<u32>> {
        reference
            .first_divisions()
            .map(|league| {
                let order = match tables.and_then(|t| t.get(&league.id)) {
                    Some(table) if !table.is_empty() => table.club_ids_in_order(),
                    _ => {
                        warn!("🎫 no table for league {}, ranking clubs by rating", league.name);
                        Self::rating_order(clubs, league.id)
                    }
                };

                (league.id, order)
            })
            .collect()
    }

    pub fn rating_order(clubs: &ClubRegistry, league_id: u32) -> Vec<u32> {
        clubs
            .in_league(league_id)
            .into_iter()
            .sorted_by(|a, b| b.rating.total_cmp(&a.rating).then_with(|| a.id.cmp(&b.id)))
            .map(|c| c.id)
            .collect()
    }

    fn candidate(clubs: &ClubRegistry, club_id: u32, position: Option<usize>) -> Option<Candidate> {
        clubs.get(club_id).map(|club| Candidate {
            club_id,
            association: club.association.clone(),
            rating: club.rating,
            position,
        })
    }

    fn select(
        rules: &QualificationRules,
        rule: &TournamentRule,
        candidates: Vec<Candidate>,
    ) -> (Vec<QualifiedClub>, Vec<Candidate>) {
        let mut selected: Vec<QualifiedClub> = Vec::new();
        let mut pool: Vec<Candidate> = Vec::new();

        let by_association: BTreeMap<String, Vec<Candidate>> = candidates
            .into_iter()
            .into_group_map_by(|c| c.association.clone())
            .into_iter()
            .collect();

        for (association, mut members) in by_association {
            members.sort_by(by_strength);

            let guaranteed = rules
                .guaranteed_slots(rule, &association)
                .min(rule.target_size.saturating_sub(selected.len()))
                .min(members.len());

            let rest = members.split_off(guaranteed);

            selected.extend(members.into_iter().map(|c| Self::qualified(c, QualificationRoute::Guaranteed)));
            pool.extend(rest);
        }

        pool.sort_by(by_strength);

        let open = rule.target_size.saturating_sub(selected.len()).min(pool.len());
        let leftovers = pool.split_off(open);

        selected.extend(pool.into_iter().map(|c| Self::qualified(c, QualificationRoute::Merit)));

        (selected, leftovers)
    }

    #[allow(clippy::too_many_arguments)]
    fn backfill(
        reference: &ReferenceData,
        clubs: &ClubRegistry,
        rules: &QualificationRules,
        rule: &TournamentRule,
        taken: &BTreeSet<u32>,
        selected: &[QualifiedClub],
        overflow: &[Candidate],
        needed: usize,
    ) -> Vec<QualifiedClub> {
        reference
            .first_divisions()
            .flat_map(|league| clubs.in_league(league.id))
            .filter(|club| {
                !taken.contains(&club.id)
                    && !selected.iter().any(|s| s.club_id == club.id)
                    && !overflow.iter().any(|o| o.club_id == club.id)
                    && rules.is_eligible(rule, &club.association)
            })
            .filter_map(|club| Self::candidate(clubs, club.id, None))
            .sorted_by(by_strength)
            .take(needed)
            .map(|c| Self::qualified(c, QualificationRoute::Backfill))
            .collect()
    }

    fn qualified(candidate: Candidate, route: QualificationRoute) -> QualifiedClub {
        QualifiedClub {
            club_id: candidate.club_id,
            association: candidate.association,
            league_position: candidate.position,
            route,
        }
    }
}
