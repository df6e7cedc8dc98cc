use crate::club::ClubRegistry;
use crate::league::LeagueTable;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueMovement {
    pub upper_league_id: u32,
    pub lower_league_id: u32,
    pub promoted: Vec<u32>,
    pub relegated: Vec<u32>,
}

pub struct PromotionRelegation;

impl PromotionRelegation {
    /// Top `slots` of the lower table against the bottom `slots` of the
    /// upper one. The count shrinks only when a table is too small, so both
    /// directions always move the same number of clubs.
    pub fn swap(
        upper_league_id: u32,
        upper: &LeagueTable,
        lower_league_id: u32,
        lower: &LeagueTable,
        slots: usize,
    ) -> LeagueMovement {
        let upper_order = upper.club_ids_in_order();
        let lower_order = lower.club_ids_in_order();

        let count = slots.min(upper_order.len()).min(lower_order.len());

        LeagueMovement {
            upper_league_id,
            lower_league_id,
            promoted: lower_order[..count].to_vec(),
            relegated: upper_order[upper_order.len() - count..].to_vec(),
        }
    }

    pub fn apply(movement: &LeagueMovement, clubs: &mut ClubRegistry) {
        for club_id in &movement.promoted {
            clubs.set_league(*club_id, movement.upper_league_id);
        }

        for club_id in &movement.relegated {
            clubs.set_league(*club_id, movement.lower_league_id);
        }

        info!(
            "🔼 League {}: promoted {:?}, relegated {:?}",
            movement.upper_league_id, movement.promoted, movement.relegated
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;

    fn league(ids: std::ops::RangeInclusive<u32>, league_id: u32) -> (Vec<Club>, LeagueTable) {
        let clubs: Vec<Club> = ids
            .map(|id| Club::new(id, &format!("Club {:02}", id), "ENG", league_id, 60.0))
            .collect();

        let mut table = LeagueTable::new(clubs.iter().map(|c| (c.id, c.name.as_str())));

        // lower id finishes higher: every club beats each higher id once
        let ids: Vec<u32> = clubs.iter().map(|c| c.id).collect();
        for (i, home) in ids.iter().enumerate() {
            for away in &ids[i + 1..] {
                table.apply_result(*home, *away, 1, 0);
            }
        }

        (clubs, table)
    }

    #[test]
    fn swaps_configured_count_each_way() {
        let (upper_clubs, upper) = league(1..=10, 1);
        let (lower_clubs, lower) = league(11..=20, 2);
        let mut registry = ClubRegistry::new(upper_clubs.into_iter().chain(lower_clubs).collect());

        let movement = PromotionRelegation::swap(1, &upper, 2, &lower, 4);

        assert_eq!(movement.promoted, vec![11, 12, 13, 14]);
        assert_eq!(movement.relegated, vec![7, 8, 9, 10]);

        PromotionRelegation::apply(&movement, &mut registry);

        assert_eq!(registry.league_club_ids(1).len(), 10);
        assert_eq!(registry.league_club_ids(2).len(), 10);
        assert_eq!(registry.get(11).map(|c| c.league_id), Some(1));
        assert_eq!(registry.get(10).map(|c| c.league_id), Some(2));
        assert_eq!(registry.get(15).map(|c| c.league_id), Some(2));
        assert_eq!(registry.get(6).map(|c| c.league_id), Some(1));
    }

    #[test]
    fn small_tables_shrink_the_swap_evenly() {
        let (_, upper) = league(1..=10, 1);
        let (_, lower) = league(11..=13, 2);

        let movement = PromotionRelegation::swap(1, &upper, 2, &lower, 4);

        assert_eq!(movement.promoted.len(), 3);
        assert_eq!(movement.relegated.len(), 3);
    }
}
