use crate::league::LeagueTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final league tables per season start year and league.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableStore {
    seasons: BTreeMap<u16, BTreeMap<u32, LeagueTable>>,
}

impl TableStore {
    pub fn new() -> Self {
        TableStore::default()
    }

    pub fn snapshot(&mut self, start_year: u16, league_id: u32, table: LeagueTable) {
        self.seasons
            .entry(start_year)
            .or_default()
            .insert(league_id, table);
    }

    pub fn get(&self, start_year: u16, league_id: u32) -> Option<&LeagueTable> {
        self.seasons.get(&start_year).and_then(|s| s.get(&league_id))
    }

    pub fn contains(&self, start_year: u16, league_id: u32) -> bool {
        self.get(start_year, league_id).is_some()
    }

    pub fn season(&self, start_year: u16) -> Option<&BTreeMap<u32, LeagueTable>> {
        self.seasons.get(&start_year)
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_are_keyed_by_year_and_league() {
        let mut store = TableStore::new();
        let table = LeagueTable::new([(1, "Alpha"), (2, "Bravo")]);

        store.snapshot(2025, 10, table.clone());
        store.snapshot(2026, 10, LeagueTable::default());

        assert_eq!(store.get(2025, 10), Some(&table));
        assert!(!store.contains(2025, 11));
        assert!(store.contains(2026, 10));
    }

    #[test]
    fn serialises_with_string_keys() {
        let mut store = TableStore::new();
        store.snapshot(2025, 10, LeagueTable::new([(1, "Alpha")]));

        let json = serde_json::to_string(&store).unwrap();
        let restored: TableStore = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, store);
    }
}
