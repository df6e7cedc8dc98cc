use crate::club::Club;
use crate::reference::ClubEntry;
use log::debug;
use serde::{Deserialize, Serialize};

/// Canonical club list for a career. Built once at load time, then mutated
/// only by promotion/relegation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubRegistry {
    clubs: Vec<Club>,
}

impl ClubRegistry {
    pub fn new(clubs: Vec<Club>) -> Self {
        ClubRegistry { clubs }
    }

    /// The world copy wins for every id it knows; catalog clubs the world has
    /// never seen are appended in catalog order.
    pub fn merge(catalog: &[ClubEntry], world: &[Club]) -> Self {
        let mut clubs: Vec<Club> = world.to_vec();

        let appended = catalog
            .iter()
            .filter(|entry| !world.iter().any(|club| club.id == entry.id))
            .map(Club::from)
            .collect::<Vec<Club>>();

        if !appended.is_empty() {
            debug!("club registry: {} catalog clubs added to world", appended.len());
        }

        clubs.extend(appended);

        ClubRegistry { clubs }
    }

    pub fn get(&self, id: u32) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Club> {
        self.clubs.iter_mut().find(|c| c.id == id)
    }

    pub fn name(&self, id: u32) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Club {}", id))
    }

    pub fn in_league(&self, league_id: u32) -> Vec<&Club> {
        self.clubs.iter().filter(|c| c.league_id == league_id).collect()
    }

    pub fn league_club_ids(&self, league_id: u32) -> Vec<u32> {
        self.clubs
            .iter()
            .filter(|c| c.league_id == league_id)
            .map(|c| c.id)
            .collect()
    }

    pub fn set_league(&mut self, club_id: u32, league_id: u32) -> bool {
        match self.get_mut(club_id) {
            Some(club) => {
                club.league_id = league_id;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Club> {
        self.clubs.iter()
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }
}
