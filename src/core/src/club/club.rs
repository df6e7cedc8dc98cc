use crate::reference::ClubEntry;
use crate::shared::Money;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUB_RATING: f32 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub association: String,
    pub league_id: u32,
    pub rating: f32,
    #[serde(default)]
    pub budget: Money,
}

impl Club {
    pub fn new(id: u32, name: &str, association: &str, league_id: u32, rating: f32) -> Self {
        Club {
            id,
            name: name.to_string(),
            association: association.to_string(),
            league_id,
            rating,
            budget: 0,
        }
    }
}

impl From<&ClubEntry> for Club {
    fn from(entry: &ClubEntry) -> Self {
        Club {
            id: entry.id,
            name: entry.name.clone(),
            association: entry.association.clone(),
            league_id: entry.league_id,
            rating: entry.rating,
            budget: entry.budget,
        }
    }
}
