use crate::career::CareerRecord;
use crate::club::{ClubFinances, StaffQuality, Tactics, World};
use crate::continent::{ContinentalSeason, QualificationResult};
use crate::league::{LeagueMovement, Season, SeasonId, TableStore};
use crate::reference::EconomyRules;
use crate::save::{SaveError, SaveMigration};
use crate::transfers::TransferState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SAVE_VERSION: u32 = 2;

/// Whole-document career state; every mutation is followed by a full rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSave {
    pub version: u32,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    pub user_club_id: u32,
    /// Year the career began.
    pub start_year: u16,
    /// Year of the season currently being played.
    pub current_year: u16,
    #[serde(default)]
    pub world: World,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub tables: TableStore,
    #[serde(default)]
    pub movements: BTreeMap<u16, Vec<LeagueMovement>>,
    #[serde(default)]
    pub qualifications: BTreeMap<u16, QualificationResult>,
    #[serde(default)]
    pub continental: BTreeMap<u16, ContinentalSeason>,
    #[serde(default)]
    pub transfers: TransferState,
    #[serde(default)]
    pub finances: ClubFinances,
    #[serde(default)]
    pub career: CareerRecord,
    #[serde(default)]
    pub tactics: Tactics,
    #[serde(default)]
    pub staff: StaffQuality,
}

impl CareerSave {
    pub fn new(user_club_id: u32, start_year: u16, world: World, finances: ClubFinances, transfers: TransferState) -> Self {
        CareerSave {
            version: SAVE_VERSION,
            updated_at: Utc::now(),
            user_club_id,
            start_year,
            current_year: start_year,
            world,
            season: None,
            tables: TableStore::new(),
            movements: BTreeMap::new(),
            qualifications: BTreeMap::new(),
            continental: BTreeMap::new(),
            transfers,
            finances,
            career: CareerRecord::default(),
            tactics: Tactics::default(),
            staff: StaffQuality::default(),
        }
    }

    pub fn season_id(&self) -> SeasonId {
        SeasonId::new(self.current_year)
    }

    pub fn user_league_id(&self) -> Option<u32> {
        self.world.clubs.get(self.user_club_id).map(|c| c.league_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a document of any known version.
    pub fn from_json(json: &str, rules: &EconomyRules) -> Result<Self, SaveError> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        SaveMigration::migrate(value, rules)
    }
}
