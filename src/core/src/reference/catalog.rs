use crate::shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClubEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub association: String,
    pub league_id: u32,
    #[serde(default = "default_rating")]
    pub rating: f32,
    #[serde(default)]
    pub budget: Money,
}

fn default_rating() -> f32 {
    60.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    #[default]
    Midfielder,
    Forward,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerEntry {
    pub id: u32,
    pub club_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: PlayerPosition,
    #[serde(default = "default_age")]
    pub age: u8,
    #[serde(default = "default_player_rating")]
    pub rating: u8,
    #[serde(default)]
    pub value: Money,
    #[serde(default)]
    pub wage: Money,
}

fn default_age() -> u8 {
    25
}

fn default_player_rating() -> u8 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitionEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub association: String,
    /// 1 is the top division.
    #[serde(default = "default_level")]
    pub level: u8,
}

fn default_level() -> u8 {
    1
}
