use crate::loaders::parse_or_default;
use career_core::reference::{ClubEntry, CompetitionEntry, PlayerEntry};

const STATIC_CLUBS_JSON: &str = include_str!("../../data/clubs.json");
const STATIC_PLAYERS_JSON: &str = include_str!("../../data/players.json");
const STATIC_COMPETITIONS_JSON: &str = include_str!("../../data/competitions.json");

pub struct ClubLoader;

impl ClubLoader {
    pub fn load() -> Vec<ClubEntry> {
        Self::parse(STATIC_CLUBS_JSON)
    }

    pub fn parse(json: &str) -> Vec<ClubEntry> {
        parse_or_default("clubs.json", json)
    }
}

pub struct PlayerLoader;

impl PlayerLoader {
    pub fn load() -> Vec<PlayerEntry> {
        parse_or_default("players.json", STATIC_PLAYERS_JSON)
    }
}

pub struct CompetitionLoader;

impl CompetitionLoader {
    pub fn load() -> Vec<CompetitionEntry> {
        parse_or_default("competitions.json", STATIC_COMPETITIONS_JSON)
    }
}
