use crate::loaders::parse_or_default;
use serde::Deserialize;

const STATIC_NAMES_JSON: &str = include_str!("../../data/names.json");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleNamesEntity {
    #[serde(default)]
    pub first_names: Vec<String>,
    #[serde(default)]
    pub last_names: Vec<String>,
}

pub struct NamesLoader;

impl NamesLoader {
    pub fn load() -> PeopleNamesEntity {
        parse_or_default("names.json", STATIC_NAMES_JSON)
    }
}
