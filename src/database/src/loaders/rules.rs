use crate::loaders::parse_or_default;
use career_core::reference::{EconomyRules, QualificationRules};

const STATIC_RULES_JSON: &str = include_str!("../../data/rules.json");
const STATIC_QUALIFICATIONS_JSON: &str = include_str!("../../data/qualifications.json");

pub struct RulesLoader;

impl RulesLoader {
    pub fn load() -> EconomyRules {
        Self::parse(STATIC_RULES_JSON)
    }

    pub fn parse(json: &str) -> EconomyRules {
        parse_or_default("rules.json", json)
    }
}

pub struct QualificationLoader;

impl QualificationLoader {
    pub fn load() -> QualificationRules {
        parse_or_default("qualifications.json", STATIC_QUALIFICATIONS_JSON)
    }
}
