use crate::continent::TournamentFormat;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PROMOTION_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationRules {
    pub tournaments: Vec<TournamentRule>,
    pub confederations: Vec<Confederation>,
    /// Explicit zones per league; first divisions without an entry use `default_zones`.
    pub zones: Vec<LeagueZones>,
    pub default_zones: Vec<QualificationZone>,
    pub promotion_slots: usize,
}

impl Default for QualificationRules {
    fn default() -> Self {
        QualificationRules {
            tournaments: vec![
                TournamentRule::new("champions-cup", "Champions Cup", 1, 32, TournamentFormat::GroupsKo),
                TournamentRule::new("continental-league", "Continental League", 2, 24, TournamentFormat::LeagueKo),
                TournamentRule::new("conference-trophy", "Conference Trophy", 3, 16, TournamentFormat::Ko),
            ],
            confederations: Vec::new(),
            zones: Vec::new(),
            default_zones: vec![
                QualificationZone::new("champions-cup", 1, 4),
                QualificationZone::new("continental-league", 5, 6),
                QualificationZone::new("conference-trophy", 7, 7),
            ],
            promotion_slots: DEFAULT_PROMOTION_SLOTS,
        }
    }
}

impl QualificationRules {
    pub fn zones_for(&self, league_id: u32) -> &[QualificationZone] {
        self.zones
            .iter()
            .find(|z| z.league_id == league_id)
            .map(|z| z.zones.as_slice())
            .unwrap_or(&self.default_zones)
    }

    /// Tournaments ordered from the most to the least prestigious.
    pub fn tournaments_by_tier(&self) -> Vec<&TournamentRule> {
        let mut tournaments: Vec<&TournamentRule> = self.tournaments.iter().collect();
        tournaments.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.id.cmp(&b.id)));
        tournaments
    }

    pub fn tournament(&self, id: &str) -> Option<&TournamentRule> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn confederation(&self, id: &str) -> Option<&Confederation> {
        self.confederations.iter().find(|c| c.id == id)
    }

    /// Whether clubs of `association` may enter `tournament`. A tournament with
    /// no (or an unknown) confederation is open to every association.
    pub fn is_eligible(&self, tournament: &TournamentRule, association: &str) -> bool {
        match tournament.confederation.as_deref().and_then(|id| self.confederation(id)) {
            Some(confederation) => {
                confederation.associations.is_empty()
                    || confederation.associations.iter().any(|a| a == association)
            }
            None => true,
        }
    }

    pub fn guaranteed_slots(&self, tournament: &TournamentRule, association: &str) -> usize {
        tournament
            .confederation
            .as_deref()
            .and_then(|id| self.confederation(id))
            .and_then(|c| {
                c.slots
                    .iter()
                    .find(|s| s.tournament == tournament.id && s.association == association)
            })
            .map(|s| s.guaranteed)
            .unwrap_or(0)
    }

    pub fn promotion_slots(&self) -> usize {
        self.promotion_slots
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub confederation: Option<String>,
    #[serde(default = "default_tier")]
    pub tier: u8,
    pub target_size: usize,
    pub format: TournamentFormat,
    #[serde(default = "default_groups")]
    pub groups: usize,
    #[serde(default = "default_league_phase_rounds")]
    pub league_phase_rounds: usize,
}

fn default_tier() -> u8 {
    1
}

fn default_groups() -> usize {
    8
}

fn default_league_phase_rounds() -> usize {
    8
}

impl TournamentRule {
    pub fn new(id: &str, name: &str, tier: u8, target_size: usize, format: TournamentFormat) -> Self {
        TournamentRule {
            id: id.to_string(),
            name: name.to_string(),
            confederation: None,
            tier,
            target_size,
            format,
            groups: default_groups(),
            league_phase_rounds: default_league_phase_rounds(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confederation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub associations: Vec<String>,
    #[serde(default)]
    pub slots: Vec<AssociationSlots>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationSlots {
    pub tournament: String,
    pub association: String,
    pub guaranteed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueZones {
    pub league_id: u32,
    pub zones: Vec<QualificationZone>,
}

/// Inclusive, 1-based finishing positions that feed a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationZone {
    pub tournament: String,
    pub from: usize,
    pub to: usize,
}

impl QualificationZone {
    pub fn new(tournament: &str, from: usize, to: usize) -> Self {
        QualificationZone {
            tournament: tournament.to_string(),
            from,
            to,
        }
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= self.from && position <= self.to
    }
}
