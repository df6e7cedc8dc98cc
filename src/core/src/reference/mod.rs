//! Read-only reference documents the engine consumes: catalogs of clubs,
//! players and competitions, the continental qualification document and the
//! economy rules. Every field carries a serde default so a partially filled
//! document still loads.

mod catalog;
mod qualification;
mod rules;

pub use catalog::*;
pub use qualification::*;
pub use rules::*;

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub clubs: Vec<ClubEntry>,
    pub players: Vec<PlayerEntry>,
    pub competitions: Vec<CompetitionEntry>,
    pub qualifications: QualificationRules,
    pub rules: EconomyRules,
}

impl ReferenceData {
    pub fn competition(&self, league_id: u32) -> Option<&CompetitionEntry> {
        self.competitions.iter().find(|c| c.id == league_id)
    }

    pub fn first_divisions(&self) -> impl Iterator<Item = &CompetitionEntry> {
        self.competitions.iter().filter(|c| c.level == 1)
    }

    /// Leagues of the same association one division apart, upper league first.
    pub fn linked_pairs(&self) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();

        for upper in &self.competitions {
            if let Some(lower) = self
                .competitions
                .iter()
                .find(|c| c.association == upper.association && c.level == upper.level + 1)
            {
                pairs.push((upper.id, lower.id));
            }
        }

        pairs.sort_unstable();
        pairs
    }

    pub fn league_name(&self, league_id: u32) -> String {
        self.competition(league_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("League {}", league_id))
    }
}
