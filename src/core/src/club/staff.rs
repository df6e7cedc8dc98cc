use crate::club::{MatchModifiers, ModifierProvider};
use serde::{Deserialize, Serialize};

const ATTRIBUTE_MIN: u8 = 1;
const ATTRIBUTE_MAX: u8 = 20;
const ATTRIBUTE_AVERAGE: f64 = 10.0;

/// Backroom staff quality on the usual 1..=20 attribute scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffQuality {
    pub coaching: u8,
    pub fitness: u8,
    pub analysis: u8,
}

impl Default for StaffQuality {
    fn default() -> Self {
        StaffQuality {
            coaching: 10,
            fitness: 10,
            analysis: 10,
        }
    }
}

impl StaffQuality {
    pub fn new(coaching: u8, fitness: u8, analysis: u8) -> Self {
        StaffQuality {
            coaching: coaching.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX),
            fitness: fitness.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX),
            analysis: analysis.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX),
        }
    }

    fn deviation(attribute: u8) -> f64 {
        let attribute = attribute.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX) as f64;
        (attribute - ATTRIBUTE_AVERAGE) / ATTRIBUTE_AVERAGE
    }
}

impl ModifierProvider for StaffQuality {
    fn modifiers(&self) -> MatchModifiers {
        // each attribute moves its multiplier by at most 5%
        MatchModifiers {
            attack: 1.0 + Self::deviation(self.coaching) * 0.05,
            defense: 1.0 + Self::deviation(self.fitness) * 0.05,
            chaos: 1.0 - Self::deviation(self.analysis) * 0.2,
        }
    }
}
