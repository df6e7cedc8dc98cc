use serde::{Deserialize, Serialize};

/// Multipliers a collaborator applies to the user's club in a match.
/// `attack` scales own expected goals, `defense` divides the opponent's, and
/// `chaos` widens the strength noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchModifiers {
    pub attack: f64,
    pub defense: f64,
    pub chaos: f64,
}

impl MatchModifiers {
    pub const NEUTRAL: MatchModifiers = MatchModifiers {
        attack: 1.0,
        defense: 1.0,
        chaos: 1.0,
    };

    pub fn combine(self, other: MatchModifiers) -> MatchModifiers {
        MatchModifiers {
            attack: self.attack * other.attack,
            defense: self.defense * other.defense,
            chaos: self.chaos * other.chaos,
        }
        .clamped()
    }

    fn clamped(self) -> MatchModifiers {
        MatchModifiers {
            attack: self.attack.clamp(0.5, 1.5),
            defense: self.defense.clamp(0.5, 1.5),
            chaos: self.chaos.clamp(0.25, 3.0),
        }
    }
}

impl Default for MatchModifiers {
    fn default() -> Self {
        MatchModifiers::NEUTRAL
    }
}

pub trait ModifierProvider {
    fn modifiers(&self) -> MatchModifiers;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchTacticType {
    #[default]
    T442,
    T433,
    T451,
    T4231,
    T352,
    T343,
}

impl MatchTacticType {
    fn modifiers(&self) -> MatchModifiers {
        match self {
            MatchTacticType::T442 | MatchTacticType::T4231 => MatchModifiers::NEUTRAL,
            MatchTacticType::T433 => MatchModifiers {
                attack: 1.04,
                defense: 0.98,
                chaos: 1.05,
            },
            MatchTacticType::T451 => MatchModifiers {
                attack: 0.95,
                defense: 1.05,
                chaos: 0.9,
            },
            MatchTacticType::T352 => MatchModifiers {
                attack: 1.02,
                defense: 1.0,
                chaos: 1.0,
            },
            MatchTacticType::T343 => MatchModifiers {
                attack: 1.07,
                defense: 0.94,
                chaos: 1.15,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mentality {
    Defensive,
    #[default]
    Balanced,
    Attacking,
    AllOutAttack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pressing {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tactics {
    #[serde(default)]
    pub tactic_type: MatchTacticType,
    #[serde(default)]
    pub mentality: Mentality,
    #[serde(default)]
    pub pressing: Pressing,
}

impl Tactics {
    pub fn new(tactic_type: MatchTacticType, mentality: Mentality, pressing: Pressing) -> Self {
        Tactics {
            tactic_type,
            mentality,
            pressing,
        }
    }
}

impl ModifierProvider for Tactics {
    fn modifiers(&self) -> MatchModifiers {
        let mentality = match self.mentality {
            Mentality::Defensive => MatchModifiers {
                attack: 0.9,
                defense: 1.1,
                chaos: 0.85,
            },
            Mentality::Balanced => MatchModifiers::NEUTRAL,
            Mentality::Attacking => MatchModifiers {
                attack: 1.08,
                defense: 0.95,
                chaos: 1.1,
            },
            Mentality::AllOutAttack => MatchModifiers {
                attack: 1.15,
                defense: 0.85,
                chaos: 1.3,
            },
        };

        let pressing = match self.pressing {
            Pressing::Low => MatchModifiers {
                attack: 0.97,
                defense: 1.03,
                chaos: 0.95,
            },
            Pressing::Medium => MatchModifiers::NEUTRAL,
            Pressing::High => MatchModifiers {
                attack: 1.04,
                defense: 1.01,
                chaos: 1.1,
            },
        };

        self.tactic_type
            .modifiers()
            .combine(mentality)
            .combine(pressing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tactics_are_neutral() {
        assert_eq!(Tactics::default().modifiers(), MatchModifiers::NEUTRAL);
    }

    #[test]
    fn all_out_attack_trades_defense_for_attack() {
        let tactics = Tactics::new(MatchTacticType::T343, Mentality::AllOutAttack, Pressing::High);
        let modifiers = tactics.modifiers();

        assert!(modifiers.attack > 1.0);
        assert!(modifiers.defense < 1.0);
        assert!(modifiers.chaos > 1.0);
    }

    #[test]
    fn combined_modifiers_stay_bounded() {
        let extreme = MatchModifiers {
            attack: 3.0,
            defense: 0.1,
            chaos: 10.0,
        };

        let combined = extreme.combine(extreme);

        assert_eq!(combined.attack, 1.5);
        assert_eq!(combined.defense, 0.5);
        assert_eq!(combined.chaos, 3.0);
    }
}
