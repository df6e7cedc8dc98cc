use crate::club::{
    ClubRegistry, DEFAULT_CLUB_RATING, MatchModifiers, ModifierProvider, StaffQuality, Tactics,
    World,
};
use crate::utils::FloatUtils;
use rand::Rng;

/// Half-width of the uniform noise added to every strength draw.
pub const STRENGTH_NOISE: f64 = 2.5;

/// Everything the strength model needs to know about the user's club. Every
/// other club is rated from the registry alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthContext {
    pub user_club_id: Option<u32>,
    pub user_form: f32,
    pub user_modifiers: MatchModifiers,
}

impl StrengthContext {
    pub fn neutral() -> Self {
        StrengthContext {
            user_club_id: None,
            user_form: 0.0,
            user_modifiers: MatchModifiers::NEUTRAL,
        }
    }

    pub fn for_user(world: &World, user_club_id: u32, tactics: &Tactics, staff: &StaffQuality) -> Self {
        StrengthContext {
            user_club_id: Some(user_club_id),
            user_form: world.average_form(user_club_id),
            user_modifiers: tactics.modifiers().combine(staff.modifiers()),
        }
    }

    pub fn is_user(&self, club_id: u32) -> bool {
        self.user_club_id == Some(club_id)
    }
}

impl Default for StrengthContext {
    fn default() -> Self {
        StrengthContext::neutral()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClubStrength {
    pub value: f64,
    pub modifiers: MatchModifiers,
}

pub struct StrengthModel;

impl StrengthModel {
    pub fn base_rating(clubs: &ClubRegistry, club_id: u32) -> f64 {
        clubs
            .get(club_id)
            .map(|c| c.rating)
            .unwrap_or(DEFAULT_CLUB_RATING) as f64
    }

    pub fn strength<R: Rng + ?Sized>(
        clubs: &ClubRegistry,
        club_id: u32,
        ctx: &StrengthContext,
        rng: &mut R,
    ) -> ClubStrength {
        let base = Self::base_rating(clubs, club_id);

        if !ctx.is_user(club_id) {
            return ClubStrength {
                value: base + FloatUtils::symmetric_noise(rng, STRENGTH_NOISE),
                modifiers: MatchModifiers::NEUTRAL,
            };
        }

        let modifiers = ctx.user_modifiers;
        let noise = FloatUtils::symmetric_noise(rng, STRENGTH_NOISE * modifiers.chaos);

        ClubStrength {
            value: base + ctx.user_form as f64 + noise,
            modifiers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;
    use crate::utils::RandomSource;

    fn registry() -> ClubRegistry {
        ClubRegistry::new(vec![
            Club::new(1, "Northfield", "ENG", 10, 70.0),
            Club::new(2, "Southport", "ENG", 10, 60.0),
        ])
    }

    #[test]
    fn other_clubs_stay_within_noise_band() {
        let clubs = registry();
        let ctx = StrengthContext::neutral();
        let mut rng = RandomSource::seeded(3);

        for _ in 0..200 {
            let strength = StrengthModel::strength(&clubs, 2, &ctx, &mut rng);

            assert!(strength.value >= 60.0 - STRENGTH_NOISE);
            assert!(strength.value <= 60.0 + STRENGTH_NOISE);
            assert_eq!(strength.modifiers, MatchModifiers::NEUTRAL);
        }
    }

    #[test]
    fn user_club_gets_form_and_modifiers() {
        let clubs = registry();
        let modifiers = MatchModifiers {
            attack: 1.1,
            defense: 0.9,
            chaos: 0.0,
        };
        let ctx = StrengthContext {
            user_club_id: Some(1),
            user_form: 3.0,
            user_modifiers: modifiers,
        };
        let mut rng = RandomSource::seeded(3);

        let strength = StrengthModel::strength(&clubs, 1, &ctx, &mut rng);

        assert_eq!(strength.value, 73.0);
        assert_eq!(strength.modifiers, modifiers);
    }

    #[test]
    fn unknown_club_uses_default_rating() {
        assert_eq!(StrengthModel::base_rating(&registry(), 42), DEFAULT_CLUB_RATING as f64);
    }
}
