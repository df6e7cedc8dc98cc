use crate::loaders::PeopleNamesEntity;
use career_core::reference::{ClubEntry, PlayerEntry, PlayerPosition};
use career_core::shared::Money;
use career_core::utils::{IntegerUtils, RandomSource, SimRng};
use log::debug;

/// Squad shape for generated clubs: goalkeepers, defenders, midfielders, forwards.
const SQUAD_SHAPE: [(PlayerPosition, usize); 4] = [
    (PlayerPosition::Goalkeeper, 2),
    (PlayerPosition::Defender, 6),
    (PlayerPosition::Midfielder, 6),
    (PlayerPosition::Forward, 4),
];

pub const SQUAD_SIZE: usize = 18;

const RATING_SPREAD: i32 = 8;
const MIN_AGE: i32 = 18;
const MAX_AGE: i32 = 35;
const WAGE_DIVISOR: Money = 500;

/// Fills squads for clubs the player catalog leaves short. Seeded, so the
/// same catalog always produces the same players.
pub struct PlayerGenerator {
    rng: SimRng,
    names: PeopleNamesEntity,
    next_id: u32,
}

impl PlayerGenerator {
    pub fn new(seed: u64, names: PeopleNamesEntity, first_free_id: u32) -> Self {
        PlayerGenerator {
            rng: RandomSource::seeded(seed),
            names,
            next_id: first_free_id,
        }
    }

    pub fn fill_squads(&mut self, clubs: &[ClubEntry], players: &mut Vec<PlayerEntry>) {
        let mut generated = 0;

        for club in clubs {
            let existing: Vec<PlayerPosition> = players
                .iter()
                .filter(|p| p.club_id == club.id)
                .map(|p| p.position)
                .collect();

            for (position, wanted) in SQUAD_SHAPE {
                let have = existing.iter().filter(|p| **p == position).count();

                for _ in have..wanted {
                    players.push(self.generate(club, position));
                    generated += 1;
                }
            }
        }

        debug!("database: {} players generated", generated);
    }

    pub fn generate(&mut self, club: &ClubEntry, position: PlayerPosition) -> PlayerEntry {
        let base = club.rating.round() as i32;
        let rating = IntegerUtils::random(&mut self.rng, base - RATING_SPREAD, base + RATING_SPREAD + 1).clamp(30, 99);
        let age = IntegerUtils::random(&mut self.rng, MIN_AGE, MAX_AGE + 1);

        let value = Self::market_value(rating, age);

        let id = self.next_id;
        self.next_id += 1;

        PlayerEntry {
            id,
            club_id: club.id,
            name: self.generate_name(),
            position,
            age: age as u8,
            rating: rating as u8,
            value,
            wage: value / WAGE_DIVISOR,
        }
    }

    /// Grows with rating above 50 and peaks in the mid twenties.
    pub fn market_value(rating: i32, age: i32) -> Money {
        let quality = (rating - 45).max(1) as Money;
        let age_factor: Money = match age {
            ..=20 => 80,
            21..=27 => 100,
            28..=30 => 75,
            _ => 40,
        };

        quality * quality * 20_000 * age_factor / 100
    }

    fn generate_name(&mut self) -> String {
        let first = Self::pick(&mut self.rng, &self.names.first_names);
        let last = Self::pick(&mut self.rng, &self.names.last_names);

        match (first, last) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (_, Some(last)) => last.to_string(),
            _ => format!("Player {}", self.next_id - 1),
        }
    }

    fn pick<'n>(rng: &mut SimRng, names: &'n [String]) -> Option<&'n str> {
        if names.is_empty() {
            return None;
        }

        let index = IntegerUtils::random(rng, 0, names.len() as i32) as usize;

        names.get(index).map(String::as_str)
    }
}
