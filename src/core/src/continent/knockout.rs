use crate::continent::{ContinentalMatch, StageMatch, TournamentContext, TournamentPhase};
use crate::r#match::{Score, Venue};
use crate::utils::IntegerUtils;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub fn round_name(clubs_in_round: usize) -> String {
    match clubs_in_round {
        2 => String::from("Final"),
        4 => String::from("Semi Final"),
        8 => String::from("Quarter Final"),
        n => format!("Round of {}", n),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRound {
    pub name: String,
    pub matches: Vec<ContinentalMatch>,
    /// Top seeds that go straight through when the field is not a power of two.
    #[serde(default)]
    pub byes: Vec<u32>,
}

impl KnockoutRound {
    pub fn is_finished(&self) -> bool {
        self.matches.iter().all(|m| m.played)
    }

    pub fn advancing(&self) -> Vec<u32> {
        self.byes
            .iter()
            .copied()
            .chain(self.matches.iter().filter_map(ContinentalMatch::winner))
            .collect()
    }
}

/// Seeded single-leg bracket. `seeds` is ordered best first and decides both
/// the pairings (best against worst) and who plays at home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knockout {
    pub seeds: Vec<u32>,
    pub rounds: Vec<KnockoutRound>,
    #[serde(default)]
    pub champion: Option<u32>,
}

impl Knockout {
    pub fn seeded(seeds: Vec<u32>) -> Self {
        let mut knockout = Knockout {
            seeds,
            rounds: Vec::new(),
            champion: None,
        };

        let entrants = knockout.seeds.clone();
        knockout.open_round(entrants);

        knockout
    }

    pub fn bracket_size(entrants: usize) -> usize {
        entrants.max(1).next_power_of_two()
    }

    pub fn current_round(&self) -> Option<&KnockoutRound> {
        self.rounds.last()
    }

    fn seed_of(&self, club_id: u32) -> usize {
        self.seeds
            .iter()
            .position(|id| *id == club_id)
            .unwrap_or(usize::MAX)
    }

    fn open_round(&mut self, mut entrants: Vec<u32>) {
        if entrants.len() == 1 {
            self.champion = entrants.first().copied();
            return;
        }

        if entrants.is_empty() {
            return;
        }

        entrants.sort_by_key(|id| self.seed_of(*id));

        let size = Self::bracket_size(entrants.len());
        let byes = size - entrants.len();
        let playing = &entrants[byes..];

        let matches = (0..playing.len() / 2)
            .map(|i| ContinentalMatch::new(playing[i], playing[playing.len() - 1 - i]))
            .collect();

        self.rounds.push(KnockoutRound {
            name: round_name(size),
            matches,
            byes: entrants[..byes].to_vec(),
        });
    }
}

impl TournamentPhase for Knockout {
    fn play_matchday(&mut self, ctx: &mut TournamentContext<'_>) -> Vec<StageMatch> {
        if self.champion.is_some() {
            return Vec::new();
        }

        let Some(round) = self.rounds.last_mut() else {
            return Vec::new();
        };

        let venue = if round.matches.len() == 1 && round.byes.is_empty() {
            Venue::Neutral
        } else {
            Venue::Home
        };

        let mut played = Vec::with_capacity(round.matches.len());

        for fixture in round.matches.iter_mut().filter(|m| !m.played) {
            ctx.play(fixture, venue, true);

            played.push(StageMatch {
                label: round.name.clone(),
                fixture: fixture.clone(),
            });
        }

        let advancing = round.advancing();
        self.open_round(advancing);

        played
    }

    fn is_finished(&self) -> bool {
        self.champion.is_some()
    }
}

pub const PENALTY_TILT_PER_POINT: f64 = 0.01;

pub struct PenaltyShootout;

impl PenaltyShootout {
    /// Shootout score for a drawn tie. The stronger side's chance is tilted
    /// by the rating gap and capped at 65%.
    pub fn decide<R: Rng + ?Sized>(home_rating: f64, away_rating: f64, rng: &mut R) -> Score {
        let home_chance = (0.5 + (home_rating - away_rating) * PENALTY_TILT_PER_POINT).clamp(0.35, 0.65);

        let winner_goals = IntegerUtils::random(rng, 3, 6);
        let loser_goals = IntegerUtils::random(rng, (winner_goals - 2).max(0), winner_goals);

        let (winner_goals, loser_goals) = (winner_goals as u8, loser_goals as u8);

        if rng.gen_bool(home_chance) {
            Score::new(winner_goals, loser_goals)
        } else {
            Score::new(loser_goals, winner_goals)
        }
    }
}
