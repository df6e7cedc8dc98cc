use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: u32,
    pub away: u32,
}

impl Fixture {
    pub fn new(home: u32, away: u32) -> Self {
        Fixture { home, away }
    }

    pub fn reversed(&self) -> Self {
        Fixture {
            home: self.away,
            away: self.home,
        }
    }

    pub fn involves(&self, club_id: u32) -> bool {
        self.home == club_id || self.away == club_id
    }
}

pub type ScheduleRound = Vec<Fixture>;

pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// Circle method: the first slot stays fixed while the rest rotate one
    /// position per round. An odd count gets a bye slot, so one club rests
    /// each round.
    pub fn single_round_robin(club_ids: &[u32]) -> Vec<ScheduleRound> {
        if club_ids.len() < 2 {
            return Vec::new();
        }

        let mut slots: Vec<Option<u32>> = club_ids.iter().copied().map(Some).collect();

        if slots.len() % 2 == 1 {
            slots.push(None);
        }

        let slot_count = slots.len();
        let mut rounds = Vec::with_capacity(slot_count - 1);

        for round in 0..slot_count - 1 {
            let mut fixtures = Vec::with_capacity(slot_count / 2);

            for i in 0..slot_count / 2 {
                let (first, second) = (slots[i], slots[slot_count - 1 - i]);

                if let (Some(first), Some(second)) = (first, second) {
                    // alternate venues so nobody plays every first-leg game at home
                    let fixture = if (round + i) % 2 == 0 {
                        Fixture::new(first, second)
                    } else {
                        Fixture::new(second, first)
                    };

                    fixtures.push(fixture);
                }
            }

            rounds.push(fixtures);

            slots[1..].rotate_right(1);
        }

        rounds
    }

    /// First leg followed by the mirrored second leg.
    pub fn double_round_robin(club_ids: &[u32]) -> Vec<ScheduleRound> {
        let first_leg = Self::single_round_robin(club_ids);

        let second_leg: Vec<ScheduleRound> = first_leg
            .iter()
            .map(|round| round.iter().map(Fixture::reversed).collect())
            .collect();

        first_leg.into_iter().chain(second_leg).collect()
    }
}
