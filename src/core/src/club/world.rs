use crate::club::{ClubRegistry, FORM_DECAY, Player};
use crate::reference::ReferenceData;
use crate::shared::Money;
use serde::{Deserialize, Serialize};

/// Mutable snapshot of every club and player in a career.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub clubs: ClubRegistry,
    #[serde(default)]
    pub players: Vec<Player>,
}

impl World {
    pub fn from_reference(reference: &ReferenceData) -> Self {
        World {
            clubs: ClubRegistry::merge(&reference.clubs, &[]),
            players: reference.players.iter().map(Player::from).collect(),
        }
    }

    /// Re-applies the registry merge to a world loaded from a save.
    pub fn merged_with(mut self, reference: &ReferenceData) -> Self {
        let world_clubs: Vec<_> = self.clubs.iter().cloned().collect();
        self.clubs = ClubRegistry::merge(&reference.clubs, &world_clubs);

        if self.players.is_empty() {
            self.players = reference.players.iter().map(Player::from).collect();
        }

        self
    }

    pub fn squad(&self, club_id: u32) -> Vec<&Player> {
        self.players.iter().filter(|p| p.club_id == club_id).collect()
    }

    pub fn player(&self, player_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_mut(&mut self, player_id: u32) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn move_player(&mut self, player_id: u32, club_id: u32) -> bool {
        match self.player_mut(player_id) {
            Some(player) => {
                player.club_id = club_id;
                true
            }
            None => false,
        }
    }

    pub fn wage_bill(&self, club_id: u32) -> Money {
        self.players
            .iter()
            .filter(|p| p.club_id == club_id)
            .map(|p| p.wage)
            .sum()
    }

    /// Decays the squad's form and adds `shift` after a match.
    pub fn update_form(&mut self, club_id: u32, shift: f32) {
        for player in self.players.iter_mut().filter(|p| p.club_id == club_id) {
            player.set_form(player.form * FORM_DECAY + shift);
        }
    }

    /// Mean form of a squad; an empty squad has neutral form.
    pub fn average_form(&self, club_id: u32) -> f32 {
        let squad = self.squad(club_id);

        if squad.is_empty() {
            return 0.0;
        }

        squad.iter().map(|p| p.form).sum::<f32>() / squad.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Club;
    use crate::reference::PlayerPosition;

    fn player(id: u32, club_id: u32, form: f32, wage: Money) -> Player {
        Player {
            id,
            club_id,
            name: format!("Player {}", id),
            position: PlayerPosition::Midfielder,
            age: 24,
            rating: 65,
            value: 2_000_000,
            wage,
            form,
        }
    }

    fn world() -> World {
        World {
            clubs: ClubRegistry::new(vec![
                Club::new(1, "Northfield", "ENG", 10, 70.0),
                Club::new(2, "Southport", "ENG", 10, 65.0),
            ]),
            players: vec![
                player(1, 1, 2.0, 10_000),
                player(2, 1, -1.0, 15_000),
                player(3, 2, 0.0, 5_000),
            ],
        }
    }

    #[test]
    fn squad_aggregates() {
        let world = world();

        assert_eq!(world.squad(1).len(), 2);
        assert_eq!(world.wage_bill(1), 25_000);
        assert!((world.average_form(1) - 0.5).abs() < f32::EPSILON);
        assert_eq!(world.average_form(3), 0.0);
    }

    #[test]
    fn move_player_changes_club() {
        let mut world = world();

        assert!(world.move_player(3, 1));
        assert_eq!(world.squad(1).len(), 3);
        assert!(world.squad(2).is_empty());
        assert!(!world.move_player(99, 1));
    }

    #[test]
    fn form_decays_before_shift() {
        let mut world = world();

        world.update_form(1, 1.0);

        assert!((world.player(1).unwrap().form - 2.6).abs() < 1e-5);
        assert!((world.player(2).unwrap().form - 0.2).abs() < 1e-5);
        assert_eq!(world.player(3).unwrap().form, 0.0);
    }
}
