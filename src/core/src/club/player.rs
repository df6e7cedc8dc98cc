use crate::reference::{PlayerEntry, PlayerPosition};
use crate::shared::Money;
use serde::{Deserialize, Serialize};

/// Form is kept in `[-FORM_LIMIT, FORM_LIMIT]` and added to the club rating.
pub const FORM_LIMIT: f32 = 5.0;

/// Share of the previous form kept after each match.
pub const FORM_DECAY: f32 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub club_id: u32,
    pub name: String,
    pub position: PlayerPosition,
    pub age: u8,
    pub rating: u8,
    pub value: Money,
    pub wage: Money,
    #[serde(default)]
    pub form: f32,
}

impl Player {
    pub fn set_form(&mut self, form: f32) {
        self.form = form.clamp(-FORM_LIMIT, FORM_LIMIT);
    }
}

impl From<&PlayerEntry> for Player {
    fn from(entry: &PlayerEntry) -> Self {
        Player {
            id: entry.id,
            club_id: entry.club_id,
            name: entry.name.clone(),
            position: entry.position,
            age: entry.age,
            rating: entry.rating,
            value: entry.value,
            wage: entry.wage,
            form: 0.0,
        }
    }
}
