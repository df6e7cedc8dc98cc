use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const POINTS_WIN: u32 = 3;
pub const POINTS_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueTableRow {
    pub club_id: u32,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl LeagueTableRow {
    pub fn new(club_id: u32, name: &str) -> Self {
        LeagueTableRow {
            club_id,
            name: name.to_string(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;

        match scored.cmp(&conceded) {
            Ordering::Greater => self.won += 1,
            Ordering::Equal => self.drawn += 1,
            Ordering::Less => self.lost += 1,
        }

        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
        self.points = POINTS_WIN * self.won + POINTS_DRAW * self.drawn;
    }
}

/// Points, goal difference and goals scored descending, then name and id
/// ascending, so no two distinct rows compare equal.
pub fn compare_rows(a: &LeagueTableRow, b: &LeagueTableRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.club_id.cmp(&b.club_id))
}

pub fn sort_standings(rows: &mut [LeagueTableRow]) {
    rows.sort_by(compare_rows);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueTable {
    pub rows: Vec<LeagueTableRow>,
}

impl LeagueTable {
    pub fn new<'a>(clubs: impl IntoIterator<Item = (u32, &'a str)>) -> Self {
        LeagueTable {
            rows: clubs
                .into_iter()
                .map(|(id, name)| LeagueTableRow::new(id, name))
                .collect(),
        }
    }

    pub fn apply_result(&mut self, home_id: u32, away_id: u32, home_goals: u8, away_goals: u8) {
        self.row_mut(home_id).record(home_goals, away_goals);
        self.row_mut(away_id).record(away_goals, home_goals);
    }

    /// Clubs missing from the table get a fresh row named after their id.
    fn row_mut(&mut self, club_id: u32) -> &mut LeagueTableRow {
        let index = match self.rows.iter().position(|r| r.club_id == club_id) {
            Some(index) => index,
            None => {
                self.rows
                    .push(LeagueTableRow::new(club_id, &format!("Club {}", club_id)));
                self.rows.len() - 1
            }
        };

        &mut self.rows[index]
    }

    pub fn get(&self, club_id: u32) -> Option<&LeagueTableRow> {
        self.rows.iter().find(|r| r.club_id == club_id)
    }

    pub fn sorted(&self) -> Vec<LeagueTableRow> {
        let mut rows = self.rows.clone();
        sort_standings(&mut rows);
        rows
    }

    /// 1-based finishing position.
    pub fn position_of(&self, club_id: u32) -> Option<usize> {
        self.sorted()
            .iter()
            .position(|r| r.club_id == club_id)
            .map(|index| index + 1)
    }

    pub fn leader(&self) -> Option<u32> {
        self.rows.iter().min_by(|a, b| compare_rows(a, b)).map(|r| r.club_id)
    }

    pub fn club_ids_in_order(&self) -> Vec<u32> {
        self.sorted().iter().map(|r| r.club_id).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
