//! Mood grid with the daily affirmation card.

use std::time::Duration;

use chrono::NaiveDate;

use crate::affirmation::{daily_affirmation, random_affirmation, Affirmation};
use crate::mood::{MoodId, MOODS};
use crate::random::RandomSource;
use crate::schedule::Schedule;

const GRID_COLUMNS: usize = 2;

/// Fade-out before a refreshed affirmation appears.
pub const AFFIRMATION_REFRESH_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
enum PickerStep {
    RevealAffirmation(&'static Affirmation),
}

#[derive(Debug)]
pub struct MoodPicker {
    highlighted: usize,
    affirmation: &'static Affirmation,
    refreshing: bool,
    schedule: Schedule<PickerStep>,
}

impl MoodPicker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            highlighted: 0,
            affirmation: daily_affirmation(today),
            refreshing: false,
            schedule: Schedule::new(),
        }
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn current(&self) -> MoodId {
        MOODS[self.highlighted].id
    }

    /// Moves the highlight around the 2x2 grid, wrapping at the edges.
    pub fn move_highlight(&mut self, direction: Direction) {
        let rows = MOODS.len().div_ceil(GRID_COLUMNS);
        let (mut row, mut col) = (self.highlighted / GRID_COLUMNS, self.highlighted % GRID_COLUMNS);
        match direction {
            Direction::Left => col = (col + GRID_COLUMNS - 1) % GRID_COLUMNS,
            Direction::Right => col = (col + 1) % GRID_COLUMNS,
            Direction::Up => row = (row + rows - 1) % rows,
            Direction::Down => row = (row + 1) % rows,
        }
        self.highlighted = (row * GRID_COLUMNS + col).min(MOODS.len() - 1);
    }

    /// Jumps straight to a tile; out-of-range indices are ignored.
    pub fn highlight(&mut self, index: usize) -> bool {
        if index < MOODS.len() {
            self.highlighted = index;
            true
        } else {
            false
        }
    }

    /// `None` while a refresh is fading.
    pub fn affirmation(&self) -> Option<&'static Affirmation> {
        (!self.refreshing).then_some(self.affirmation)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Swaps in a random affirmation after a short fade. Ignored mid-refresh.
    pub fn refresh<S: RandomSource + ?Sized>(&mut self, source: &mut S) -> bool {
        if self.refreshing {
            return false;
        }
        self.refreshing = true;
        let next = random_affirmation(source);
        self.schedule
            .schedule_in(AFFIRMATION_REFRESH_DELAY, PickerStep::RevealAffirmation(next));
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        for step in self.schedule.advance(dt) {
            match step {
                PickerStep::RevealAffirmation(next) => {
                    self.affirmation = next;
                    self.refreshing = false;
                }
            }
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }
}
