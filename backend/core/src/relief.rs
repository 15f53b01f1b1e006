//! Stress-relief interstitials: popping balloons or giving a treat.

use std::time::Duration;

use serde::Serialize;

use crate::schedule::Schedule;

/// Delays for both relief variants.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliefTimings {
    pub balloon_intro: Duration,
    pub balloon_done: Duration,
    pub treat_done: Duration,
}

impl Default for ReliefTimings {
    fn default() -> Self {
        Self {
            balloon_intro: Duration::from_millis(2500),
            balloon_done: Duration::from_millis(500),
            treat_done: Duration::from_millis(1500),
        }
    }
}

// ---------------------------------------------------------------------------
// Balloons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StressLabel {
    pub id: u32,
    pub text: &'static str,
    pub color: &'static str,
}

pub static STRESS_LABELS: [StressLabel; 6] = [
    StressLabel { id: 1, text: "Overthinking", color: "#FFB7C5" },
    StressLabel { id: 2, text: "Capek", color: "#A7C7E7" },
    StressLabel { id: 3, text: "Deadline", color: "#F5D0C5" },
    StressLabel { id: 4, text: "Bad Vibes", color: "#D4C5F5" },
    StressLabel { id: 5, text: "Sedih", color: "#C5E8D4" },
    StressLabel { id: 6, text: "Berisik", color: "#F5E6C5" },
];

#[derive(Debug, Clone)]
pub struct Balloon {
    pub label: &'static StressLabel,
    pub popped: bool,
}

#[derive(Debug)]
enum BalloonStep {
    HideIntro,
    RevealDone,
}

#[derive(Debug)]
pub struct BalloonPop {
    balloons: Vec<Balloon>,
    intro_visible: bool,
    all_popped: bool,
    done_delay: Duration,
    schedule: Schedule<BalloonStep>,
}

impl BalloonPop {
    pub fn new(timings: &ReliefTimings) -> Self {
        let mut schedule = Schedule::new();
        schedule.schedule_in(timings.balloon_intro, BalloonStep::HideIntro);
        Self {
            balloons: STRESS_LABELS
                .iter()
                .map(|label| Balloon { label, popped: false })
                .collect(),
            intro_visible: true,
            all_popped: false,
            done_delay: timings.balloon_done,
            schedule,
        }
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn intro_visible(&self) -> bool {
        self.intro_visible
    }

    pub fn popped_count(&self) -> usize {
        self.balloons.iter().filter(|b| b.popped).count()
    }

    pub fn total(&self) -> usize {
        self.balloons.len()
    }

    /// True once the done card is up and the visitor may continue.
    pub fn can_continue(&self) -> bool {
        self.all_popped
    }

    /// Pops one balloon. No-op during the intro or for an already popped one.
    pub fn pop(&mut self, index: usize) -> bool {
        if self.intro_visible || self.all_popped {
            return false;
        }
        let Some(balloon) = self.balloons.get_mut(index) else {
            return false;
        };
        if balloon.popped {
            return false;
        }
        balloon.popped = true;
        if self.popped_count() == self.total() {
            self.schedule.schedule_in(self.done_delay, BalloonStep::RevealDone);
        }
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        for step in self.schedule.advance(dt) {
            match step {
                BalloonStep::HideIntro => self.intro_visible = false,
                BalloonStep::RevealDone => self.all_popped = true,
            }
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }
}

// ---------------------------------------------------------------------------
// Treats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Treat {
    pub id: &'static str,
    pub emoji: &'static str,
    pub name: &'static str,
}

pub static TREATS: [Treat; 3] = [
    Treat { id: "cookie", emoji: "🍪", name: "Cookie" },
    Treat { id: "milk", emoji: "🥛", name: "Susu" },
    Treat { id: "candy", emoji: "🍭", name: "Permen" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterMood {
    Waiting,
    Happy,
    Done,
}

#[derive(Debug)]
enum TreatStep {
    Finish,
}

#[derive(Debug)]
pub struct HealingTreat {
    selected: Option<&'static Treat>,
    character: CharacterMood,
    done_delay: Duration,
    schedule: Schedule<TreatStep>,
}

impl HealingTreat {
    pub fn new(timings: &ReliefTimings) -> Self {
        Self {
            selected: None,
            character: CharacterMood::Waiting,
            done_delay: timings.treat_done,
            schedule: Schedule::new(),
        }
    }

    pub fn selected(&self) -> Option<&'static Treat> {
        self.selected
    }

    pub fn character(&self) -> CharacterMood {
        self.character
    }

    pub fn can_continue(&self) -> bool {
        self.character == CharacterMood::Done
    }

    /// Gives a treat. Only the first one counts.
    pub fn give(&mut self, index: usize) -> bool {
        if self.selected.is_some() {
            return false;
        }
        let Some(treat) = TREATS.get(index) else {
            return false;
        };
        self.selected = Some(treat);
        self.character = CharacterMood::Happy;
        self.schedule.schedule_in(self.done_delay, TreatStep::Finish);
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        for step in self.schedule.advance(dt) {
            match step {
                TreatStep::Finish => self.character = CharacterMood::Done,
            }
        }
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn balloons_wait_for_intro() {
        let mut b = BalloonPop::new(&ReliefTimings::default());
        assert!(!b.pop(0));
        b.advance(ms(2500));
        assert!(!b.intro_visible());
        assert!(b.pop(0));
        assert!(!b.pop(0), "double pop must be ignored");
        assert!(!b.pop(99));
        assert_eq!(b.popped_count(), 1);
    }

    #[test]
    fn done_card_follows_last_pop() {
        let mut b = BalloonPop::new(&ReliefTimings::default());
        b.advance(ms(3000));
        for i in 0..b.total() {
            assert!(b.pop(i));
        }
        assert!(!b.can_continue());
        assert_eq!(b.time_until_next(), Some(ms(500)));
        b.advance(ms(500));
        assert!(b.can_continue());
        assert!(!b.pop(0));
    }

    #[test]
    fn first_treat_wins() {
        let mut t = HealingTreat::new(&ReliefTimings::default());
        assert_eq!(t.character(), CharacterMood::Waiting);
        assert!(t.give(2));
        assert!(!t.give(0));
        assert_eq!(t.selected().map(|x| x.id), Some("candy"));
        assert_eq!(t.character(), CharacterMood::Happy);
        t.advance(ms(1499));
        assert!(!t.can_continue());
        t.advance(ms(1));
        assert!(t.can_continue());
    }

    #[test]
    fn unknown_treat_is_ignored() {
        let mut t = HealingTreat::new(&ReliefTimings::default());
        assert!(!t.give(3));
        assert_eq!(t.character(), CharacterMood::Waiting);
    }
}
