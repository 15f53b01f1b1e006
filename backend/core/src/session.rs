//! Session state and the view router.
//!
//! The router is a five-state cycle: landing → mood → stressRelief → chat →
//! ending → landing. Transition functions are the only mutators of the
//! session; a trigger fired from the wrong view is ignored and reported as
//! [`Transition::Ignored`] instead of failing.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::mood::MoodId;
use crate::random::RandomSource;

/// Which screen is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    #[default]
    Landing,
    Mood,
    StressRelief,
    Chat,
    Ending,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| format!("{:?}", self));
        write!(f, "{}", s)
    }
}

/// The mini-interaction shown between mood selection and chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StressReliefVariant {
    Balloon,
    Treat,
}

/// Events that drive the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    NameSubmitted,
    MoodSelected,
    ReliefCompleted,
    ChatCompleted,
    RestartRequested,
}

impl Trigger {
    /// The view this trigger applies to.
    pub fn source_view(&self) -> View {
        match self {
            Trigger::NameSubmitted => View::Landing,
            Trigger::MoodSelected => View::Mood,
            Trigger::ReliefCompleted => View::StressRelief,
            Trigger::ChatCompleted => View::Chat,
            Trigger::RestartRequested => View::Ending,
        }
    }
}

/// Outcome of firing a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: View, to: View },
    Ignored { view: View, trigger: Trigger },
}

impl Transition {
    pub fn advanced(&self) -> bool {
        matches!(self, Transition::Advanced { .. })
    }
}

/// In-memory record of progress through the flow. Discarded on exit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_view: View,
    pub user_name: String,
    pub selected_mood: Option<MoodId>,
    pub stress_relief_variant: Option<StressReliefVariant>,
    pub audio_active: bool,
    pub muted: bool,
}

/// Tunable flow parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    /// Chance that a heavy mood gets the balloon variant.
    pub balloon_probability: f64,
    /// Moods eligible for the balloon variant.
    pub heavy_moods: Vec<MoodId>,
    /// Names are cut to this many characters.
    pub max_name_length: usize,
}

pub const DEFAULT_BALLOON_PROBABILITY: f64 = 0.6;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 20;

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            balloon_probability: DEFAULT_BALLOON_PROBABILITY,
            heavy_moods: vec![MoodId::Burnout, MoodId::SocialAnxiety, MoodId::Loneliness],
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

pub struct Router<S> {
    state: SessionState,
    settings: FlowSettings,
    source: S,
}

impl<S: RandomSource> Router<S> {
    pub fn new(settings: FlowSettings, source: S) -> Self {
        Self {
            state: SessionState::default(),
            settings,
            source,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.current_view
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    /// landing → mood. Blank names (after trimming) are ignored.
    pub fn submit_name(&mut self, raw: &str) -> Transition {
        let name = normalize_name(raw, self.settings.max_name_length);
        if name.is_empty() {
            debug!("Ignoring blank name");
            return self.ignored(Trigger::NameSubmitted);
        }
        if let Some(ignored) = self.guard(Trigger::NameSubmitted) {
            return ignored;
        }
        self.state.user_name = name;
        self.state.audio_active = true;
        self.advance(View::Mood)
    }

    /// mood → stressRelief, drawing the relief variant.
    pub fn select_mood(&mut self, mood: MoodId) -> Transition {
        if let Some(ignored) = self.guard(Trigger::MoodSelected) {
            return ignored;
        }
        let variant = self.choose_variant(mood);
        self.state.selected_mood = Some(mood);
        self.state.stress_relief_variant = Some(variant);
        info!(mood = %mood, variant = ?variant, "Mood selected");
        self.advance(View::StressRelief)
    }

    /// stressRelief → chat.
    pub fn complete_stress_relief(&mut self) -> Transition {
        if let Some(ignored) = self.guard(Trigger::ReliefCompleted) {
            return ignored;
        }
        self.advance(View::Chat)
    }

    /// chat → ending.
    pub fn complete_chat(&mut self) -> Transition {
        if let Some(ignored) = self.guard(Trigger::ChatCompleted) {
            return ignored;
        }
        self.advance(View::Ending)
    }

    /// ending → landing, clearing the session.
    pub fn restart(&mut self) -> Transition {
        if let Some(ignored) = self.guard(Trigger::RestartRequested) {
            return ignored;
        }
        self.state.user_name.clear();
        self.state.selected_mood = None;
        self.state.stress_relief_variant = None;
        self.state.audio_active = false;
        self.state.muted = false;
        self.advance(View::Landing)
    }

    /// Flips the mute flag. Only meaningful while audio is active; returns
    /// the new value, or `None` when there is nothing to mute.
    pub fn toggle_mute(&mut self) -> Option<bool> {
        if !self.state.audio_active {
            return None;
        }
        self.state.muted = !self.state.muted;
        Some(self.state.muted)
    }

    fn choose_variant(&mut self, mood: MoodId) -> StressReliefVariant {
        if !self.settings.heavy_moods.contains(&mood) {
            return StressReliefVariant::Treat;
        }
        if self.source.next_unit() < self.settings.balloon_probability {
            StressReliefVariant::Balloon
        } else {
            StressReliefVariant::Treat
        }
    }

    fn guard(&self, trigger: Trigger) -> Option<Transition> {
        if self.state.current_view == trigger.source_view() {
            None
        } else {
            Some(self.ignored(trigger))
        }
    }

    fn ignored(&self, trigger: Trigger) -> Transition {
        debug!(view = %self.state.current_view, trigger = ?trigger, "Trigger ignored");
        Transition::Ignored {
            view: self.state.current_view,
            trigger,
        }
    }

    fn advance(&mut self, to: View) -> Transition {
        let from = self.state.current_view;
        self.state.current_view = to;
        debug!(from = %from, to = %to, "View changed");
        Transition::Advanced { from, to }
    }
}

/// Caps to `max_chars` characters and trims surrounding whitespace.
pub fn normalize_name(raw: &str, max_chars: usize) -> String {
    let capped: String = raw.trim().chars().take(max_chars).collect();
    capped.trim().to_string()
}
