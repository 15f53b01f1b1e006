//! TUI App State
//!
//! Owns the session router, the mounted screen and the ambient audio. Key
//! handlers call the action methods here; the event loop drives `advance`.

use chrono::NaiveDate;
use harimu_core::{
    AudioController, AudioOutput, AudioSettings, BalloonPop, ChatScreen, ChatTimings, Direction,
    EndingScreen, EndingSettings, EndingSignal, FlowSettings, HealingTreat, LandingForm, MoodId,
    MoodPicker, RandomSource, ReliefTimings, RngSource, Router, SessionState, SilentOutput,
    StressReliefVariant, Transition, View, script_for,
};
use harimu_logging::{SessionEvent, SessionEventLogger};
use std::time::Duration;
use tracing::warn;

use crate::link::{LinkOpener, SystemOpener};

/// Wake-up interval while a volume fade is running.
pub const FADE_FRAME: Duration = Duration::from_millis(30);

pub type DynSource = Box<dyn RandomSource>;
pub type DynOutput = Box<dyn AudioOutput>;

/// Session tunables, already resolved from config.
#[derive(Debug, Clone, Default)]
pub struct AppSettings {
    pub flow: FlowSettings,
    pub chat: ChatTimings,
    pub relief: ReliefTimings,
    pub ending: EndingSettings,
    pub audio: AudioSettings,
}

/// The mounted screen. Replacing it drops the old one along with its timers.
pub enum Screen {
    Landing(LandingForm),
    Mood(MoodPicker),
    Balloon(BalloonPop),
    Treat(HealingTreat),
    Chat { chat: ChatScreen, cursor: usize },
    Ending(EndingScreen),
}

impl Screen {
    fn advance(&mut self, dt: Duration) -> Vec<EndingSignal> {
        match self {
            Screen::Landing(_) => {}
            Screen::Mood(picker) => picker.advance(dt),
            Screen::Balloon(balloons) => balloons.advance(dt),
            Screen::Treat(treat) => treat.advance(dt),
            Screen::Chat { chat, .. } => chat.advance(dt),
            Screen::Ending(ending) => return ending.advance(dt),
        }
        Vec::new()
    }

    fn time_until_next(&self) -> Option<Duration> {
        match self {
            Screen::Landing(_) => None,
            Screen::Mood(picker) => picker.time_until_next(),
            Screen::Balloon(balloons) => balloons.time_until_next(),
            Screen::Treat(treat) => treat.time_until_next(),
            Screen::Chat { chat, .. } => chat.time_until_next(),
            Screen::Ending(ending) => ending.time_until_next(),
        }
    }
}

pub struct AppState {
    router: Router<DynSource>,
    affirmation_source: DynSource,
    screen: Screen,
    audio: AudioController<DynOutput>,
    opener: Box<dyn LinkOpener>,
    events: SessionEventLogger,
    settings: AppSettings,
    today: NaiveDate,
    clock: Duration,
    /// One-line notice shown in the footer until the next key press.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(settings: AppSettings, session_id: impl Into<String>, today: NaiveDate) -> Self {
        let router = Router::new(
            settings.flow.clone(),
            Box::new(RngSource::from_entropy()) as DynSource,
        );
        let audio = AudioController::new(
            Box::new(SilentOutput::default()) as DynOutput,
            settings.audio.clone(),
        );
        Self {
            router,
            affirmation_source: Box::new(RngSource::from_entropy()),
            screen: Screen::Landing(LandingForm::new(settings.flow.max_name_length)),
            audio,
            opener: Box::new(SystemOpener),
            events: SessionEventLogger::new(session_id),
            settings,
            today,
            clock: Duration::ZERO,
            status: None,
            should_quit: false,
        }
    }

    /// Replaces both random sources. Only meaningful before the first action.
    pub fn with_sources(mut self, variant: DynSource, affirmation: DynSource) -> Self {
        self.router = Router::new(self.settings.flow.clone(), variant);
        self.affirmation_source = affirmation;
        self
    }

    pub fn with_audio_output(mut self, output: DynOutput) -> Self {
        self.audio = AudioController::new(output, self.settings.audio.clone());
        self
    }

    pub fn with_opener(mut self, opener: Box<dyn LinkOpener>) -> Self {
        self.opener = opener;
        self
    }

    pub fn view(&self) -> View {
        self.router.view()
    }

    pub fn session(&self) -> &SessionState {
        self.router.state()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn audio(&self) -> &AudioController<DynOutput> {
        &self.audio
    }

    pub fn session_id(&self) -> &str {
        self.events.session_id()
    }

    // ---------------------------------------------------------------------
    // Global
    // ---------------------------------------------------------------------

    /// Every key press: clears the notice and retries blocked playback.
    pub fn interaction(&mut self) {
        self.status = None;
        let was_playing = self.audio.is_playing();
        self.audio.on_user_interaction();
        if self.audio.is_playing() != was_playing {
            self.log_audio_state();
        }
    }

    pub fn toggle_mute(&mut self) {
        let Some(muted) = self.router.toggle_mute() else {
            return;
        };
        self.audio.set_muted(muted);
        self.log_audio_state();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Moves the session clock forward and fires whatever came due.
    pub fn advance(&mut self, dt: Duration) {
        self.clock += dt;
        for signal in self.screen.advance(dt) {
            match signal {
                EndingSignal::SecretRevealed => self.audio.lower_volume(self.clock),
            }
        }
        self.audio.tick(self.clock);
    }

    /// Time until the next scheduled reveal or fade step, if anything is pending.
    pub fn time_until_next(&self) -> Option<Duration> {
        let fade = self.audio.fade_remaining(self.clock).map(|r| r.min(FADE_FRAME));
        match (self.screen.time_until_next(), fade) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ---------------------------------------------------------------------
    // Landing
    // ---------------------------------------------------------------------

    pub fn type_char(&mut self, c: char) {
        if let Screen::Landing(form) = &mut self.screen {
            form.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Screen::Landing(form) = &mut self.screen {
            form.backspace();
        }
    }

    pub fn submit_name(&mut self) {
        let Screen::Landing(form) = &self.screen else {
            return;
        };
        let Some(name) = form.submit() else {
            return;
        };
        let transition = self.router.submit_name(&name);
        self.apply(transition);
    }

    // ---------------------------------------------------------------------
    // Mood
    // ---------------------------------------------------------------------

    pub fn move_highlight(&mut self, direction: Direction) {
        if let Screen::Mood(picker) = &mut self.screen {
            picker.move_highlight(direction);
        }
    }

    pub fn select_highlighted_mood(&mut self) {
        let Screen::Mood(picker) = &self.screen else {
            return;
        };
        let mood = picker.current();
        let transition = self.router.select_mood(mood);
        self.apply(transition);
    }

    /// Jumps to tile `index` and picks it in one step.
    pub fn pick_mood(&mut self, index: usize) {
        let Screen::Mood(picker) = &mut self.screen else {
            return;
        };
        if picker.highlight(index) {
            self.select_highlighted_mood();
        }
    }

    pub fn refresh_affirmation(&mut self) {
        if let Screen::Mood(picker) = &mut self.screen {
            picker.refresh(&mut self.affirmation_source);
        }
    }

    // ---------------------------------------------------------------------
    // Stress relief
    // ---------------------------------------------------------------------

    pub fn pop_balloon(&mut self, index: usize) {
        if let Screen::Balloon(balloons) = &mut self.screen {
            balloons.pop(index);
        }
    }

    pub fn give_treat(&mut self, index: usize) {
        if let Screen::Treat(treat) = &mut self.screen {
            treat.give(index);
        }
    }

    pub fn continue_relief(&mut self) {
        let ready = match &self.screen {
            Screen::Balloon(balloons) => balloons.can_continue(),
            Screen::Treat(treat) => treat.can_continue(),
            _ => false,
        };
        if ready {
            let transition = self.router.complete_stress_relief();
            self.apply(transition);
        }
    }

    // ---------------------------------------------------------------------
    // Chat
    // ---------------------------------------------------------------------

    pub fn move_choice(&mut self, delta: isize) {
        if let Screen::Chat { chat, cursor } = &mut self.screen {
            let len = chat.script().user_choices.len();
            if len > 0 && chat.choices_visible() {
                *cursor = (*cursor as isize + delta).rem_euclid(len as isize) as usize;
            }
        }
    }

    pub fn choose(&mut self, index: usize) {
        let Screen::Chat { chat, cursor } = &mut self.screen else {
            return;
        };
        match chat.select_choice(index) {
            Ok(true) => {
                *cursor = index;
                let script = chat.script();
                let text = script.user_choices[index].text.to_string();
                self.events.log_event(SessionEvent::ChoiceSelected {
                    mood: script.mood.to_string(),
                    index,
                    text,
                });
            }
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Ignoring chat choice"),
        }
    }

    /// Enter on the chat screen: pick the highlighted reply, or finish.
    pub fn confirm_chat(&mut self) {
        let Screen::Chat { chat, cursor } = &self.screen else {
            return;
        };
        if chat.is_complete() {
            self.complete_chat();
        } else if chat.choices_visible() {
            let index = *cursor;
            self.choose(index);
        }
    }

    pub fn complete_chat(&mut self) {
        let Screen::Chat { chat, .. } = &self.screen else {
            return;
        };
        if chat.is_complete() {
            let transition = self.router.complete_chat();
            self.apply(transition);
        }
    }

    // ---------------------------------------------------------------------
    // Ending
    // ---------------------------------------------------------------------

    pub fn send_hug(&mut self) {
        if let Screen::Ending(ending) = &mut self.screen {
            ending.send_hug();
        }
    }

    pub fn open_profile(&mut self) {
        let Screen::Ending(ending) = &self.screen else {
            return;
        };
        let Some(url) = ending.profile_link().map(str::to_string) else {
            return;
        };
        self.status = Some(match self.opener.open(&url) {
            Ok(()) => format!("Membuka {url}"),
            Err(e) => {
                warn!(error = %e, "Failed to open profile link");
                format!("Gagal membuka {url}")
            }
        });
    }

    /// Only offered once the hug has been sent.
    pub fn restart(&mut self) {
        let Screen::Ending(ending) = &self.screen else {
            return;
        };
        if !ending.hug_sent() {
            return;
        }
        let transition = self.router.restart();
        self.apply(transition);
    }

    // ---------------------------------------------------------------------
    // Transitions
    // ---------------------------------------------------------------------

    fn apply(&mut self, transition: Transition) {
        let Transition::Advanced { from, to } = transition else {
            return;
        };
        self.events.log_event(SessionEvent::ViewChanged {
            from: from.to_string(),
            to: to.to_string(),
        });

        match to {
            View::Mood => {
                self.events.set_visitor(Some(&self.router.state().user_name));
                self.audio.activate();
                self.log_audio_state();
            }
            View::StressRelief => {
                let state = self.router.state();
                if let (Some(mood), Some(variant)) = (state.selected_mood, state.stress_relief_variant) {
                    self.events.log_event(SessionEvent::MoodSelected {
                        mood: mood.to_string(),
                    });
                    self.events.log_event(SessionEvent::ReliefChosen {
                        variant: variant_name(variant).to_string(),
                    });
                }
            }
            View::Landing => {
                self.audio.deactivate();
                self.audio.restore_volume(self.clock);
                self.events.log_event(SessionEvent::Restarted);
                self.events.set_visitor(None);
                self.log_audio_state();
            }
            View::Chat | View::Ending => {}
        }

        self.screen = self.mount(to);
    }

    fn mount(&self, view: View) -> Screen {
        let state = self.router.state();
        match view {
            View::Landing => Screen::Landing(LandingForm::new(self.settings.flow.max_name_length)),
            View::Mood => Screen::Mood(MoodPicker::new(self.today)),
            View::StressRelief => match state.stress_relief_variant {
                Some(StressReliefVariant::Balloon) => {
                    Screen::Balloon(BalloonPop::new(&self.settings.relief))
                }
                _ => Screen::Treat(HealingTreat::new(&self.settings.relief)),
            },
            View::Chat => {
                let mood = state.selected_mood.unwrap_or_else(|| {
                    warn!("Chat mounted without a mood; using the first script");
                    MoodId::ALL[0]
                });
                Screen::Chat {
                    chat: ChatScreen::new(script_for(mood), self.settings.chat.clone()),
                    cursor: 0,
                }
            }
            View::Ending => Screen::Ending(EndingScreen::new(self.settings.ending.clone())),
        }
    }

    fn log_audio_state(&self) {
        self.events.log_event(SessionEvent::AudioStateChanged {
            active: self.audio.is_active(),
            playing: self.audio.is_playing(),
            muted: self.audio.is_muted(),
        });
    }
}

fn variant_name(variant: StressReliefVariant) -> &'static str {
    match variant {
        StressReliefVariant::Balloon => "balloon",
        StressReliefVariant::Treat => "treat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::RecordingOpener;
    use harimu_core::{Author, CharacterMood, ChatStage, FixedSource};
    use std::path::PathBuf;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn app(draw: f64) -> AppState {
        let settings = AppSettings {
            audio: AudioSettings {
                asset_path: Some(PathBuf::from("lofi.mp3")),
                ..Default::default()
            },
            ..Default::default()
        };
        AppState::new(settings, "test-session", date())
            .with_sources(Box::new(FixedSource(draw)), Box::new(FixedSource(0.0)))
    }

    fn enter_name(app: &mut AppState, name: &str) {
        for c in name.chars() {
            app.type_char(c);
        }
        app.submit_name();
    }

    fn to_chat(app: &mut AppState) {
        enter_name(app, "Alya");
        app.select_highlighted_mood();
        app.give_treat(0);
        app.advance(Duration::from_millis(1500));
        app.continue_relief();
        assert_eq!(app.view(), View::Chat);
    }

    #[test]
    fn name_submission_starts_audio() {
        let mut app = app(0.9);
        enter_name(&mut app, "  Alya ");
        assert_eq!(app.view(), View::Mood);
        assert_eq!(app.session().user_name, "Alya");
        assert!(app.session().audio_active);
        assert!(app.audio().is_playing());
        assert!(matches!(app.screen(), Screen::Mood(_)));
    }

    #[test]
    fn blank_name_stays_on_landing() {
        let mut app = app(0.9);
        enter_name(&mut app, "   ");
        assert_eq!(app.view(), View::Landing);
        assert!(!app.audio().is_active());
    }

    #[test]
    fn heavy_mood_with_low_draw_mounts_balloons() {
        let mut app = app(0.1);
        enter_name(&mut app, "Alya");
        // Highlight starts on burnout.
        app.select_highlighted_mood();
        assert_eq!(app.view(), View::StressRelief);
        assert!(matches!(app.screen(), Screen::Balloon(_)));

        app.advance(Duration::from_millis(2500));
        for i in 0..6 {
            app.pop_balloon(i);
        }
        app.continue_relief();
        assert_eq!(app.view(), View::StressRelief, "continue waits for the done card");
        app.advance(Duration::from_millis(500));
        app.continue_relief();
        assert_eq!(app.view(), View::Chat);
    }

    #[test]
    fn self_love_always_gets_treat() {
        let mut app = app(0.0);
        enter_name(&mut app, "Alya");
        app.move_highlight(Direction::Down);
        app.select_highlighted_mood();
        assert_eq!(app.session().selected_mood, Some(MoodId::SelfLove));
        let Screen::Treat(treat) = app.screen() else {
            panic!("expected treat screen");
        };
        assert_eq!(treat.character(), CharacterMood::Waiting);
    }

    #[test]
    fn chat_runs_to_ending() {
        let mut app = app(0.9);
        to_chat(&mut app);

        app.confirm_chat();
        app.advance(Duration::from_millis(1700));
        app.move_choice(1);
        app.confirm_chat();
        app.advance(Duration::from_secs(5));

        let Screen::Chat { chat, .. } = app.screen() else {
            panic!("expected chat screen");
        };
        assert_eq!(chat.stage(), ChatStage::Complete);
        let authors: Vec<_> = chat.messages().iter().map(|m| m.author).collect();
        assert_eq!(authors, [Author::Bot, Author::User, Author::Bot, Author::Bot]);
        assert_eq!(chat.messages()[1].text, chat.script().user_choices[1].text);

        app.confirm_chat();
        assert_eq!(app.view(), View::Ending);
    }

    #[test]
    fn secret_reveal_lowers_volume_and_restart_restores() {
        let opener = RecordingOpener::default();
        let mut app = app(0.9).with_opener(Box::new(opener.clone()));
        to_chat(&mut app);
        app.advance(Duration::from_millis(1700));
        app.choose(0);
        app.advance(Duration::from_secs(5));
        app.complete_chat();
        assert_eq!(app.view(), View::Ending);

        app.open_profile();
        assert!(opener.opened.borrow().is_empty(), "link hidden until the secret shows");

        app.send_hug();
        app.advance(Duration::from_millis(2000));
        assert!(app.time_until_next().is_some());
        app.advance(Duration::from_millis(450));
        assert!((app.audio().volume() - 0.1).abs() < 1e-6);

        app.open_profile();
        assert_eq!(
            opener.opened.borrow().as_slice(),
            ["https://instagram.com/yourinstagram"]
        );
        assert!(app.status.is_some());

        app.restart();
        assert_eq!(app.view(), View::Landing);
        assert!(!app.audio().is_active());
        assert_eq!(app.session().user_name, "");
        app.advance(Duration::from_millis(450));
        assert!((app.audio().volume() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn restart_waits_for_the_hug() {
        let mut app = app(0.9);
        to_chat(&mut app);
        app.advance(Duration::from_millis(1700));
        app.choose(1);
        app.advance(Duration::from_secs(5));
        app.complete_chat();

        app.restart();
        assert_eq!(app.view(), View::Ending);
        assert_eq!(app.session().user_name, "Alya");

        app.send_hug();
        app.restart();
        assert_eq!(app.view(), View::Landing);
    }

    #[test]
    fn number_picks_mood_tile() {
        let mut app = app(0.9);
        enter_name(&mut app, "Alya");
        app.pick_mood(7);
        assert_eq!(app.view(), View::Mood);
        app.pick_mood(3);
        assert_eq!(app.session().selected_mood, Some(MoodId::Loneliness));
        assert_eq!(app.view(), View::StressRelief);
    }

    #[test]
    fn mute_only_while_audio_active() {
        let mut app = app(0.9);
        app.toggle_mute();
        assert!(!app.session().muted);

        enter_name(&mut app, "Alya");
        app.toggle_mute();
        assert!(app.session().muted);
        assert!(app.audio().is_muted());
        app.toggle_mute();
        assert!(!app.audio().is_muted());
    }

    #[test]
    fn leaving_a_screen_drops_its_timers() {
        let mut app = app(0.9);
        enter_name(&mut app, "Alya");
        app.refresh_affirmation();
        assert!(app.time_until_next().is_some());
        app.select_highlighted_mood();
        // Treat screen has nothing pending until a treat is given.
        assert_eq!(app.time_until_next(), None);
    }

    #[test]
    fn wrong_screen_actions_are_ignored() {
        let mut app = app(0.9);
        app.pop_balloon(0);
        app.choose(0);
        app.send_hug();
        app.restart();
        app.continue_relief();
        assert_eq!(app.view(), View::Landing);
    }
}
