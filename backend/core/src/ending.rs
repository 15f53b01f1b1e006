//! Ending screen: send a hug, reveal the secret note, restart.

use std::time::Duration;

use crate::schedule::Schedule;

pub const DEFAULT_PROFILE_URL: &str = "https://instagram.com/yourinstagram";

#[derive(Debug, Clone, PartialEq)]
pub struct EndingSettings {
    /// Delay between the hug and the secret note.
    pub secret_reveal: Duration,
    /// Opened by the "visit profile" action.
    pub profile_url: String,
}

impl Default for EndingSettings {
    fn default() -> Self {
        Self {
            secret_reveal: Duration::from_millis(2000),
            profile_url: DEFAULT_PROFILE_URL.to_string(),
        }
    }
}

/// Cross-cutting signals the ending screen raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndingSignal {
    /// The secret note appeared; ambient audio should duck.
    SecretRevealed,
}

#[derive(Debug)]
enum EndingStep {
    RevealSecret,
}

#[derive(Debug)]
pub struct EndingScreen {
    settings: EndingSettings,
    hug_sent: bool,
    secret_visible: bool,
    schedule: Schedule<EndingStep>,
}

impl EndingScreen {
    pub fn new(settings: EndingSettings) -> Self {
        Self {
            settings,
            hug_sent: false,
            secret_visible: false,
            schedule: Schedule::new(),
        }
    }

    pub fn hug_sent(&self) -> bool {
        self.hug_sent
    }

    pub fn secret_visible(&self) -> bool {
        self.secret_visible
    }

    pub fn headline(&self, user_name: &str) -> String {
        if self.hug_sent {
            "Peluk diterima! 🤍".to_string()
        } else {
            format!("Kamu hebat, {user_name}!")
        }
    }

    pub fn message(&self) -> &'static str {
        if self.hug_sent {
            "Semoga harimu menjadi lebih baik ya... ✨ Ingat, kamu selalu boleh kembali kapanpun butuh teman ngobrol. Aku selalu ada di sini! ☁️"
        } else {
            "Makasih udah mau berbagi cerita sama aku hari ini. Kamu nggak sendirian, dan perasaanmu valid banget. ☁️✨"
        }
    }

    /// Sends the hug once and arms the secret reveal.
    pub fn send_hug(&mut self) -> bool {
        if self.hug_sent {
            return false;
        }
        self.hug_sent = true;
        self.schedule
            .schedule_in(self.settings.secret_reveal, EndingStep::RevealSecret);
        true
    }

    /// The profile link is only offered once the secret note is showing.
    pub fn profile_link(&self) -> Option<&str> {
        self.secret_visible.then_some(self.settings.profile_url.as_str())
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<EndingSignal> {
        let mut signals = Vec::new();
        for step in self.schedule.advance(dt) {
            match step {
                EndingStep::RevealSecret => {
                    if !self.secret_visible {
                        self.secret_visible = true;
                        signals.push(EndingSignal::SecretRevealed);
                    }
                }
            }
        }
        signals
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }
}
