//! Scripted chat screen.
//!
//! Stages: awaitingIntro → choicesVisible → awaitingResponse → awaitingFinal
//! → complete. Every bot line is preceded by a "typing" pause; the reveal
//! order is fixed (intro, user choice, response, final line, completion).

use std::time::Duration;

use serde::Serialize;

use crate::content::ConversationScript;
use crate::error::{HarimuError, Result};
use crate::schedule::Schedule;

/// Reveal delays.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTimings {
    /// Typing before the intro line.
    pub intro_typing: Duration,
    /// Pause between the intro line and the choices.
    pub choices_reveal: Duration,
    /// Pause after the visitor's pick before the bot starts typing.
    pub response_typing_delay: Duration,
    /// From the pick until the response lands.
    pub response: Duration,
    /// Pause between the response and the final line's typing.
    pub final_gap: Duration,
    pub final_typing: Duration,
}

impl Default for ChatTimings {
    fn default() -> Self {
        Self {
            intro_typing: Duration::from_millis(1200),
            choices_reveal: Duration::from_millis(500),
            response_typing_delay: Duration::from_millis(300),
            response: Duration::from_millis(1200),
            final_gap: Duration::from_millis(1000),
            final_typing: Duration::from_millis(1500),
        }
    }
}

impl ChatTimings {
    /// Every delay collapsed to zero.
    pub fn instant() -> Self {
        Self {
            intro_typing: Duration::ZERO,
            choices_reveal: Duration::ZERO,
            response_typing_delay: Duration::ZERO,
            response: Duration::ZERO,
            final_gap: Duration::ZERO,
            final_typing: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u64,
    pub author: Author,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatStage {
    AwaitingIntro,
    ChoicesVisible,
    AwaitingResponse,
    AwaitingFinal,
    Complete,
}

#[derive(Debug)]
enum ChatStep {
    RevealIntro,
    ShowChoices,
    StartResponseTyping,
    RevealResponse(&'static str),
    StartFinalTyping,
    RevealFinal,
}

/// Transcript and reveal state for one visit to the chat screen.
#[derive(Debug)]
pub struct ChatScreen {
    script: &'static ConversationScript,
    timings: ChatTimings,
    stage: ChatStage,
    messages: Vec<ChatMessage>,
    typing: bool,
    chosen: Option<usize>,
    next_id: u64,
    schedule: Schedule<ChatStep>,
}

impl ChatScreen {
    /// Mounts the screen; the bot starts typing its intro immediately.
    pub fn new(script: &'static ConversationScript, timings: ChatTimings) -> Self {
        let mut schedule = Schedule::new();
        schedule.schedule_in(timings.intro_typing, ChatStep::RevealIntro);
        Self {
            script,
            timings,
            stage: ChatStage::AwaitingIntro,
            messages: Vec::new(),
            typing: true,
            chosen: None,
            next_id: 1,
            schedule,
        }
    }

    pub fn script(&self) -> &'static ConversationScript {
        self.script
    }

    pub fn stage(&self) -> ChatStage {
        self.stage
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn choices_visible(&self) -> bool {
        self.stage == ChatStage::ChoicesVisible
    }

    pub fn chosen(&self) -> Option<usize> {
        self.chosen
    }

    /// The completion action is only offered at the end.
    pub fn is_complete(&self) -> bool {
        self.stage == ChatStage::Complete
    }

    /// Picks a reply. Returns `Ok(false)` when choices are not on screen;
    /// an index past the script's choices is an error.
    pub fn select_choice(&mut self, index: usize) -> Result<bool> {
        if !self.choices_visible() {
            return Ok(false);
        }
        let choice = self.script.user_choices.get(index).ok_or(HarimuError::NoSuchChoice {
            index,
            available: self.script.user_choices.len(),
        })?;

        self.chosen = Some(index);
        self.push(Author::User, choice.text);
        self.stage = ChatStage::AwaitingResponse;
        self.schedule
            .schedule_in(self.timings.response_typing_delay, ChatStep::StartResponseTyping);
        self.schedule
            .schedule_in(self.timings.response, ChatStep::RevealResponse(choice.response));
        Ok(true)
    }

    pub fn advance(&mut self, dt: Duration) {
        let horizon = self.schedule.now() + dt;
        while let Some(step) = self.schedule.pop_until(horizon) {
            self.apply(step);
        }
        self.schedule.settle(horizon);
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.schedule.time_until_next()
    }

    fn apply(&mut self, step: ChatStep) {
        match step {
            ChatStep::RevealIntro => {
                self.typing = false;
                self.push(Author::Bot, self.script.initial_bot_message);
                self.schedule
                    .schedule_in(self.timings.choices_reveal, ChatStep::ShowChoices);
            }
            ChatStep::ShowChoices => {
                self.stage = ChatStage::ChoicesVisible;
            }
            ChatStep::StartResponseTyping => {
                // The response may already have landed when both delays are equal.
                if self.stage == ChatStage::AwaitingResponse {
                    self.typing = true;
                }
            }
            ChatStep::RevealResponse(text) => {
                self.typing = false;
                self.push(Author::Bot, text);
                self.stage = ChatStage::AwaitingFinal;
                self.schedule
                    .schedule_in(self.timings.final_gap, ChatStep::StartFinalTyping);
            }
            ChatStep::StartFinalTyping => {
                self.typing = true;
                self.schedule
                    .schedule_in(self.timings.final_typing, ChatStep::RevealFinal);
            }
            ChatStep::RevealFinal => {
                self.typing = false;
                self.push(Author::Bot, self.script.final_healing_message);
                self.stage = ChatStage::Complete;
            }
        }
    }

    fn push(&mut self, author: Author, text: &str) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            author,
            text: text.to_string(),
        });
        self.next_id += 1;
    }
}
