pub mod affirmation;
pub mod audio;
pub mod chat;
pub mod content;
pub mod ending;
pub mod error;
pub mod landing;
pub mod mood;
pub mod mood_picker;
pub mod random;
pub mod relief;
pub mod schedule;
pub mod session;

pub use affirmation::{daily_affirmation, random_affirmation, Affirmation, AFFIRMATIONS};
pub use audio::{AudioController, AudioOutput, AudioSettings, Ramp, SilentOutput};
pub use chat::{Author, ChatMessage, ChatScreen, ChatStage, ChatTimings};
pub use content::{script_for, script_for_id, ConversationScript, UserChoice, BOT_NAME};
pub use ending::{EndingScreen, EndingSettings, EndingSignal};
pub use error::{HarimuError, Result};
pub use landing::LandingForm;
pub use mood::{Mood, MoodId, MOODS};
pub use mood_picker::{Direction, MoodPicker};
pub use random::{FixedSource, RandomSource, RngSource};
pub use relief::{BalloonPop, CharacterMood, HealingTreat, ReliefTimings, STRESS_LABELS, TREATS};
pub use schedule::Schedule;
pub use session::{FlowSettings, Router, SessionState, StressReliefVariant, Transition, Trigger, View};
