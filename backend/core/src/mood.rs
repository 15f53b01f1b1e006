//! The four moods a visitor can pick from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HarimuError;

/// Identifier of a mood; also the key into the conversation scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoodId {
    Burnout,
    SocialAnxiety,
    SelfLove,
    Loneliness,
}

/// Display data for one mood tile.
#[derive(Debug, Clone, Serialize)]
pub struct Mood {
    pub id: MoodId,
    pub label: &'static str,
    pub emoji: &'static str,
    /// Hex color, `#RRGGBB`.
    pub color: &'static str,
}

/// Mood grid order.
pub static MOODS: [Mood; 4] = [
    Mood { id: MoodId::Burnout, label: "Burnout", emoji: "😮‍💨", color: "#FFB7C5" },
    Mood { id: MoodId::SocialAnxiety, label: "Lelah Sosial", emoji: "🫠", color: "#A7C7E7" },
    Mood { id: MoodId::SelfLove, label: "Butuh Validasi", emoji: "🥺", color: "#F5D0C5" },
    Mood { id: MoodId::Loneliness, label: "Kesepian", emoji: "🫂", color: "#D4C5F5" },
];

impl MoodId {
    pub const ALL: [MoodId; 4] = [
        MoodId::Burnout,
        MoodId::SocialAnxiety,
        MoodId::SelfLove,
        MoodId::Loneliness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodId::Burnout => "burnout",
            MoodId::SocialAnxiety => "socialAnxiety",
            MoodId::SelfLove => "selfLove",
            MoodId::Loneliness => "loneliness",
        }
    }

    pub fn mood(&self) -> &'static Mood {
        match self {
            MoodId::Burnout => &MOODS[0],
            MoodId::SocialAnxiety => &MOODS[1],
            MoodId::SelfLove => &MOODS[2],
            MoodId::Loneliness => &MOODS[3],
        }
    }
}

impl fmt::Display for MoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodId {
    type Err = HarimuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| HarimuError::UnknownMood(s.to_string()))
    }
}

impl Mood {
    /// Parses `color` into RGB components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}
