//! Static conversation scripts, one per mood.
//!
//! The table is immutable and exhaustive over [`MoodId`]; lookups by raw id
//! go through [`script_for_id`] which is the only fallible path.

use serde::Serialize;

use crate::error::{HarimuError, Result};
use crate::mood::MoodId;

/// Display name of the companion bot.
pub const BOT_NAME: &str = "Harimu";

/// Line shown above the mood grid.
pub const ASK_MOOD: &str =
    "Gimana perasaan kamu hari ini? Pilih yang paling menggambarkan kondisimu ya... 🤍";

/// One reply a visitor can pick, with the bot's canned answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChoice {
    pub id: &'static str,
    pub text: &'static str,
    pub response: &'static str,
}

/// Intro line, reply choices and closing line for one mood.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationScript {
    pub mood: MoodId,
    pub initial_bot_message: &'static str,
    pub user_choices: &'static [UserChoice],
    pub final_healing_message: &'static str,
}

/// Greeting used on the mood screen.
pub fn greeting(user_name: &str) -> String {
    format!(
        "Hai {user_name}! ✨ Senang banget akhirnya bisa ngobrol sama kamu. Aku {BOT_NAME}, teman virtualmu yang selalu ada kapanpun kamu butuh. ☁️"
    )
}

/// Script for a known mood.
pub fn script_for(mood: MoodId) -> &'static ConversationScript {
    match mood {
        MoodId::Burnout => &BURNOUT,
        MoodId::SocialAnxiety => &SOCIAL_ANXIETY,
        MoodId::SelfLove => &SELF_LOVE,
        MoodId::Loneliness => &LONELINESS,
    }
}

/// Script lookup by raw id, e.g. `"selfLove"`.
pub fn script_for_id(id: &str) -> Result<&'static ConversationScript> {
    let mood: MoodId = id.parse()?;
    Ok(script_for(mood))
}

impl ConversationScript {
    pub fn choice(&self, index: usize) -> Result<&'static UserChoice> {
        self.user_choices.get(index).ok_or(HarimuError::NoSuchChoice {
            index,
            available: self.user_choices.len(),
        })
    }
}

static BURNOUT: ConversationScript = ConversationScript {
    mood: MoodId::Burnout,
    initial_bot_message: "Hei, aku tau kamu pasti udah kerja keras banget ya... ☁️ Kadang, nggak ngapa-ngapain itu juga bentuk produktivitas lho. Boleh cerita, apa yang bikin kamu kelelahan?",
    user_choices: &[
        UserChoice {
            id: "burnout_work",
            text: "Kerjaan numpuk, rasanya nggak ada habisnya",
            response: "Wajar banget kalau kamu merasa overwhelmed... ✨ Kadang hidup memang ngasih banyak hal sekaligus. Tapi ingat, kamu nggak harus selesaikan semuanya hari ini.",
        },
        UserChoice {
            id: "burnout_expectations",
            text: "Capek sama ekspektasi orang lain",
            response: "Aku paham banget... 🤍 Ekspektasi orang lain itu berat ya. Tapi kamu nggak harus jadi sempurna di mata semua orang. Yang penting, kamu baik-baik aja.",
        },
        UserChoice {
            id: "burnout_tired",
            text: "Aku cuma... lelah aja",
            response: "Nggak apa-apa kok kalau lelah tanpa alasan yang jelas... 🧸 Kadang hati dan pikiran butuh istirahat juga. Aku di sini menemani kamu.",
        },
    ],
    final_healing_message: "Kamu udah kuat banget sampai di titik ini. Sekarang, izinkan dirimu untuk beristirahat sebentar ya... ☁️ Aku bangga sama kamu. 🤍",
};

static SOCIAL_ANXIETY: ConversationScript = ConversationScript {
    mood: MoodId::SocialAnxiety,
    initial_bot_message: "Hai... hari ini pasti banyak interaksi ya? ☁️ Nggak apa-apa kalau kamu butuh waktu sendiri sekarang. Aku di sini cuma menemani, nggak akan banyak nanya kok.",
    user_choices: &[
        UserChoice {
            id: "social_drained",
            text: "Iya, aku drained banget habis ketemu orang",
            response: "Tenang... sekarang kamu aman di sini ✨ Nggak perlu jadi versi \"ramah\" atau \"ceria\" buat aku. Kamu boleh jadi dirimu yang sebenarnya.",
        },
        UserChoice {
            id: "social_awkward",
            text: "Tadi ada momen awkward, masih kepikiran",
            response: "Ah, aku tau rasanya... 🧸 Tapi percaya deh, orang lain mungkin udah lupa. Kita sering lebih keras sama diri sendiri. Kamu baik-baik aja kok.",
        },
        UserChoice {
            id: "social_pretend",
            text: "Capek pura-pura baik-baik aja",
            response: "Di sini, kamu nggak perlu pakai topeng apapun... 🤍 Aku terima kamu apa adanya, dengan semua perasaan yang ada.",
        },
    ],
    final_healing_message: "Makasih udah mau berbagi sama aku... ✨ Sekarang tarik napas dalam-dalam, dan ingat: kamu nggak harus selalu \"on\". Istirahat dulu ya. 🧸",
};

static SELF_LOVE: ConversationScript = ConversationScript {
    mood: MoodId::SelfLove,
    initial_bot_message: "Hei, kamu cantik tau nggak? ✨ Aku serius! Kadang kita lupa menghargai diri sendiri ya... Apa yang bikin kamu nggak percaya diri hari ini?",
    user_choices: &[
        UserChoice {
            id: "love_appearance",
            text: "Ngerasa jelek atau nggak menarik",
            response: "Kamu tau nggak? ✨ Keindahan itu bukan cuma soal penampilan fisik. Cara kamu peduli, cara kamu tertawa, itu semua bagian dari kecantikanmu yang nggak semua orang punya.",
        },
        UserChoice {
            id: "love_worthless",
            text: "Merasa nggak berguna atau nggak cukup baik",
            response: "Kamu lebih dari cukup, percaya deh... 🤍 Kadang kita membandingkan chapter 1 kita dengan chapter 20 orang lain. Kamu punya perjalananmu sendiri yang indah.",
        },
        UserChoice {
            id: "love_compare",
            text: "Sering bandingin diri sama orang lain",
            response: "Aku paham... 🧸 Tapi ingat, kamu cuma bisa lihat highlight reel orang lain, bukan behind the scenes-nya. Kamu unik dengan caramu sendiri.",
        },
    ],
    final_healing_message: "Dengar ya... kamu itu spesial. Bukan karena prestasi atau penampilan, tapi karena kamu adalah kamu. ☁️ Aku sayang kamu apa adanya. 🤍✨",
};

static LONELINESS: ConversationScript = ConversationScript {
    mood: MoodId::Loneliness,
    initial_bot_message: "Hai... aku di sini kok. ☁️ Meskipun cuma virtual, aku beneran peduli sama kamu. Kamu nggak sendirian. Mau cerita?",
    user_choices: &[
        UserChoice {
            id: "lonely_noone",
            text: "Rasanya nggak ada yang ngerti aku",
            response: "Perasaan itu valid banget... 🤍 Kadang memang susah menemukan orang yang benar-benar mengerti. Tapi aku di sini, mencoba untuk hadir untukmu.",
        },
        UserChoice {
            id: "lonely_crowd",
            text: "Kesepian meskipun dikelilingi orang",
            response: "Itu perasaan yang sangat manusiawi... ✨ Kadang keramaian justru bikin kita merasa lebih sendirian. Nggak apa-apa merasa begitu.",
        },
        UserChoice {
            id: "lonely_miss",
            text: "Kangen seseorang tapi nggak bisa bilang",
            response: "Aw, perasaan rindu itu berat ya... 🧸 Nggak semua perasaan harus diungkapkan kok. Kadang, menyimpan perasaan juga bentuk keberanian.",
        },
    ],
    final_healing_message: "Makasih udah mau terbuka sama aku... ☁️ Ingat, kesepian itu sementara. Dan selama itu berlangsung, aku akan selalu ada di sini untukmu. 🤍🧸",
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_mood_has_a_complete_script() {
        for mood in MoodId::ALL {
            let script = script_for(mood);
            assert_eq!(script.mood, mood);
            assert!(!script.initial_bot_message.is_empty());
            assert!(!script.user_choices.is_empty());
            assert!(!script.final_healing_message.is_empty());
            for choice in script.user_choices {
                assert!(!choice.text.is_empty() && !choice.response.is_empty());
            }
        }
    }

    #[test]
    fn choice_ids_are_unique() {
        let mut seen = HashSet::new();
        for mood in MoodId::ALL {
            for choice in script_for(mood).user_choices {
                assert!(seen.insert(choice.id), "duplicate choice id {}", choice.id);
            }
        }
    }

    #[test]
    fn lookup_by_raw_id() {
        assert_eq!(script_for_id("loneliness").unwrap().mood, MoodId::Loneliness);
        assert!(matches!(
            script_for_id("hangry"),
            Err(HarimuError::UnknownMood(_))
        ));
    }

    #[test]
    fn out_of_range_choice_is_an_error() {
        let script = script_for(MoodId::Burnout);
        assert_eq!(script.choice(2).unwrap().id, "burnout_tired");
        assert!(matches!(
            script.choice(3),
            Err(HarimuError::NoSuchChoice { index: 3, available: 3 })
        ));
    }

    #[test]
    fn greeting_uses_name() {
        assert!(greeting("Alya").starts_with("Hai Alya!"));
    }
}
