//! Affirmation pool with daily and random selection.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::random::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affirmation {
    pub id: u32,
    pub text: &'static str,
    pub emoji: &'static str,
}

pub static AFFIRMATIONS: [Affirmation; 20] = [
    Affirmation { id: 1, text: "Kamu nggak harus sempurna untuk layak dicintai. Kamu sudah cukup, apa adanya. 🤍", emoji: "🌸" },
    Affirmation { id: 2, text: "Istirahat bukan kemalasan. Itu adalah cara tubuh dan pikiranmu untuk pulih. ☁️", emoji: "🛋️" },
    Affirmation { id: 3, text: "Perasaanmu valid, meskipun orang lain tidak memahaminya. ✨", emoji: "💫" },
    Affirmation { id: 4, text: "Kemajuan kecil tetaplah kemajuan. Bersabarlah dengan dirimu sendiri. 🌱", emoji: "🌱" },
    Affirmation { id: 5, text: "Kamu sudah melewati hari-hari berat sebelumnya, dan kamu bisa melewati ini juga. 💪", emoji: "🦋" },
    Affirmation { id: 6, text: "Tidak apa-apa untuk tidak baik-baik saja. Kamu manusia, bukan robot. 🧸", emoji: "🧸" },
    Affirmation { id: 7, text: "Kamu berhak mengambil ruang dan waktu untuk dirimu sendiri. 🌙", emoji: "🌙" },
    Affirmation { id: 8, text: "Membandingkan dirimu dengan orang lain adalah mencuri kebahagiaanmu sendiri. 🌻", emoji: "🌻" },
    Affirmation { id: 9, text: "Setiap hari adalah kesempatan baru untuk memulai lagi. ☀️", emoji: "☀️" },
    Affirmation { id: 10, text: "Kamu lebih kuat dari yang kamu pikirkan, lebih berani dari yang kamu rasakan. 🦁", emoji: "🦁" },
    Affirmation { id: 11, text: "Merawat diri sendiri bukan egois, itu penting. 💆", emoji: "💆" },
    Affirmation { id: 12, text: "Kamu tidak perlu punya semua jawaban sekarang. Hidup adalah perjalanan. 🗺️", emoji: "🗺️" },
    Affirmation { id: 13, text: "Kesalahan adalah guru terbaik. Belajar darinya, lalu lepaskan. 📚", emoji: "📚" },
    Affirmation { id: 14, text: "Hatimu yang lembut adalah kekuatanmu, bukan kelemahanmu. 💗", emoji: "💗" },
    Affirmation { id: 15, text: "Kamu pantas mendapat kebahagiaan, cinta, dan kedamaian. 🕊️", emoji: "🕊️" },
    Affirmation { id: 16, text: "Menangis bukan berarti lemah. Itu adalah cara hatimu untuk bernapas. 💧", emoji: "💧" },
    Affirmation { id: 17, text: "Kamu tidak sendirian dalam perasaan ini. Banyak orang merasakan hal yang sama. 🤝", emoji: "🤝" },
    Affirmation { id: 18, text: "Hari ini mungkin berat, tapi besok adalah halaman baru. 📖", emoji: "📖" },
    Affirmation { id: 19, text: "Keberanianmu untuk terus melangkah adalah hal yang luar biasa. 👣", emoji: "👣" },
    Affirmation { id: 20, text: "Kamu adalah karya yang sedang dalam proses, dan itu indah. 🎨", emoji: "🎨" },
];

/// Same affirmation for the whole calendar day: day-of-year modulo pool size.
pub fn daily_affirmation(date: NaiveDate) -> &'static Affirmation {
    let index = date.ordinal() as usize % AFFIRMATIONS.len();
    &AFFIRMATIONS[index]
}

/// Uniform pick over the pool. Repeats are allowed.
pub fn random_affirmation<S: RandomSource + ?Sized>(source: &mut S) -> &'static Affirmation {
    &AFFIRMATIONS[source.next_index(AFFIRMATIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedSource, RngSource};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_is_stable_within_a_day() {
        let day = date(2026, 10, 17);
        assert_eq!(daily_affirmation(day).id, daily_affirmation(day).id);
    }

    #[test]
    fn daily_follows_day_of_year() {
        // Jan 1 is day 1.
        assert_eq!(daily_affirmation(date(2025, 1, 1)).id, 2);
        assert_eq!(daily_affirmation(date(2025, 1, 20)).id, 1);
        assert_ne!(
            daily_affirmation(date(2025, 3, 3)).id,
            daily_affirmation(date(2025, 3, 4)).id
        );
    }

    #[test]
    fn random_uses_injected_source() {
        assert_eq!(random_affirmation(&mut FixedSource(0.0)).id, 1);
        assert_eq!(random_affirmation(&mut FixedSource(0.99)).id, 20);

        let mut a = RngSource::seeded(3);
        let mut b = RngSource::seeded(3);
        assert_eq!(random_affirmation(&mut a), random_affirmation(&mut b));
    }
}
