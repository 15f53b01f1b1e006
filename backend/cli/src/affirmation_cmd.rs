//! `harimu affirmation`: prints today's affirmation, one for a given date, or a random one.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use harimu_core::{daily_affirmation, random_affirmation, Affirmation, RngSource};

use crate::terminal_output::{supports_color, DIM, RESET};

#[derive(Args, Debug)]
pub struct AffirmationArgs {
    /// Pick uniformly from the pool instead of by date
    #[arg(long, conflicts_with = "date")]
    pub random: bool,
    /// Calendar day to use, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<String>,
    /// Seed for --random
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,
}

pub async fn run(args: AffirmationArgs) -> Result<()> {
    crate::startup::prepare(true).await?;
    let affirmation = pick(&args, chrono::Local::now().date_naive())?;
    println!("{}", format_affirmation(affirmation, supports_color()));
    Ok(())
}

fn pick(args: &AffirmationArgs, today: NaiveDate) -> Result<&'static Affirmation> {
    if args.random {
        return Ok(match args.seed {
            Some(seed) => random_affirmation(&mut RngSource::seeded(seed)),
            None => random_affirmation(&mut RngSource::from_entropy()),
        });
    }
    let date = match &args.date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => today,
    };
    Ok(daily_affirmation(date))
}

fn format_affirmation(a: &Affirmation, color: bool) -> String {
    if color {
        format!("{} {} {DIM}#{}{RESET}", a.emoji, a.text, a.id)
    } else {
        format!("{} {} #{}", a.emoji, a.text, a.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(random: bool, date: Option<&str>, seed: Option<u64>) -> AffirmationArgs {
        AffirmationArgs {
            random,
            date: date.map(str::to_string),
            seed,
        }
    }

    #[test]
    fn explicit_date_matches_daily_rule() {
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let a = pick(&args(false, Some("2026-02-10"), None), today).unwrap();
        let expected = daily_affirmation(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap());
        assert_eq!(a.id, expected.id);
    }

    #[test]
    fn defaults_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert_eq!(pick(&args(false, None, None), today).unwrap().id, daily_affirmation(today).id);
    }

    #[test]
    fn bad_date_is_an_error() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert!(pick(&args(false, Some("10/02/2026"), None), today).is_err());
    }

    #[test]
    fn seeded_random_is_repeatable() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        let a = pick(&args(true, None, Some(9)), today).unwrap();
        let b = pick(&args(true, None, Some(9)), today).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn plain_format_has_id() {
        let a = &harimu_core::AFFIRMATIONS[0];
        assert!(format_affirmation(a, false).ends_with("#1"));
    }
}
