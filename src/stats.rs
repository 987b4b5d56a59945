use crate::ledger::{CHALLENGE_DAYS, DayLedger};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    Ahead,
    OnTrack,
    Behind,
}

impl Performance {
    pub fn message(self) -> &'static str {
        match self {
            Performance::Ahead => "🔥 You are ahead of schedule!",
            Performance::OnTrack => "✅ You are right on track!",
            Performance::Behind => "⚠️ You are slightly behind. Keep pushing!",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Performance::Ahead => "lightgreen",
            Performance::OnTrack => "gold",
            Performance::Behind => "orange",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Stats {
    pub days_completed: u64,
    pub total_saved: u64,
    pub expected_saved: u64,
    pub performance: Performance,
    pub performance_message: &'static str,
    pub performance_color: &'static str,
    pub progress_percent: f64,
}

pub fn build_stats(ledger: &DayLedger) -> Stats {
    build_stats_at(Local::now().date_naive(), ledger)
}

pub fn build_stats_at(today: NaiveDate, ledger: &DayLedger) -> Stats {
    let days_completed = days_completed(ledger);
    let total_saved = total_saved(ledger);
    let expected_saved = expected_saved(today, total_saved);
    let performance = performance(total_saved, expected_saved);

    Stats {
        days_completed,
        total_saved,
        expected_saved,
        performance,
        performance_message: performance.message(),
        performance_color: performance.color(),
        progress_percent: progress_percent(days_completed),
    }
}

pub fn days_completed(ledger: &DayLedger) -> u64 {
    ledger.len() as u64
}

/// Day N of the challenge stands for N units deposited.
pub fn total_saved(ledger: &DayLedger) -> u64 {
    ledger.days().iter().map(|&day| u64::from(day)).sum()
}

// Numerator is the day of the month, not of the year.
pub fn expected_saved(today: NaiveDate, total_saved: u64) -> u64 {
    let elapsed = f64::from(today.day()) / CHALLENGE_DAYS as f64;
    (elapsed * total_saved as f64).floor() as u64
}

pub fn performance(total_saved: u64, expected_saved: u64) -> Performance {
    match total_saved.cmp(&expected_saved) {
        std::cmp::Ordering::Greater => Performance::Ahead,
        std::cmp::Ordering::Equal => Performance::OnTrack,
        std::cmp::Ordering::Less => Performance::Behind,
    }
}

pub fn progress_percent(days_completed: u64) -> f64 {
    days_completed as f64 / CHALLENGE_DAYS as f64 * 100.0
}
