use crate::calendar::{self, CalendarCell};
use crate::ledger::DayLedger;
use crate::reminder::ReminderSettings;
use crate::stats::{Stats, build_stats_at};
use crate::storage::Store;
use crate::theme::{ThemeVars, restore_theme};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Everything the page shows, derived from the store in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub stats: Stats,
    pub calendar: Vec<CalendarCell>,
    pub theme: Option<ThemeVars>,
    pub reminder: ReminderSettings,
}

pub fn render_snapshot(store: &Store) -> Snapshot {
    render_snapshot_at(Local::now().date_naive(), store)
}

pub fn render_snapshot_at(today: NaiveDate, store: &Store) -> Snapshot {
    let ledger = DayLedger::load(store);
    Snapshot {
        calendar: calendar::cells(&ledger).collect(),
        stats: build_stats_at(today, &ledger),
        theme: restore_theme(store),
        reminder: ReminderSettings::load(store),
    }
}
