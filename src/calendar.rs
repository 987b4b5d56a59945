use crate::ledger::{CHALLENGE_DAYS, DayLedger, FIRST_DAY};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: u16,
    pub completed: bool,
}

/// One cell per challenge day, ascending, regardless of deposit order.
pub fn cells(ledger: &DayLedger) -> impl Iterator<Item = CalendarCell> + '_ {
    (FIRST_DAY as u16..=CHALLENGE_DAYS as u16).map(move |day| CalendarCell {
        day,
        completed: ledger.contains(day),
    })
}
