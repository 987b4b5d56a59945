use crate::storage::{SAVED_DAYS_KEY, Store};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub const FIRST_DAY: i64 = 1;
pub const CHALLENGE_DAYS: i64 = 365;

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Enter a number between 1 and 365")]
    OutOfRange(f64),

    #[error("That day is already completed!")]
    AlreadyPresent(u16),

    #[error("saved days are not a JSON array: {0}")]
    Malformed(String),
}

/// Proof that a day was appended; the caller still has to persist the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Added(pub u16);

/// Completed challenge days in the order they were deposited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayLedger {
    days: Vec<u16>,
}

impl DayLedger {
    /// Reads the ledger, treating absent or unreadable data as empty.
    pub fn load(store: &Store) -> Self {
        match Self::try_load(store) {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!("ignoring saved days: {err}");
                Self::default()
            }
        }
    }

    pub fn try_load(store: &Store) -> Result<Self, LedgerError> {
        let Some(raw) = store.get(SAVED_DAYS_KEY) else {
            return Ok(Self::default());
        };

        let parsed: Option<Vec<Value>> =
            serde_json::from_str(raw).map_err(|err| LedgerError::Malformed(err.to_string()))?;

        let mut ledger = Self::default();
        for entry in parsed.unwrap_or_default() {
            let day = entry
                .as_f64()
                .ok_or(LedgerError::OutOfRange(f64::NAN))
                .and_then(day_from_number)
                .and_then(checked_day);
            match day {
                Ok(day) if !ledger.contains(day) => ledger.days.push(day),
                Ok(_) => {}
                Err(_) => warn!(%entry, "skipping saved day that is not a challenge day"),
            }
        }
        Ok(ledger)
    }

    pub fn save(&self, store: &mut Store) -> Result<(), serde_json::Error> {
        store.set(SAVED_DAYS_KEY, serde_json::to_string(&self.days)?);
        Ok(())
    }

    pub fn add_if_absent(&mut self, day: i64) -> Result<Added, LedgerError> {
        let day = checked_day(day)?;
        if self.contains(day) {
            return Err(LedgerError::AlreadyPresent(day));
        }
        self.days.push(day);
        Ok(Added(day))
    }

    pub fn contains(&self, day: u16) -> bool {
        self.days.contains(&day)
    }

    pub fn days(&self) -> &[u16] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Accepts only whole numbers; `2.5` is as much out of range as `400`.
pub fn day_from_number(value: f64) -> Result<i64, LedgerError> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i64)
    } else {
        Err(LedgerError::OutOfRange(value))
    }
}

fn checked_day(day: i64) -> Result<u16, LedgerError> {
    if (FIRST_DAY..=CHALLENGE_DAYS).contains(&day) {
        Ok(day as u16)
    } else {
        Err(LedgerError::OutOfRange(day as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_of(days: &[i64]) -> DayLedger {
        let mut ledger = DayLedger::default();
        for &day in days {
            ledger.add_if_absent(day).unwrap();
        }
        ledger
    }

    #[test]
    fn add_appends_new_day_once() {
        let mut ledger = ledger_of(&[5, 10]);
        assert_eq!(ledger.add_if_absent(365), Ok(Added(365)));
        assert_eq!(ledger.days(), &[5, 10, 365]);
    }

    #[test]
    fn add_rejects_duplicate_without_mutation() {
        let mut ledger = ledger_of(&[5, 10]);
        assert_eq!(ledger.add_if_absent(10), Err(LedgerError::AlreadyPresent(10)));
        assert_eq!(ledger.days(), &[5, 10]);
    }

    #[test]
    fn add_rejects_out_of_range_without_mutation() {
        let mut ledger = ledger_of(&[1]);
        for day in [0, -3, 366, 400] {
            assert_eq!(ledger.add_if_absent(day), Err(LedgerError::OutOfRange(day as f64)));
        }
        assert_eq!(ledger.days(), &[1]);
    }

    #[test]
    fn save_writes_json_array_in_insertion_order() {
        let mut store = Store::default();
        ledger_of(&[20, 3, 7]).save(&mut store).unwrap();
        assert_eq!(store.get(SAVED_DAYS_KEY), Some("[20,3,7]"));
        assert_eq!(DayLedger::load(&store).days(), &[20, 3, 7]);
    }

    #[test]
    fn absent_or_null_data_is_empty() {
        let mut store = Store::default();
        assert!(DayLedger::load(&store).is_empty());

        store.set(SAVED_DAYS_KEY, "null");
        assert_eq!(DayLedger::try_load(&store), Ok(DayLedger::default()));
    }

    #[test]
    fn malformed_data_degrades_to_empty() {
        let mut store = Store::default();
        store.set(SAVED_DAYS_KEY, "{oops");
        assert!(matches!(
            DayLedger::try_load(&store),
            Err(LedgerError::Malformed(_))
        ));
        assert!(DayLedger::load(&store).is_empty());

        store.set(SAVED_DAYS_KEY, r#"{"days": [1]}"#);
        assert!(DayLedger::load(&store).is_empty());
    }

    #[test]
    fn unfit_entries_are_skipped_and_the_rest_kept() {
        let mut store = Store::default();
        store.set(SAVED_DAYS_KEY, r#"[1, 2, 3, 2.5, 999, "7", null, 2, 4.0]"#);
        assert_eq!(DayLedger::try_load(&store).unwrap().days(), &[1, 2, 3, 4]);

        let mut ledger = DayLedger::load(&store);
        ledger.add_if_absent(10).unwrap();
        ledger.save(&mut store).unwrap();
        assert_eq!(store.get(SAVED_DAYS_KEY), Some("[1,2,3,4,10]"));
    }

    #[test]
    fn only_whole_numbers_are_days() {
        assert_eq!(day_from_number(12.0), Ok(12));
        assert_eq!(day_from_number(2.5), Err(LedgerError::OutOfRange(2.5)));
        assert!(day_from_number(f64::NAN).is_err());
        assert!(day_from_number(f64::INFINITY).is_err());
    }
}
