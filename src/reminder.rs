//! Daily deposit reminder.
//!
//! The reminder is only evaluated when asked (once per page load). Within a
//! calendar day it moves from not-yet-due to due once the configured time has
//! passed, and to fired after a notification went out; the next day starts
//! over. Notification permission is requested solely when the user switches
//! the reminder on.

use crate::storage::{LAST_REMINDER_DATE_KEY, REMINDER_ENABLED_KEY, REMINDER_TIME_KEY, Store};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const REMINDER_TITLE: &str = "💰 The-Billionaires-Empire";
pub const REMINDER_BODY: &str = "Time to make your daily deposit and stay on track!";

const TIME_FORMAT: &str = "%H:%M";
// Matches the browser's `Date.prototype.toDateString`, e.g. "Fri Oct 16 2026".
const FIRED_DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReminderError {
    #[error("reminder time must look like HH:MM, got {0:?}")]
    InvalidTime(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    #[default]
    Default,
    Granted,
    Denied,
}

/// Whatever can show a notification to the user.
pub trait Notifier {
    fn is_available(&self) -> bool;
    fn permission(&self) -> Permission;
    fn request_permission(&mut self);
    fn notify(&mut self, title: &str, body: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderState {
    NotYetDue,
    Due,
    Fired,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub time: Option<String>,
    pub last_fired: Option<String>,
}

impl ReminderSettings {
    pub fn load(store: &Store) -> Self {
        Self {
            enabled: store.get(REMINDER_ENABLED_KEY) == Some("true"),
            time: store.get(REMINDER_TIME_KEY).map(str::to_string),
            last_fired: store.get(LAST_REMINDER_DATE_KEY).map(str::to_string),
        }
    }

    /// Where today stands, ignoring the enabled flag and permission.
    pub fn state_at(&self, now: NaiveDateTime) -> ReminderState {
        if self.last_fired.as_deref() == Some(fired_date_string(now.date()).as_str()) {
            return ReminderState::Fired;
        }
        match self.due_at(now.date()) {
            Some(due) if now >= due => ReminderState::Due,
            _ => ReminderState::NotYetDue,
        }
    }

    fn due_at(&self, date: NaiveDate) -> Option<NaiveDateTime> {
        let time = parse_time(self.time.as_deref()?).ok()?;
        Some(date.and_time(time))
    }
}

pub fn set_enabled(store: &mut Store, enabled: bool, notifier: &mut impl Notifier) {
    store.set(REMINDER_ENABLED_KEY, enabled.to_string());
    if enabled && notifier.is_available() {
        notifier.request_permission();
    }
}

pub fn set_time(store: &mut Store, time: &str) -> Result<(), ReminderError> {
    parse_time(time)?;
    store.set(REMINDER_TIME_KEY, time);
    Ok(())
}

/// Sends today's reminder if it is due and has not gone out yet.
pub fn check_and_fire(store: &mut Store, notifier: &mut impl Notifier, now: NaiveDateTime) -> bool {
    let settings = ReminderSettings::load(store);
    if !settings.enabled || settings.time.is_none() {
        return false;
    }
    if !notifier.is_available() || notifier.permission() != Permission::Granted {
        debug!("reminder skipped: notifications not permitted");
        return false;
    }
    if settings.state_at(now) != ReminderState::Due {
        return false;
    }

    notifier.notify(REMINDER_TITLE, REMINDER_BODY);
    let today = fired_date_string(now.date());
    info!(date = %today, "daily reminder fired");
    store.set(LAST_REMINDER_DATE_KEY, today);
    true
}

pub fn fired_date_string(date: NaiveDate) -> String {
    date.format(FIRED_DATE_FORMAT).to_string()
}

fn parse_time(time: &str) -> Result<NaiveTime, ReminderError> {
    NaiveTime::parse_from_str(time, TIME_FORMAT).map_err(|_| ReminderError::InvalidTime(time.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        unavailable: bool,
        permission: Permission,
        requests: usize,
        sent: Vec<(String, String)>,
    }

    impl Notifier for RecordingNotifier {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn permission(&self) -> Permission {
            self.permission
        }

        fn request_permission(&mut self) {
            self.requests += 1;
        }

        fn notify(&mut self, title: &str, body: &str) {
            self.sent.push((title.to_string(), body.to_string()));
        }
    }

    fn granted() -> RecordingNotifier {
        RecordingNotifier {
            permission: Permission::Granted,
            ..Default::default()
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn enabled_store(time: &str) -> Store {
        let mut store = Store::default();
        set_enabled(&mut store, true, &mut RecordingNotifier::default());
        set_time(&mut store, time).unwrap();
        store
    }

    #[test]
    fn fires_once_per_day() {
        let mut store = enabled_store("08:30");
        let mut notifier = granted();

        assert!(check_and_fire(&mut store, &mut notifier, at(16, 9, 0)));
        assert!(!check_and_fire(&mut store, &mut notifier, at(16, 21, 0)));
        assert_eq!(notifier.sent.len(), 1);
        assert_eq!(notifier.sent[0].0, REMINDER_TITLE);
        assert_eq!(store.get(LAST_REMINDER_DATE_KEY), Some("Fri Oct 16 2026"));

        assert!(check_and_fire(&mut store, &mut notifier, at(17, 8, 30)));
        assert_eq!(notifier.sent.len(), 2);
    }

    #[test]
    fn waits_for_configured_time() {
        let mut store = enabled_store("08:30");
        let mut notifier = granted();

        assert!(!check_and_fire(&mut store, &mut notifier, at(16, 8, 29)));
        assert!(notifier.sent.is_empty());
        assert_eq!(store.get(LAST_REMINDER_DATE_KEY), None);
    }

    #[test]
    fn needs_enabled_time_and_granted_permission() {
        let mut notifier = granted();

        let mut disabled = enabled_store("08:00");
        set_enabled(&mut disabled, false, &mut notifier);
        assert!(!check_and_fire(&mut disabled, &mut notifier, at(16, 12, 0)));

        let mut no_time = Store::default();
        set_enabled(&mut no_time, true, &mut notifier);
        assert!(!check_and_fire(&mut no_time, &mut notifier, at(16, 12, 0)));

        let mut store = enabled_store("08:00");
        let mut denied = RecordingNotifier {
            permission: Permission::Denied,
            ..Default::default()
        };
        assert!(!check_and_fire(&mut store, &mut denied, at(16, 12, 0)));

        let mut unavailable = RecordingNotifier {
            unavailable: true,
            ..granted()
        };
        assert!(!check_and_fire(&mut store, &mut unavailable, at(16, 12, 0)));
        assert!(notifier.sent.is_empty());
    }

    #[test]
    fn permission_requested_only_when_enabling() {
        let mut store = Store::default();
        let mut notifier = RecordingNotifier::default();

        set_time(&mut store, "07:00").unwrap();
        set_enabled(&mut store, false, &mut notifier);
        assert_eq!(notifier.requests, 0);

        set_enabled(&mut store, true, &mut notifier);
        assert_eq!(notifier.requests, 1);
        assert_eq!(store.get(REMINDER_ENABLED_KEY), Some("true"));

        check_and_fire(&mut store, &mut notifier, at(16, 12, 0));
        assert_eq!(notifier.requests, 1);
    }

    #[test]
    fn state_moves_through_the_day() {
        let mut store = enabled_store("18:00");
        assert_eq!(ReminderSettings::load(&store).state_at(at(16, 17, 59)), ReminderState::NotYetDue);
        assert_eq!(ReminderSettings::load(&store).state_at(at(16, 18, 0)), ReminderState::Due);

        check_and_fire(&mut store, &mut granted(), at(16, 18, 0));
        assert_eq!(ReminderSettings::load(&store).state_at(at(16, 23, 0)), ReminderState::Fired);
        assert_eq!(ReminderSettings::load(&store).state_at(at(17, 1, 0)), ReminderState::NotYetDue);
    }

    #[test]
    fn rejects_malformed_time() {
        let mut store = Store::default();
        assert_eq!(set_time(&mut store, "25:00"), Err(ReminderError::InvalidTime("25:00".into())));
        assert_eq!(set_time(&mut store, "noon"), Err(ReminderError::InvalidTime("noon".into())));
        assert_eq!(store.get(REMINDER_TIME_KEY), None);
    }
}
