use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error};

pub const SAVED_DAYS_KEY: &str = "savedDays";
pub const THEME_COLOR_KEY: &str = "themeColor";
pub const REMINDER_ENABLED_KEY: &str = "reminderEnabled";
pub const REMINDER_TIME_KEY: &str = "reminderTime";
pub const LAST_REMINDER_DATE_KEY: &str = "lastReminderDate";

/// String-to-string store backing every persisted setting.
///
/// Each key is independent: nothing here groups writes to several keys into
/// one unit, so callers that touch more than one key may leave a partial
/// update behind if the process dies between persists.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Store {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Store {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }
}

pub async fn load_store(path: &Path) -> Store {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse data file: {err}");
                Store::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Store::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            Store::default()
        }
    }
}

pub async fn persist_store(path: &Path, store: &Store) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(store).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    debug!(path = %path.display(), "store persisted");
    Ok(())
}
