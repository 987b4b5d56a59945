use crate::install::InstallOutcome;
use crate::reminder::{Notifier, Permission};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub day: f64,
}

#[derive(Debug, Deserialize)]
pub struct DepositForm {
    pub day: String,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct ReminderUpdateRequest {
    pub enabled: Option<bool>,
    pub time: Option<String>,
    #[serde(default)]
    pub notifications: NotificationSupport,
}

#[derive(Debug, Deserialize)]
pub struct ReminderCheckRequest {
    #[serde(default)]
    pub notifications: NotificationSupport,
}

/// What the page reported about its browser's Notification API.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotificationSupport {
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub permission: Permission,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NotifierResponse {
    pub request_permission: bool,
    pub notifications: Vec<NotificationPayload>,
}

/// Notifier that queues its work for the page to carry out.
#[derive(Debug)]
pub struct PageNotifier {
    support: NotificationSupport,
    pending: NotifierResponse,
}

impl PageNotifier {
    pub fn new(support: NotificationSupport) -> Self {
        Self {
            support,
            pending: NotifierResponse::default(),
        }
    }

    pub fn finish(self) -> NotifierResponse {
        self.pending
    }
}

impl Notifier for PageNotifier {
    fn is_available(&self) -> bool {
        self.support.available
    }

    fn permission(&self) -> Permission {
        self.support.permission
    }

    fn request_permission(&mut self) {
        self.pending.request_permission = true;
    }

    fn notify(&mut self, title: &str, body: &str) {
        self.pending.notifications.push(NotificationPayload {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}

#[derive(Debug, Deserialize)]
pub struct DisplayModeRequest {
    pub standalone: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstallStatusResponse {
    pub trigger_visible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TriggerResponse {
    Prompt,
    Unavailable { message: String },
}

#[derive(Debug, Deserialize)]
pub struct InstallChoiceRequest {
    pub outcome: InstallOutcome,
}
