use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

pub const SETTINGS_GROUP: &str = "ghost_metrics_settings_group";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Error,
    Updated,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub setting: String,
    pub code: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            setting: SETTINGS_GROUP.to_string(),
            code: code.to_string(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }

    pub fn updated(message: impl Into<String>) -> Self {
        Self {
            setting: SETTINGS_GROUP.to_string(),
            code: "settings_updated".to_string(),
            message: message.into(),
            level: NoticeLevel::Updated,
        }
    }
}

pub trait NoticeSink: Send + Sync {
    fn record(&self, notice: Notice);
    fn drain(&self) -> Vec<Notice>;
}

#[derive(Clone, Default)]
pub struct InMemoryNoticeSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl InMemoryNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl NoticeSink for InMemoryNoticeSink {
    fn record(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }

    fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock())
    }
}
