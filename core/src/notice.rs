//! User-facing notices
//!
//! A notice is a message with a severity. Presentation belongs to the
//! shell; this module only fixes the class names and the expiry window.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::str::FromStr;

/// How long a notice stays visible
pub const NOTICE_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Alert style name; errors render as "danger"
    pub fn style(self) -> &'static str {
        match self {
            Level::Error => "danger",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "success" => Ok(Level::Success),
            "warning" => Ok(Level::Warning),
            "error" | "danger" => Ok(Level::Error),
            other => Err(format!("unknown notice level: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub level: Level,
    pub created_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Level::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Level::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Level::Error)
    }

    pub fn css_class(&self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.level.style())
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(NOTICE_TTL_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}
