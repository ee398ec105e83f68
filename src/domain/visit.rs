use chrono::{DateTime, Utc};

/// Placeholder stored when no caller address can be determined.
pub const UNKNOWN_IP: &str = "-";

/// Placeholder stored and echoed when the caller sends no user agent.
pub const UNKNOWN_USER_AGENT: &str = "unknown";

/// One observed request to the visitor endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub visited_at: DateTime<Utc>,
    pub ip: String,
    pub user_agent: String,
}

impl Visit {
    /// Build a visit stamped with the current time.
    ///
    /// Missing values fall back to [`UNKNOWN_IP`] and [`UNKNOWN_USER_AGENT`],
    /// so every field of the stored record is always populated.
    pub fn new(ip: Option<String>, user_agent: Option<String>) -> Self {
        // ---
        Visit {
            visited_at: Utc::now(),
            ip: ip.unwrap_or_else(|| UNKNOWN_IP.to_string()),
            user_agent: user_agent.unwrap_or_else(|| UNKNOWN_USER_AGENT.to_string()),
        }
    }
}
