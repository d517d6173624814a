use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

pub const SESSION_ID_PREFIX: &str = "session";
pub const MESSAGE_ID_PREFIX: &str = "msg";

pub fn generate_session_id() -> String {
    prefixed_id(SESSION_ID_PREFIX)
}

pub fn generate_message_id() -> String {
    prefixed_id(MESSAGE_ID_PREFIX)
}

pub fn generate_record_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// RFC 3339 with millisecond precision and a `Z` suffix, e.g.
/// `2026-02-16T13:00:00.000Z`.
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}
