use chrono::{DateTime, Utc};

/// Source of the current time, injectable so cooldowns can be tested.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
