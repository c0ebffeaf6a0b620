use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::ProviderId;

/// Cooldown applied to a provider after it signals rate limiting.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(20 * 60);

/// Per-provider resume times, shared by every request in the process.
///
/// A provider with no entry has never been rate limited and is available.
/// Resume times only ever move forward.
pub struct CooldownTracker {
    duration: TimeDelta,
    resume_at: Mutex<HashMap<ProviderId, DateTime<Utc>>>,
}

impl CooldownTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration: TimeDelta::from_std(duration).unwrap_or(TimeDelta::MAX),
            resume_at: Mutex::new(HashMap::new()),
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    pub fn is_available(&self, provider: &ProviderId, now: DateTime<Utc>) -> bool {
        self.lock()
            .get(provider)
            .is_none_or(|resume_at| now >= *resume_at)
    }

    /// Starts (or extends) the cooldown for `provider` and returns the
    /// moment it becomes available again.
    pub fn mark_rate_limited(&self, provider: &ProviderId, now: DateTime<Utc>) -> DateTime<Utc> {
        let candidate = now
            .checked_add_signed(self.duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut resume_at = self.lock();
        let entry = resume_at.entry(provider.clone()).or_insert(candidate);
        if candidate > *entry {
            *entry = candidate;
        }
        *entry
    }

    /// Resume time for `provider` if it is still cooling down at `now`.
    pub fn cooldown_until(&self, provider: &ProviderId, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.lock()
            .get(provider)
            .copied()
            .filter(|resume_at| now < *resume_at)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ProviderId, DateTime<Utc>>> {
        self.resume_at.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
