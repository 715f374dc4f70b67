use chrono::{DateTime, Duration, Utc};

/// Client-side view of the backend's PreBook lifetime. The backend remains
/// the authority (an expired code is rejected server-side regardless), but
/// tracking it here lets the embedder show a countdown and lets the flow
/// refuse to open a payment page against a lock that is already dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockCountdown {
    locked_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    warn_before: Duration,
}

impl LockCountdown {
    pub fn start(lock_seconds: u64, warn_seconds: u64) -> Self {
        Self::start_at(Utc::now(), lock_seconds, warn_seconds)
    }

    pub fn start_at(now: DateTime<Utc>, lock_seconds: u64, warn_seconds: u64) -> Self {
        Self {
            locked_at: now,
            expires_at: now + Duration::seconds(lock_seconds as i64),
            warn_before: Duration::seconds(warn_seconds as i64),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn remaining(&self) -> Duration {
        self.remaining_at(Utc::now())
    }

    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True once the remaining lifetime drops inside the warning window.
    pub fn near_expiry(&self) -> bool {
        self.near_expiry_at(Utc::now())
    }

    pub fn near_expiry_at(&self, now: DateTime<Utc>) -> bool {
        self.remaining_at(now) <= self.warn_before
    }
}
