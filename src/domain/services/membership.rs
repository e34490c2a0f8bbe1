use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Active,
    Expiring,
    Expired,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expiring => "expiring",
            MembershipStatus::Expired => "expired",
        }
    }
}

/// Whole days until expiry, rounded up. A membership expiring later today
/// still counts as day 0, which keeps it on the "expiring" side of the fence.
pub fn days_until_expiry(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = expiry.signed_duration_since(now).num_seconds();
    if secs % SECS_PER_DAY > 0 {
        secs / SECS_PER_DAY + 1
    } else {
        secs / SECS_PER_DAY
    }
}

/// Status is never stored; it is derived from the expiry date every time.
/// Negative days left means expired, 0..=7 means expiring, beyond that active.
pub fn status_for(expiry: DateTime<Utc>, now: DateTime<Utc>) -> MembershipStatus {
    let days_left = days_until_expiry(expiry, now);
    if days_left < 0 {
        MembershipStatus::Expired
    } else if days_left <= 7 {
        MembershipStatus::Expiring
    } else {
        MembershipStatus::Active
    }
}
