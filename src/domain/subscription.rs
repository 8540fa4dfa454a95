use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription slot used when the caller doesn't name one.
pub const DEFAULT_SUBSCRIPTION_NAME: &str = "default";

/// Plan used when the caller doesn't name one.
pub const DEFAULT_PLAN: &str = "default";

/// Status queries every subscription representation must answer.
///
/// The evaluator only relies on this trait, so it works the same over stored
/// records and hand-built doubles.
pub trait SubscriptionState {
    fn name(&self) -> &str;
    fn processor_plan(&self) -> &str;
    fn is_active(&self, now: DateTime<Utc>) -> bool;
    fn is_on_trial(&self, now: DateTime<Utc>) -> bool;
}

/// A subscription record owned by exactly one [`Owner`](super::owner::Owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Logical slot, e.g. "default" or "addon".
    pub name: String,
    /// Processor that created the subscription.
    pub processor: String,
    /// Processor-side subscription identifier.
    pub processor_id: String,
    pub processor_plan: String,
    pub quantity: u32,
    pub trial_ends_at: Option<DateTime<Utc>>,
    /// Set once the subscription has been cancelled.
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(
        name: impl Into<String>,
        processor: impl Into<String>,
        processor_id: impl Into<String>,
        processor_plan: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            processor: processor.into(),
            processor_id: processor_id.into(),
            processor_plan: processor_plan.into(),
            quantity: 1,
            trial_ends_at: None,
            ends_at: None,
            created_at,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.ends_at.is_some()
    }

    /// Cancelled, but still paid up until `ends_at`.
    pub fn is_on_grace_period(&self, now: DateTime<Utc>) -> bool {
        matches!(self.ends_at, Some(ends_at) if now < ends_at)
    }

    pub fn is_ended(&self, now: DateTime<Utc>) -> bool {
        self.is_cancelled() && !self.is_on_grace_period(now)
    }
}

impl SubscriptionState for Subscription {
    fn name(&self) -> &str {
        &self.name
    }

    fn processor_plan(&self) -> &str {
        &self.processor_plan
    }

    fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_cancelled() || self.is_on_grace_period(now) || self.is_on_trial(now)
    }

    fn is_on_trial(&self, now: DateTime<Utc>) -> bool {
        matches!(self.trial_ends_at, Some(trial_ends_at) if now < trial_ends_at)
    }
}
