use crate::domain::subscription::{DEFAULT_SUBSCRIPTION_NAME, SubscriptionState};
use chrono::{DateTime, Utc};

/// Answers subscription and trial questions over already-loaded records.
///
/// Pure: no store or processor access, and every answer is computed at the
/// instant the evaluator was built for.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionEvaluator {
    now: DateTime<Utc>,
}

impl SubscriptionEvaluator {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Most recently created subscription in the `name` slot.
    ///
    /// `subscriptions` must be ordered oldest first.
    pub fn latest<'a, S: SubscriptionState>(
        &self,
        subscriptions: &'a [S],
        name: &str,
    ) -> Option<&'a S> {
        subscriptions.iter().rev().find(|sub| sub.name() == name)
    }

    /// Whether the `name` slot holds an active subscription, optionally on
    /// exactly `plan`.
    pub fn is_subscribed<S: SubscriptionState>(
        &self,
        subscriptions: &[S],
        name: &str,
        plan: Option<&str>,
    ) -> bool {
        match self.latest(subscriptions, name) {
            Some(sub) => sub.is_active(self.now) && plan_matches(sub, plan),
            None => false,
        }
    }

    /// Trial check across the "default" slot and the owner's generic trial.
    ///
    /// Only the "default" slot is consulted. The generic trial counts only
    /// when no plan is asked for, since it isn't tied to any plan.
    pub fn is_on_trial<S: SubscriptionState>(
        &self,
        subscriptions: &[S],
        plan: Option<&str>,
        on_generic_trial: bool,
    ) -> bool {
        if let Some(sub) = self.latest(subscriptions, DEFAULT_SUBSCRIPTION_NAME)
            && sub.is_on_trial(self.now)
            && plan_matches(sub, plan)
        {
            return true;
        }

        plan.is_none() && on_generic_trial
    }
}

fn plan_matches<S: SubscriptionState>(sub: &S, plan: Option<&str>) -> bool {
    plan.is_none_or(|plan| sub.processor_plan() == plan)
}
