//! Normalized results returned by processor adapters.

use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub processor: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub brand: String,
    pub last4: String,
    pub exp_month: u32,
    pub exp_year: i32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ProcessorSubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Incomplete,
}

/// A subscription as the processor sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSubscription {
    pub id: String,
    pub customer_id: String,
    pub plan: String,
    pub quantity: u32,
    pub status: ProcessorSubscriptionStatus,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Option<String>,
    pub customer_id: String,
    pub amount_due: Money,
    pub currency: String,
    pub status: InvoiceStatus,
}

/// Extra parameters forwarded to the processor when subscribing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubscribeOptions {
    pub quantity: Option<u32>,
    pub trial_period_days: Option<u32>,
    pub coupon: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl SubscribeOptions {
    pub fn with_trial_days(mut self, days: u32) -> Self {
        self.trial_period_days = Some(days);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}
