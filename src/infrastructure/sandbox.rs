use crate::domain::billing::{
    Card, Customer, Invoice, InvoiceStatus, ProcessorSubscription, ProcessorSubscriptionStatus,
    SubscribeOptions,
};
use crate::domain::capability::Capability;
use crate::domain::money::Money;
use crate::domain::owner::Owner;
use crate::domain::ports::{Clock, ProcessorAdapter, ProcessorResult};
use crate::domain::subscription::SubscriptionState;
use crate::error::ProcessorError;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A local processor that fabricates processor responses.
///
/// Usable under any identifier, so one type can stand in for "stripe",
/// "braintree" and friends. Customer ids are derived from the owner id,
/// subscription ids come from a per-instance counter and invoices total the
/// owner's active subscriptions on this processor at the configured prices.
/// Trial end dates and subscription statuses follow the injected clock.
pub struct SandboxProcessor {
    processor: String,
    currency: String,
    prices: HashMap<String, Money>,
    unsupported: HashSet<Capability>,
    sequence: AtomicU64,
    clock: Clock,
}

impl fmt::Debug for SandboxProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxProcessor")
            .field("processor", &self.processor)
            .field("currency", &self.currency)
            .field("prices", &self.prices)
            .field("unsupported", &self.unsupported)
            .finish_non_exhaustive()
    }
}

impl SandboxProcessor {
    pub fn new(processor: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            currency: "usd".to_string(),
            prices: HashMap::new(),
            unsupported: HashSet::new(),
            sequence: AtomicU64::new(0),
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_price(mut self, plan: impl Into<String>, price: Money) -> Self {
        self.prices.insert(plan.into(), price);
        self
    }

    pub fn with_prices(mut self, prices: impl IntoIterator<Item = (String, Money)>) -> Self {
        self.prices.extend(prices);
        self
    }

    /// Stops advertising `capability`.
    pub fn without(mut self, capability: Capability) -> Self {
        self.unsupported.insert(capability);
        self
    }

    fn error(&self, message: impl Into<String>) -> ProcessorError {
        ProcessorError::new(self.processor.as_str(), message)
    }

    fn customer_id(&self, owner: &Owner) -> String {
        match owner.processor_id() {
            Some(id) => id.to_string(),
            None => format!("cus_{}_{}", self.processor, owner.id),
        }
    }

    fn existing_customer_id(&self, owner: &Owner) -> ProcessorResult<String> {
        owner
            .processor_id()
            .map(str::to_string)
            .ok_or_else(|| self.error("no such customer").with_code("resource_missing"))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn amount_due(&self, owner: &Owner) -> ProcessorResult<Money> {
        let now = self.now();
        owner
            .subscriptions()
            .iter()
            .filter(|sub| sub.processor == self.processor && sub.is_active(now))
            .try_fold(Money::ZERO, |total, sub| {
                let price = self
                    .prices
                    .get(&sub.processor_plan)
                    .copied()
                    .unwrap_or(Money::ZERO);
                price
                    .checked_mul(sub.quantity)
                    .and_then(|line| total.checked_add(line))
                    .ok_or_else(|| {
                        self.error("invoice amount out of range")
                            .with_code("amount_too_large")
                    })
            })
    }

    fn trial_ends_at(&self, days: u32) -> ProcessorResult<DateTime<Utc>> {
        TimeDelta::try_days(days.into())
            .and_then(|trial| self.now().checked_add_signed(trial))
            .ok_or_else(|| {
                self.error(format!("trial_period_days {days} is out of range"))
                    .with_code("parameter_invalid")
            })
    }
}

#[async_trait]
impl ProcessorAdapter for SandboxProcessor {
    fn processor(&self) -> &str {
        &self.processor
    }

    fn supports(&self, capability: Capability) -> bool {
        !self.unsupported.contains(&capability)
    }

    async fn customer(&self, owner: &Owner) -> ProcessorResult<Customer> {
        let id = self.customer_id(owner);
        tracing::debug!(processor = %self.processor, customer = %id, "sandbox customer");
        Ok(Customer {
            id,
            processor: self.processor.clone(),
            email: owner.email.clone(),
        })
    }

    async fn subscribe(
        &self,
        owner: &Owner,
        _name: &str,
        plan: &str,
        options: &SubscribeOptions,
    ) -> ProcessorResult<ProcessorSubscription> {
        if plan.is_empty() {
            return Err(self.error("plan is required").with_code("parameter_missing"));
        }

        let trial_ends_at = options
            .trial_period_days
            .filter(|days| *days > 0)
            .map(|days| self.trial_ends_at(days))
            .transpose()?;
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let status = if trial_ends_at.is_some() {
            ProcessorSubscriptionStatus::Trialing
        } else {
            ProcessorSubscriptionStatus::Active
        };

        Ok(ProcessorSubscription {
            id: format!("sub_{}_{}", self.processor, n),
            customer_id: self.customer_id(owner),
            plan: plan.to_string(),
            quantity: options.quantity.unwrap_or(1),
            status,
            trial_ends_at,
            ends_at: None,
        })
    }

    async fn update_card(&self, owner: &Owner, token: &str) -> ProcessorResult<Card> {
        self.existing_customer_id(owner)?;
        let brand = token
            .strip_prefix("tok_")
            .filter(|brand| !brand.is_empty())
            .ok_or_else(|| {
                self.error(format!("invalid card token `{token}`"))
                    .with_code("token_invalid")
            })?;

        Ok(Card {
            brand: brand.to_string(),
            last4: "4242".to_string(),
            exp_month: 12,
            exp_year: self.now().year() + 3,
        })
    }

    async fn subscription(
        &self,
        owner: &Owner,
        subscription_id: &str,
    ) -> ProcessorResult<ProcessorSubscription> {
        let now = self.now();
        let sub = owner
            .subscriptions()
            .iter()
            .find(|sub| sub.processor == self.processor && sub.processor_id == subscription_id)
            .ok_or_else(|| {
                self.error(format!("no such subscription `{subscription_id}`"))
                    .with_code("resource_missing")
            })?;

        let status = if sub.is_on_trial(now) {
            ProcessorSubscriptionStatus::Trialing
        } else if sub.is_active(now) {
            ProcessorSubscriptionStatus::Active
        } else {
            ProcessorSubscriptionStatus::Canceled
        };

        Ok(ProcessorSubscription {
            id: sub.processor_id.clone(),
            customer_id: self.customer_id(owner),
            plan: sub.processor_plan.clone(),
            quantity: sub.quantity,
            status,
            trial_ends_at: sub.trial_ends_at,
            ends_at: sub.ends_at,
        })
    }

    async fn invoice(&self, owner: &Owner) -> ProcessorResult<Invoice> {
        let customer_id = self.existing_customer_id(owner)?;
        let amount_due = self.amount_due(owner)?;
        let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Invoice {
            id: Some(format!("in_{}_{}", self.processor, n)),
            customer_id,
            amount_due,
            currency: self.currency.clone(),
            status: InvoiceStatus::Paid,
        })
    }

    async fn upcoming_invoice(&self, owner: &Owner) -> ProcessorResult<Invoice> {
        let customer_id = self.existing_customer_id(owner)?;
        Ok(Invoice {
            id: None,
            customer_id,
            amount_due: self.amount_due(owner)?,
            currency: self.currency.clone(),
            status: InvoiceStatus::Draft,
        })
    }
}
