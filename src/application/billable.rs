use super::evaluator::SubscriptionEvaluator;
use super::registry::ProcessorRegistry;
use crate::domain::billing::{Card, Customer, Invoice, ProcessorSubscription, SubscribeOptions};
use crate::domain::capability::Capability;
use crate::domain::owner::Owner;
pub use crate::domain::ports::Clock;
use crate::domain::subscription::Subscription;
use crate::error::{ConfigurationError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// The billing surface of an owner.
///
/// Owners don't carry billing behavior themselves: every operation takes the
/// owner explicitly, dispatches to the adapter its `processor` selects, and
/// returns the adapter's answer untouched. Operations that produce records
/// (customer handles, subscriptions, cards) write them back onto the owner;
/// persisting the owner is left to the caller.
#[derive(Clone)]
pub struct Billable {
    registry: Arc<ProcessorRegistry>,
    clock: Clock,
}

impl Billable {
    pub fn new(registry: Arc<ProcessorRegistry>) -> Self {
        Self::with_clock(registry, Arc::new(Utc::now))
    }

    pub fn with_clock(registry: Arc<ProcessorRegistry>, clock: Clock) -> Self {
        Self { registry, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn evaluator(&self) -> SubscriptionEvaluator {
        SubscriptionEvaluator::at(self.now())
    }

    /// Fetches (or creates) the processor customer for `owner`.
    ///
    /// Binds the owner's `processor_id` to the returned customer when it has
    /// none yet.
    pub async fn customer(&self, owner: &mut Owner) -> Result<Customer> {
        let adapter = self.registry.resolve(owner.processor(), Capability::Customer)?;
        let customer = adapter.customer(owner).await?;

        if owner.processor_id().is_none() {
            tracing::info!(owner = owner.id, customer = %customer.id, "bound processor customer");
            owner.set_processor_id(Some(customer.id.clone()));
        }
        Ok(customer)
    }

    /// Subscribes `owner` to `plan` in the `name` slot.
    ///
    /// `name`, `plan` and `options` reach the adapter exactly as given. The
    /// resulting subscription is recorded on the owner.
    pub async fn subscribe(
        &self,
        owner: &mut Owner,
        name: &str,
        plan: &str,
        options: SubscribeOptions,
    ) -> Result<ProcessorSubscription> {
        let adapter = self
            .registry
            .resolve(owner.processor(), Capability::Subscribe)?;
        let result = adapter.subscribe(owner, name, plan, &options).await?;

        if owner.processor_id().is_none() {
            owner.set_processor_id(Some(result.customer_id.clone()));
        }

        let mut subscription = Subscription::new(
            name,
            adapter.processor(),
            result.id.clone(),
            result.plan.clone(),
            self.now(),
        );
        subscription.quantity = result.quantity;
        subscription.trial_ends_at = result.trial_ends_at;
        subscription.ends_at = result.ends_at;

        tracing::info!(
            owner = owner.id,
            subscription = %result.id,
            name = %name,
            plan = %result.plan,
            "recorded subscription"
        );
        owner.add_subscription(subscription);

        Ok(result)
    }

    /// Replaces the card on file with the one behind `token`.
    ///
    /// Needs both a processor and a processor customer; the processor is
    /// checked first.
    pub async fn update_card(&self, owner: &mut Owner, token: &str) -> Result<Card> {
        let processor = owner
            .processor()
            .ok_or(ConfigurationError::ProcessorNotSet)?;
        if owner.processor_id().is_none() {
            return Err(ConfigurationError::ProcessorIdNotSet {
                processor: processor.to_string(),
            }
            .into());
        }

        let adapter = self
            .registry
            .resolve(Some(processor), Capability::UpdateCard)?;
        let card = adapter.update_card(owner, token).await?;

        owner.card = Some(card.clone());
        Ok(card)
    }

    /// Most recent subscription in the `name` slot.
    pub fn subscription<'a>(&self, owner: &'a Owner, name: &str) -> Option<&'a Subscription> {
        self.evaluator().latest(owner.subscriptions(), name)
    }

    pub fn is_subscribed(&self, owner: &Owner, name: &str, plan: Option<&str>) -> bool {
        self.evaluator()
            .is_subscribed(owner.subscriptions(), name, plan)
    }

    /// Looks up a subscription on the processor side by its processor id.
    pub async fn processor_subscription(
        &self,
        owner: &Owner,
        subscription_id: &str,
    ) -> Result<ProcessorSubscription> {
        let adapter = self
            .registry
            .resolve(owner.processor(), Capability::Subscription)?;
        Ok(adapter.subscription(owner, subscription_id).await?)
    }

    /// Invoices and collects whatever the owner currently owes.
    pub async fn invoice(&self, owner: &Owner) -> Result<Invoice> {
        let adapter = self.registry.resolve(owner.processor(), Capability::Invoice)?;
        Ok(adapter.invoice(owner).await?)
    }

    pub async fn upcoming_invoice(&self, owner: &Owner) -> Result<Invoice> {
        let adapter = self
            .registry
            .resolve(owner.processor(), Capability::UpcomingInvoice)?;
        Ok(adapter.upcoming_invoice(owner).await?)
    }

    pub fn is_on_trial(&self, owner: &Owner, plan: Option<&str>) -> bool {
        let evaluator = self.evaluator();
        evaluator.is_on_trial(
            owner.subscriptions(),
            plan,
            owner.is_on_generic_trial(evaluator.now()),
        )
    }

    pub fn is_on_generic_trial(&self, owner: &Owner) -> bool {
        owner.is_on_generic_trial(self.now())
    }
}
