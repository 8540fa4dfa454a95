use super::billable::Billable;
use crate::domain::billing::SubscribeOptions;
use crate::domain::operation::{Operation, OperationType};
use crate::domain::owner::Owner;
use crate::domain::ports::OwnerStoreBox;
use crate::domain::subscription::{DEFAULT_PLAN, DEFAULT_SUBSCRIPTION_NAME};
use crate::error::{BillingError, Result};
use chrono::TimeDelta;
use serde::Serialize;

/// Billing summary of one owner, as written by the report writer.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OwnerReport {
    pub owner: u32,
    pub customer_name: String,
    pub processor: Option<String>,
    pub processor_id: Option<String>,
    pub plan: Option<String>,
    pub subscribed: bool,
    pub on_trial: bool,
    pub on_generic_trial: bool,
    pub card_last4: Option<String>,
}

/// Applies batches of billing operations to stored owners.
///
/// Each operation loads its owner (creating it on first sight), runs the
/// matching [`Billable`] call and stores the owner again, so a failed
/// operation leaves the stored owner untouched.
pub struct BillingEngine {
    billable: Billable,
    owner_store: OwnerStoreBox,
}

impl BillingEngine {
    /// Creates a new `BillingEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `billable` - The billing facade operations are dispatched through.
    /// * `owner_store` - The store owners are loaded from and written back to.
    pub fn new(billable: Billable, owner_store: OwnerStoreBox) -> Self {
        Self {
            billable,
            owner_store,
        }
    }

    pub async fn process_operation(&self, op: Operation) -> Result<()> {
        let mut owner = self
            .owner_store
            .get(op.owner)
            .await?
            .unwrap_or_else(|| Owner::new(op.owner));

        match op.r#type {
            OperationType::Register => {
                owner.first_name = op.first_name;
                owner.last_name = op.last_name;
            }
            OperationType::Processor => {
                owner.set_processor(op.processor.as_deref());
            }
            OperationType::Customer => {
                self.billable.customer(&mut owner).await?;
            }
            OperationType::Subscribe => {
                let name = op.name.as_deref().unwrap_or(DEFAULT_SUBSCRIPTION_NAME);
                let plan = op.plan.as_deref().unwrap_or(DEFAULT_PLAN);
                let options = SubscribeOptions {
                    trial_period_days: op.trial_days,
                    ..SubscribeOptions::default()
                };
                self.billable
                    .subscribe(&mut owner, name, plan, options)
                    .await?;
            }
            OperationType::UpdateCard => {
                let token = op.token.ok_or_else(|| {
                    BillingError::ValidationError("update_card requires a token".to_string())
                })?;
                self.billable.update_card(&mut owner, &token).await?;
            }
            OperationType::Trial => {
                let days = op.trial_days.ok_or_else(|| {
                    BillingError::ValidationError("trial requires trial_days".to_string())
                })?;
                let trial_ends_at = TimeDelta::try_days(days.into())
                    .and_then(|trial| self.billable.now().checked_add_signed(trial))
                    .ok_or_else(|| {
                        BillingError::ValidationError(format!(
                            "trial_days {days} is out of range"
                        ))
                    })?;
                owner.trial_ends_at = Some(trial_ends_at);
            }
            OperationType::PayInvoice => {
                let invoice = self.billable.invoice(&owner).await?;
                tracing::info!(
                    owner = owner.id,
                    amount_due = %invoice.amount_due,
                    currency = %invoice.currency,
                    "paid invoice"
                );
            }
        }

        self.owner_store.store(owner).await?;
        Ok(())
    }

    pub fn report(&self, owner: &Owner) -> OwnerReport {
        let billable = &self.billable;
        OwnerReport {
            owner: owner.id,
            customer_name: owner.customer_name(),
            processor: owner.processor().map(str::to_string),
            processor_id: owner.processor_id().map(str::to_string),
            plan: billable
                .subscription(owner, DEFAULT_SUBSCRIPTION_NAME)
                .map(|sub| sub.processor_plan.clone()),
            subscribed: billable.is_subscribed(owner, DEFAULT_SUBSCRIPTION_NAME, None),
            on_trial: billable.is_on_trial(owner, None),
            on_generic_trial: billable.is_on_generic_trial(owner),
            card_last4: owner.card.as_ref().map(|card| card.last4.clone()),
        }
    }

    /// Consumes the engine and returns a report for every stored owner, in
    /// owner id order.
    pub async fn into_results(self) -> Result<Vec<OwnerReport>> {
        let mut owners = self.owner_store.get_all().await?;
        owners.sort_by_key(|owner| owner.id);
        Ok(owners.iter().map(|owner| self.report(owner)).collect())
    }
}
