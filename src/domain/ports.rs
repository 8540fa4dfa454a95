use super::billing::{Card, Customer, Invoice, ProcessorSubscription, SubscribeOptions};
use super::capability::Capability;
use super::owner::{Owner, OwnerId};
use crate::error::{ProcessorError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type ProcessorResult<T> = std::result::Result<T, ProcessorError>;

/// Source of the current instant for trial and status checks.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// One payment processor's implementation of the billing operations.
///
/// Each method is the `<processor>_<capability>` operation for the processor
/// named by [`ProcessorAdapter::processor`]. Adapters that can't offer a
/// capability say so through [`ProcessorAdapter::supports`]; the registry
/// never calls them for it.
#[async_trait]
pub trait ProcessorAdapter: Send + Sync {
    /// Identifier owners use to select this adapter, e.g. "stripe".
    fn processor(&self) -> &str;

    fn supports(&self, _capability: Capability) -> bool {
        true
    }

    async fn customer(&self, owner: &Owner) -> ProcessorResult<Customer>;

    async fn subscribe(
        &self,
        owner: &Owner,
        name: &str,
        plan: &str,
        options: &SubscribeOptions,
    ) -> ProcessorResult<ProcessorSubscription>;

    async fn update_card(&self, owner: &Owner, token: &str) -> ProcessorResult<Card>;

    async fn subscription(
        &self,
        owner: &Owner,
        subscription_id: &str,
    ) -> ProcessorResult<ProcessorSubscription>;

    async fn invoice(&self, owner: &Owner) -> ProcessorResult<Invoice>;

    async fn upcoming_invoice(&self, owner: &Owner) -> ProcessorResult<Invoice>;
}

pub type ProcessorAdapterRef = Arc<dyn ProcessorAdapter>;

#[async_trait]
pub trait OwnerStore: Send + Sync {
    async fn store(&self, owner: Owner) -> Result<()>;
    async fn get(&self, owner_id: OwnerId) -> Result<Option<Owner>>;
    async fn get_all(&self) -> Result<Vec<Owner>>;
}

pub type OwnerStoreBox = Box<dyn OwnerStore>;
