use super::billing::Card;
use super::subscription::Subscription;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OwnerId = u32;

/// Where an owner stands with respect to its payment processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorState<'a> {
    Unconfigured,
    Configured {
        processor: &'a str,
    },
    Active {
        processor: &'a str,
        processor_id: &'a str,
    },
}

/// The billable entity that subscriptions and cards belong to.
///
/// `processor` and `processor_id` are private so that switching processors
/// can't leave a customer handle from the previous processor behind.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Owner {
    pub id: OwnerId,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    processor: Option<String>,
    processor_id: Option<String>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub card: Option<Card>,
    /// Oldest first.
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

impl Owner {
    pub fn new(id: OwnerId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, first_name: Option<&str>, last_name: Option<&str>) -> Self {
        self.first_name = first_name.map(str::to_string);
        self.last_name = last_name.map(str::to_string);
        self
    }

    /// First and last name separated by a space, skipping blank parts.
    pub fn customer_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn processor(&self) -> Option<&str> {
        self.processor.as_deref()
    }

    /// Assigns the processor, clearing `processor_id` when it changes.
    pub fn set_processor(&mut self, processor: Option<&str>) {
        let processor = processor
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        if processor != self.processor {
            self.processor_id = None;
        }
        self.processor = processor;
    }

    pub fn processor_id(&self) -> Option<&str> {
        self.processor_id.as_deref()
    }

    pub fn set_processor_id(&mut self, processor_id: Option<String>) {
        self.processor_id = processor_id.filter(|id| !id.is_empty());
    }

    pub fn processor_state(&self) -> ProcessorState<'_> {
        match (self.processor(), self.processor_id()) {
            (None, _) => ProcessorState::Unconfigured,
            (Some(processor), None) => ProcessorState::Configured { processor },
            (Some(processor), Some(processor_id)) => ProcessorState::Active {
                processor,
                processor_id,
            },
        }
    }

    /// Trial attached to the owner itself rather than to a subscription.
    pub fn is_on_generic_trial(&self, now: DateTime<Utc>) -> bool {
        matches!(self.trial_ends_at, Some(trial_ends_at) if now < trial_ends_at)
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Records a subscription, keeping the collection ordered by creation time.
    pub fn add_subscription(&mut self, subscription: Subscription) {
        let position = self
            .subscriptions
            .partition_point(|existing| existing.created_at <= subscription.created_at);
        self.subscriptions.insert(position, subscription);
    }
}
