use super::owner::OwnerId;
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Create or rename an owner.
    Register,
    /// Assign the owner's processor.
    Processor,
    Customer,
    Subscribe,
    UpdateCard,
    /// Start a generic trial on the owner.
    Trial,
    PayInvoice,
}

/// One row of a batch operations file.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Operation {
    pub r#type: OperationType,
    pub owner: OwnerId,
    #[serde(default)]
    pub processor: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub trial_days: Option<u32>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Operation {
    pub fn new(r#type: OperationType, owner: OwnerId) -> Self {
        Self {
            r#type,
            owner,
            processor: None,
            name: None,
            plan: None,
            token: None,
            trial_days: None,
            first_name: None,
            last_name: None,
        }
    }
}
