use serde::{Deserialize, Serialize};
use std::fmt;

/// A billing operation a processor adapter may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Customer,
    Subscribe,
    UpdateCard,
    Subscription,
    Invoice,
    UpcomingInvoice,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Customer,
        Capability::Subscribe,
        Capability::UpdateCard,
        Capability::Subscription,
        Capability::Invoice,
        Capability::UpcomingInvoice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Customer => "customer",
            Capability::Subscribe => "subscribe",
            Capability::UpdateCard => "update_card",
            Capability::Subscription => "subscription",
            Capability::Invoice => "invoice",
            Capability::UpcomingInvoice => "upcoming_invoice",
        }
    }

    /// The conventional `<processor>_<capability>` operation name.
    pub fn operation_name(&self, processor: &str) -> String {
        format!("{}_{}", processor, self.as_str())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_name_convention() {
        assert_eq!(Capability::Customer.operation_name("stripe"), "stripe_customer");
        assert_eq!(
            Capability::UpcomingInvoice.operation_name("braintree"),
            "braintree_upcoming_invoice"
        );
    }
}
