#![allow(dead_code)]

use async_trait::async_trait;
use billable::domain::billing::{
    Card, Customer, Invoice, InvoiceStatus, ProcessorSubscription, ProcessorSubscriptionStatus,
    SubscribeOptions,
};
use billable::domain::capability::Capability;
use billable::domain::money::Money;
use billable::domain::owner::{Owner, OwnerId};
use billable::domain::ports::{ProcessorAdapter, ProcessorResult};
use billable::error::ProcessorError;
use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use tokio::sync::Mutex;

/// A processor operation as the spy saw it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Customer {
        owner: OwnerId,
    },
    Subscribe {
        owner: OwnerId,
        name: String,
        plan: String,
        options: SubscribeOptions,
    },
    UpdateCard {
        owner: OwnerId,
        token: String,
    },
    Subscription {
        owner: OwnerId,
        id: String,
    },
    Invoice {
        owner: OwnerId,
    },
    UpcomingInvoice {
        owner: OwnerId,
    },
}

/// Adapter double that records every call and answers with canned results.
pub struct RecordingProcessor {
    processor: String,
    calls: Mutex<Vec<Call>>,
    failure: Option<ProcessorError>,
    unsupported: Vec<Capability>,
}

impl RecordingProcessor {
    pub fn new(processor: &str) -> Self {
        Self {
            processor: processor.to_string(),
            calls: Mutex::new(Vec::new()),
            failure: None,
            unsupported: Vec::new(),
        }
    }

    /// Makes every operation fail with `error`.
    pub fn failing(mut self, error: ProcessorError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn without(mut self, capability: Capability) -> Self {
        self.unsupported.push(capability);
        self
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: Call) -> ProcessorResult<()> {
        self.calls.lock().await.push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    pub fn customer_result(&self) -> Customer {
        Customer {
            id: format!("cus_{}_recorded", self.processor),
            processor: self.processor.clone(),
            email: None,
        }
    }

    pub fn subscription_result(&self, id: &str, plan: &str) -> ProcessorSubscription {
        ProcessorSubscription {
            id: id.to_string(),
            customer_id: format!("cus_{}_recorded", self.processor),
            plan: plan.to_string(),
            quantity: 1,
            status: ProcessorSubscriptionStatus::Active,
            trial_ends_at: None,
            ends_at: None,
        }
    }

    pub fn card_result(&self) -> Card {
        Card {
            brand: "visa".to_string(),
            last4: "4242".to_string(),
            exp_month: 1,
            exp_year: 2030,
        }
    }

    pub fn invoice_result(&self, status: InvoiceStatus) -> Invoice {
        Invoice {
            id: Some("in_recorded".to_string()),
            customer_id: format!("cus_{}_recorded", self.processor),
            amount_due: Money::ZERO,
            currency: "usd".to_string(),
            status,
        }
    }
}

#[async_trait]
impl ProcessorAdapter for RecordingProcessor {
    fn processor(&self) -> &str {
        &self.processor
    }

    fn supports(&self, capability: Capability) -> bool {
        !self.unsupported.contains(&capability)
    }

    async fn customer(&self, owner: &Owner) -> ProcessorResult<Customer> {
        self.record(Call::Customer { owner: owner.id }).await?;
        Ok(self.customer_result())
    }

    async fn subscribe(
        &self,
        owner: &Owner,
        name: &str,
        plan: &str,
        options: &SubscribeOptions,
    ) -> ProcessorResult<ProcessorSubscription> {
        self.record(Call::Subscribe {
            owner: owner.id,
            name: name.to_string(),
            plan: plan.to_string(),
            options: options.clone(),
        })
        .await?;
        Ok(self.subscription_result("sub_recorded", plan))
    }

    async fn update_card(&self, owner: &Owner, token: &str) -> ProcessorResult<Card> {
        self.record(Call::UpdateCard {
            owner: owner.id,
            token: token.to_string(),
        })
        .await?;
        Ok(self.card_result())
    }

    async fn subscription(
        &self,
        owner: &Owner,
        subscription_id: &str,
    ) -> ProcessorResult<ProcessorSubscription> {
        self.record(Call::Subscription {
            owner: owner.id,
            id: subscription_id.to_string(),
        })
        .await?;
        Ok(self.subscription_result(subscription_id, "default"))
    }

    async fn invoice(&self, owner: &Owner) -> ProcessorResult<Invoice> {
        self.record(Call::Invoice { owner: owner.id }).await?;
        Ok(self.invoice_result(InvoiceStatus::Paid))
    }

    async fn upcoming_invoice(&self, owner: &Owner) -> ProcessorResult<Invoice> {
        self.record(Call::UpcomingInvoice { owner: owner.id }).await?;
        Ok(self.invoice_result(InvoiceStatus::Draft))
    }
}

pub const OPERATIONS_HEADER: [&str; 9] = [
    "type",
    "owner",
    "processor",
    "name",
    "plan",
    "token",
    "trial_days",
    "first_name",
    "last_name",
];

/// Writes `rows` random operations for owners 1..=50.
pub fn generate_operations_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(OPERATIONS_HEADER)?;

    let mut rng = rand::thread_rng();
    let processors = ["stripe", "braintree", "pants", ""];
    let plans = ["default", "pro", "team"];
    let tokens = ["tok_visa", "tok_amex", "bogus"];

    for _ in 0..rows {
        let owner = rng.gen_range(1..=50u32).to_string();
        let record: [String; 9] = match rng.gen_range(0..7) {
            0 => row("register", &owner, "", "", "", "", "", "Gob", "Bluth"),
            1 => row(
                "processor",
                &owner,
                processors[rng.gen_range(0..processors.len())],
                "",
                "",
                "",
                "",
                "",
                "",
            ),
            2 => row("customer", &owner, "", "", "", "", "", "", ""),
            3 => row(
                "subscribe",
                &owner,
                "",
                "default",
                plans[rng.gen_range(0..plans.len())],
                "",
                &rng.gen_range(0..30u32).to_string(),
                "",
                "",
            ),
            4 => row(
                "update_card",
                &owner,
                "",
                "",
                "",
                tokens[rng.gen_range(0..tokens.len())],
                "",
                "",
                "",
            ),
            5 => row(
                "trial",
                &owner,
                "",
                "",
                "",
                "",
                &rng.gen_range(1..30u32).to_string(),
                "",
                "",
            ),
            _ => row("pay_invoice", &owner, "", "", "", "", "", "", ""),
        };
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn row(
    r#type: &str,
    owner: &str,
    processor: &str,
    name: &str,
    plan: &str,
    token: &str,
    trial_days: &str,
    first_name: &str,
    last_name: &str,
) -> [String; 9] {
    [
        r#type, owner, processor, name, plan, token, trial_days, first_name, last_name,
    ]
    .map(str::to_string)
}
