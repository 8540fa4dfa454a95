//! Application layer containing the billing orchestration.
//!
//! `ProcessorRegistry` routes each capability to the adapter an owner's
//! processor selects, `SubscriptionEvaluator` answers subscription and trial
//! questions over loaded records, and `Billable` composes the two into the
//! surface an owner is billed through. `BillingEngine` drives `Billable` from
//! batches of operations against an owner store.

pub mod billable;
pub mod engine;
pub mod evaluator;
pub mod registry;
