//! Domain layer: owners, subscriptions, processor results and the ports the
//! application layer depends on.

pub mod billing;
pub mod capability;
pub mod money;
pub mod operation;
pub mod owner;
pub mod ports;
pub mod subscription;
