//! Application layer containing the disbursement workflow.
//!
//! The `DisbursementScheduler` arms one delayed `tokio` task per accepted
//! event; each task drives an `Orchestrator` run that resolves the payer's
//! split template, allocates the gross amount and disburses entry by entry.

pub mod allocator;
pub mod disburser;
pub mod orchestrator;
pub mod resolver;
pub mod scheduler;
