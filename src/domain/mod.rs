//! Domain layer: value objects, the split template model and the ports
//! through which the application reaches the outside world.

pub mod bank;
pub mod disbursement;
pub mod event;
pub mod money;
pub mod notification;
pub mod ports;
pub mod split;
