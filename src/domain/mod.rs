//! Domain types for the reservation-call service
//!
//! Core abstractions shared by the service and the provider implementations.

mod agent;
mod call;
mod phone;
mod reservation;

pub use agent::*;
pub use call::*;
pub use phone::*;
pub use reservation::*;
