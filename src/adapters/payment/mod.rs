//! Payment gateway adapters.

mod simulated_gateway;

pub use simulated_gateway::{FailurePolicy, SimulatedPaymentGateway};
