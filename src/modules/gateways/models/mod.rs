pub mod payment;

pub use payment::{GatewayError, PaymentRequest, PaymentResult, PaymentStatus};
