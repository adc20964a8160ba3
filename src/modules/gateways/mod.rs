pub mod models;
pub mod services;

pub use models::{GatewayError, PaymentRequest, PaymentResult, PaymentStatus};
pub use services::{
    AdyenGateway, GatewayInfo, GatewayService, PaymentGateway, PendingPayment, SquareGateway,
};
