pub mod adyen;
pub mod gateway_service;
pub mod gateway_trait;
pub mod pending;
pub mod square;

pub use adyen::AdyenGateway;
pub use gateway_service::{GatewayInfo, GatewayService};
pub use gateway_trait::PaymentGateway;
pub use pending::PendingPayment;
pub use square::SquareGateway;
