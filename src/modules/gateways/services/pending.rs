use crate::core::{Error, Result};
use crate::modules::gateways::models::PaymentResult;
use tokio::sync::oneshot;

/// Handle for a payment issued in non-blocking mode
///
/// The outcome is delivered over a oneshot channel, so exactly one of
/// success or failure is observed per request. `join` consumes the handle;
/// a completed payment cannot be observed twice. Cancellation is not
/// supported: dropping the handle does not stop the request, which runs to
/// completion or timeout on the I/O scheduler.
pub struct PendingPayment {
    rx: oneshot::Receiver<Result<PaymentResult>>,
}

impl PendingPayment {
    pub(crate) fn new(rx: oneshot::Receiver<Result<PaymentResult>>) -> Self {
        Self { rx }
    }

    /// Wait for the gateway outcome
    pub async fn join(self) -> Result<PaymentResult> {
        self.rx
            .await
            .map_err(|_| Error::gateway("Payment task dropped before completion"))?
    }

    /// Check for a completed outcome without waiting
    ///
    /// Returns `None` while the request is still in flight.
    pub fn try_join(&mut self) -> Option<Result<PaymentResult>> {
        self.rx.try_recv().ok()
    }
}
