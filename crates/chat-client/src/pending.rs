//! Outcome handle for fire-and-forget sends

use chat_core::MessageId;
use tokio::sync::watch;

/// Delivery progress of one chat send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sending,
    Sent,
    Failed,
}

impl DeliveryStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Sending)
    }
}

/// Returned by [`crate::SyncClient::send_message`]
///
/// Dropping it does not cancel the send.
#[derive(Debug, Clone)]
pub struct PendingSend {
    id: MessageId,
    status: watch::Receiver<DeliveryStatus>,
}

impl PendingSend {
    pub(crate) fn new(id: MessageId) -> (Self, watch::Sender<DeliveryStatus>) {
        let (tx, rx) = watch::channel(DeliveryStatus::Sending);
        (Self { id, status: rx }, tx)
    }

    /// Client-generated id the message will carry in the log
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Current status without waiting
    pub fn status(&self) -> DeliveryStatus {
        *self.status.borrow()
    }

    /// Wait until the send is settled
    pub async fn outcome(&mut self) -> DeliveryStatus {
        match self.status.wait_for(DeliveryStatus::is_settled).await {
            Ok(status) => *status,
            // Sender dropped without settling; the task was torn down.
            Err(_) => DeliveryStatus::Failed,
        }
    }
}
