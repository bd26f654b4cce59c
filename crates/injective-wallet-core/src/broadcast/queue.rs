/*
[INPUT]:  Broadcast start/finish notifications
[OUTPUT]: Busy flag rejecting overlapping broadcasts
[POS]:    Broadcast layer - transaction queue guard
[UPDATE]: When queue semantics change
*/

use crate::http::{Result, WalletError};
use crate::types::QueueStatus;

/// Best-effort guard: one in-flight broadcast at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TxQueue {
    status: QueueStatus,
}

impl TxQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the queue; fails while another broadcast holds it
    pub fn queue(&mut self) -> Result<()> {
        if self.status == QueueStatus::Loading {
            return Err(WalletError::QueueBusy);
        }
        self.status = QueueStatus::Loading;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.status = QueueStatus::Idle;
    }

    pub fn status(&self) -> QueueStatus {
        self.status
    }
}
