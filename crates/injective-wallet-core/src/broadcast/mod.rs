/*
[INPUT]:  Routed messages from the wallet session
[OUTPUT]: Broadcaster capability, mock and queue guard
[POS]:    Broadcast layer - module root
[UPDATE]: When adding broadcast components
*/

pub mod broadcaster;
pub mod queue;

pub use broadcaster::{BroadcastMode, BroadcastRequest, MockBroadcaster, MsgBroadcaster};
pub use queue::TxQueue;
