/*
[INPUT]:  Chain message shapes, token metadata and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions shared across wallet, authz and token layers
[UPDATE]: When message envelopes or token metadata change
*/

pub mod enums;
pub mod models;
pub mod msgs;
pub mod responses;

pub use enums::*;
pub use models::*;
pub use msgs::*;
pub use responses::*;
