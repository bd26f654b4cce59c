/*
[INPUT]:  HTTP client configuration and REST endpoints
[OUTPUT]: HTTP responses, typed token metadata and crate-wide errors
[POS]:    HTTP layer - REST communication with the cache service and token registry
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod cache;
pub mod client;
pub mod error;
pub mod registry;

pub use error::{Result, WalletError};

pub use cache::CacheApiTokenFetcher;
pub use client::{ClientConfig, RestClient};
pub use registry::RegistryTokenFetcher;
