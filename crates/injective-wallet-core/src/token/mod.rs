/*
[INPUT]:  Denoms and CoinGecko ids
[OUTPUT]: Cached token metadata and USD prices
[POS]:    Token layer - metadata resolution and price feeds
[UPDATE]: When token sources or cache rules change
*/

pub mod price;
pub mod service;

pub use price::PriceService;
pub use service::{TokenFetcher, TokenService};
