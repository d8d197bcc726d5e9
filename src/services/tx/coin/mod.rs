pub mod coin_service;

pub use coin_service::CoinService;
