pub mod config;

pub use config::{
    Config, ContractConfig, GasConfig, Network, NetworkConfig, PaymentConfig, SignerConfig,
};
