pub mod builder;
pub mod coin;
pub mod gas;
pub mod signer;
pub mod simulation;
pub mod types;
