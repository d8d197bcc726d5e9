pub mod sui_provider;
#[cfg(test)]
pub mod mock_provider;

pub use sui_provider::{ProviderTrait, SuiProvider};
