pub mod bcs;

pub use bcs::{BcsWriter, ToBcs};
