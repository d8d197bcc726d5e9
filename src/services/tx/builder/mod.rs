pub mod payment_builder;

pub use payment_builder::{MoveTarget, PaymentTxBuilder, treasury_object_arg};
