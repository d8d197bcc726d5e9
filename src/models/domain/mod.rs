pub mod coin;
pub mod execution;
pub mod object;
pub mod payment;

pub use coin::{Coin, total_balance};
pub use execution::{ExecutionResult, ExecutionStatus, PaymentOutcome, SuiEvent};
pub use object::{ObjectDigest, ObjectId, ObjectRef, SuiAddress};
pub use payment::PaymentRequest;
