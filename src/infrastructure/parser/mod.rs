mod parser;

pub use parser::{ChainEvent, EventParser, EventType, PAYMENT_PROCESSED_EVENT, PaymentProcessed};
