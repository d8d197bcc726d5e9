pub mod payment_service;
pub mod tx;

pub use payment_service::PaymentService;
