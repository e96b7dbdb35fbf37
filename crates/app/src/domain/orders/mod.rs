//! Orders

pub mod checkout;
pub mod errors;
pub mod models;
pub mod service;

pub use checkout::checkout;
pub use errors::OrdersServiceError;
pub use models::{Order, OrderItem, OrderStatus, OrderWithCustomer, PaymentMethod};
pub use service::*;
