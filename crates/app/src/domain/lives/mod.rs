//! Live-selling sessions

pub mod errors;
pub mod models;
pub mod service;

pub use errors::LivesServiceError;
pub use models::{Live, LiveProduct, LiveStatus, NewLive, slug_from_title};
pub use service::*;
