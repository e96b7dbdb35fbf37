//! Session

pub mod models;
pub mod service;
pub mod token;

pub use models::{Role, Session, UserProfile};
pub use service::{AuthService, AuthServiceError, RestAuthService, SessionStore};
pub use token::AccessToken;
