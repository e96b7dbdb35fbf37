//! Shared storefront application modules: the REST gateway, the auth
//! session, and the domain services the view layer consumes.

pub mod context;
pub mod domain;
pub mod gateway;
pub mod session;
