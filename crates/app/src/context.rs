//! App Context

use std::sync::Arc;

use crate::{
    domain::{
        catalog::{CatalogService, RestCatalogService},
        lives::{LivesService, RestLivesService},
        orders::{ItemFailurePolicy, OrdersService, RestOrdersService},
        payments::{PaymentsService, RestPaymentsService},
        users::{RestUsersService, UsersService},
    },
    gateway::{Gateway, GatewayConfig, RestGateway},
    session::{AuthService, RestAuthService, SessionStore},
};

/// Everything the view layer needs, wired once at application start.
///
/// The session store and services are explicit values handed to views;
/// there is no ambient singleton, and dropping the context tears the whole
/// application state down.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub auth: Arc<dyn AuthService>,
    pub catalog: Arc<dyn CatalogService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub lives: Arc<dyn LivesService>,
    pub users: Arc<dyn UsersService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds the full service graph against one backend.
    #[must_use]
    pub fn new(config: GatewayConfig, item_failure_policy: ItemFailurePolicy) -> Self {
        let session = Arc::new(SessionStore::new());
        let gateway: Arc<dyn Gateway> =
            Arc::new(RestGateway::new(config.clone(), session.clone()));

        Self {
            session: session.clone(),
            auth: Arc::new(RestAuthService::new(config, session, gateway.clone())),
            catalog: Arc::new(RestCatalogService::new(gateway.clone())),
            orders: Arc::new(RestOrdersService::new(gateway.clone(), item_failure_policy)),
            payments: Arc::new(RestPaymentsService::new(gateway.clone())),
            lives: Arc::new(RestLivesService::new(gateway.clone())),
            users: Arc::new(RestUsersService::new(gateway)),
        }
    }
}
