//! Users service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    domain::{decode_rows, users::{errors::UsersServiceError, models::AccountUpdate}},
    gateway::{Direction, Filter, Gateway, Query},
    session::models::{Role, UserProfile},
};

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Every registered user, newest first (back-office).
    async fn list_users(&self) -> Result<Vec<UserProfile>, UsersServiceError>;

    /// Changes a user's role flag.
    ///
    /// Whether the caller is allowed to (superuser gating) is the view
    /// layer's concern; the backend has the final say either way.
    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<(), UsersServiceError>;

    /// Updates a shopper's own account details.
    async fn update_account(
        &self,
        user_id: Uuid,
        update: AccountUpdate,
    ) -> Result<UserProfile, UsersServiceError>;
}

/// Gateway-backed [`UsersService`].
pub struct RestUsersService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for RestUsersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestUsersService").finish_non_exhaustive()
    }
}

impl RestUsersService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl UsersService for RestUsersService {
    async fn list_users(&self) -> Result<Vec<UserProfile>, UsersServiceError> {
        let rows = self
            .gateway
            .select("users", Query::new().order("created_at", Direction::Desc))
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn update_role(&self, user_id: Uuid, role: Role) -> Result<(), UsersServiceError> {
        self.gateway
            .update(
                "users",
                json!({ "role": role }),
                vec![Filter::eq("id", user_id)],
            )
            .await?;

        info!(user_uuid = %user_id, role = role.as_str(), "changed user role");

        Ok(())
    }

    async fn update_account(
        &self,
        user_id: Uuid,
        update: AccountUpdate,
    ) -> Result<UserProfile, UsersServiceError> {
        let row = self
            .gateway
            .update(
                "users",
                serde_json::to_value(&update)?,
                vec![Filter::eq("id", user_id)],
            )
            .await?;

        Ok(serde_json::from_value(row)?)
    }
}
