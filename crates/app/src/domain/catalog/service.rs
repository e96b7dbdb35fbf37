//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        catalog::{
            errors::CatalogServiceError,
            models::{NewProduct, Product},
        },
        decode_rows,
    },
    gateway::{Direction, Filter, Gateway, Query},
};

/// Storage bucket holding product and live-session imagery.
pub const PRODUCT_IMAGES_BUCKET: &str = "productImages";

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Products visible to shoppers (active only), newest first.
    async fn list_active_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Every product, for the back-office list.
    async fn list_all_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// A single product by id.
    async fn get_product(&self, id: Uuid) -> Result<Product, CatalogServiceError>;

    /// Creates a product row.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Replaces a product row's fields.
    async fn update_product(
        &self,
        id: Uuid,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError>;

    /// Toggles shopper visibility without touching other fields.
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), CatalogServiceError>;

    /// Uploads a product image, returning its public URL.
    async fn upload_product_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CatalogServiceError>;
}

/// Gateway-backed [`CatalogService`].
pub struct RestCatalogService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for RestCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestCatalogService").finish_non_exhaustive()
    }
}

impl RestCatalogService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CatalogService for RestCatalogService {
    async fn list_active_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let rows = self
            .gateway
            .select(
                "products",
                Query::new()
                    .filter(Filter::eq("is_active", true))
                    .order("created_at", Direction::Desc),
            )
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn list_all_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let rows = self
            .gateway
            .select("products", Query::new().order("created_at", Direction::Desc))
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn get_product(&self, id: Uuid) -> Result<Product, CatalogServiceError> {
        let row = self
            .gateway
            .select_one("products", Query::new().filter(Filter::eq("id", id)))
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let row = self
            .gateway
            .insert("products", serde_json::to_value(&product)?)
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn update_product(
        &self,
        id: Uuid,
        product: NewProduct,
    ) -> Result<Product, CatalogServiceError> {
        let row = self
            .gateway
            .update(
                "products",
                serde_json::to_value(&product)?,
                vec![Filter::eq("id", id)],
            )
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), CatalogServiceError> {
        self.gateway
            .update(
                "products",
                json!({ "is_active": is_active }),
                vec![Filter::eq("id", id)],
            )
            .await?;

        Ok(())
    }

    async fn upload_product_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CatalogServiceError> {
        Ok(self
            .gateway
            .upload(PRODUCT_IMAGES_BUCKET, file_name, content_type, bytes)
            .await?)
    }
}
