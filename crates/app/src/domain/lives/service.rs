//! Lives service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        catalog::models::Product,
        decode_rows,
        lives::{
            errors::LivesServiceError,
            models::{Live, LiveProduct, LiveStatus, NewLive},
        },
    },
    gateway::{Filter, FilterValue, Gateway, Query},
};

#[automock]
#[async_trait]
pub trait LivesService: Send + Sync {
    /// All sessions, on-air first, then upcoming soonest-first, then ended
    /// most-recent-first.
    async fn list_lives(&self) -> Result<Vec<Live>, LivesServiceError>;

    /// A session by its URL slug.
    async fn get_live_by_slug(&self, slug: &str) -> Result<Live, LivesServiceError>;

    /// The products featured in a session.
    async fn get_live_products(&self, live_id: Uuid)
    -> Result<Vec<Product>, LivesServiceError>;

    /// Creates a session.
    async fn create_live(&self, live: NewLive) -> Result<Live, LivesServiceError>;

    /// Replaces a session's fields.
    async fn update_live(&self, id: Uuid, live: NewLive) -> Result<Live, LivesServiceError>;

    /// Moves a session through upcoming/live/ended.
    async fn set_status(&self, id: Uuid, status: LiveStatus) -> Result<(), LivesServiceError>;

    /// Features the given products in a session.
    async fn attach_products(
        &self,
        live_id: Uuid,
        product_ids: Vec<Uuid>,
    ) -> Result<(), LivesServiceError>;
}

/// Gateway-backed [`LivesService`].
pub struct RestLivesService {
    gateway: Arc<dyn Gateway>,
}

impl std::fmt::Debug for RestLivesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestLivesService").finish_non_exhaustive()
    }
}

impl RestLivesService {
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl LivesService for RestLivesService {
    async fn list_lives(&self) -> Result<Vec<Live>, LivesServiceError> {
        let rows = self.gateway.select("lives", Query::new()).await?;
        let mut lives: Vec<Live> = decode_rows(rows)?;

        sort_for_listing(&mut lives);

        Ok(lives)
    }

    async fn get_live_by_slug(&self, slug: &str) -> Result<Live, LivesServiceError> {
        let row = self
            .gateway
            .select_one("lives", Query::new().filter(Filter::eq("slug", slug)))
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn get_live_products(
        &self,
        live_id: Uuid,
    ) -> Result<Vec<Product>, LivesServiceError> {
        let rows = self
            .gateway
            .select(
                "live_products",
                Query::new().filter(Filter::eq("live_id", live_id)),
            )
            .await?;

        let links: Vec<LiveProduct> = decode_rows(rows)?;

        if links.is_empty() {
            return Ok(Vec::new());
        }

        let ids = links.into_iter().map(|link| FilterValue::Id(link.product_id));

        let rows = self
            .gateway
            .select("products", Query::new().filter(Filter::is_in("id", ids)))
            .await?;

        Ok(decode_rows(rows)?)
    }

    async fn create_live(&self, live: NewLive) -> Result<Live, LivesServiceError> {
        let row = self
            .gateway
            .insert("lives", serde_json::to_value(&live)?)
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn update_live(&self, id: Uuid, live: NewLive) -> Result<Live, LivesServiceError> {
        let row = self
            .gateway
            .update("lives", serde_json::to_value(&live)?, vec![Filter::eq("id", id)])
            .await?;

        Ok(serde_json::from_value(row)?)
    }

    async fn set_status(&self, id: Uuid, status: LiveStatus) -> Result<(), LivesServiceError> {
        self.gateway
            .update("lives", json!({ "status": status }), vec![Filter::eq("id", id)])
            .await?;

        Ok(())
    }

    async fn attach_products(
        &self,
        live_id: Uuid,
        product_ids: Vec<Uuid>,
    ) -> Result<(), LivesServiceError> {
        for product_id in product_ids {
            self.gateway
                .insert(
                    "live_products",
                    json!({ "live_id": live_id, "product_id": product_id }),
                )
                .await?;
        }

        Ok(())
    }
}

/// On-air sessions first, upcoming ones soonest-first, ended ones
/// most-recent-first.
fn sort_for_listing(lives: &mut [Live]) {
    fn rank(status: LiveStatus) -> u8 {
        match status {
            LiveStatus::Live => 0,
            LiveStatus::Upcoming => 1,
            LiveStatus::Ended => 2,
        }
    }

    lives.sort_by(|a, b| {
        rank(a.status).cmp(&rank(b.status)).then_with(|| {
            if a.status == LiveStatus::Ended {
                b.scheduled_at.cmp(&a.scheduled_at)
            } else {
                a.scheduled_at.cmp(&b.scheduled_at)
            }
        })
    });
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use crate::gateway::MockGateway;

    use super::*;

    fn live(slug: &str, status: &str, scheduled_at: &str) -> serde_json::Value {
        json!({
            "id": Uuid::new_v4(),
            "title": slug,
            "slug": slug,
            "scheduled_at": scheduled_at,
            "status": status,
            "cover_image": null,
            "created_at": "2024-06-01T10:00:00Z",
        })
    }

    #[tokio::test]
    async fn listing_puts_on_air_first_and_orders_within_status() -> TestResult {
        let mut gateway = MockGateway::new();

        gateway.expect_select().returning(|_, _| {
            Ok(vec![
                live("old-ended", "ended", "2024-06-01T20:00:00Z"),
                live("soon", "upcoming", "2024-06-20T20:00:00Z"),
                live("new-ended", "ended", "2024-06-10T20:00:00Z"),
                live("on-air", "live", "2024-06-15T20:00:00Z"),
                live("later", "upcoming", "2024-06-25T20:00:00Z"),
            ])
        });

        let service = RestLivesService::new(Arc::new(gateway));
        let slugs: Vec<String> = service
            .list_lives()
            .await?
            .into_iter()
            .map(|live| live.slug)
            .collect();

        assert_eq!(
            slugs,
            vec!["on-air", "soon", "later", "new-ended", "old-ended"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn live_products_resolve_through_the_link_table() -> TestResult {
        let mut gateway = MockGateway::new();
        let live_id = Uuid::new_v4();
        let product_id = Uuid::new_v4();

        gateway
            .expect_select()
            .withf(|table, _| table == "live_products")
            .returning(move |_, _| {
                Ok(vec![json!({ "live_id": live_id, "product_id": product_id })])
            });

        gateway
            .expect_select()
            .withf(move |table, query| {
                table == "products"
                    && query
                        .to_pairs()
                        .contains(&("id".to_owned(), format!("in.({product_id})")))
            })
            .returning(move |_, _| {
                Ok(vec![json!({
                    "id": product_id,
                    "name": "Gold ring",
                    "description": "",
                    "price": 1000,
                    "image_url": null,
                    "category": null,
                    "stock": 2,
                    "is_active": true,
                    "created_at": "2024-05-01T10:00:00Z",
                })])
            });

        let service = RestLivesService::new(Arc::new(gateway));
        let products = service.get_live_products(live_id).await?;

        assert_eq!(products.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn sessions_with_no_links_skip_the_product_read() -> TestResult {
        let mut gateway = MockGateway::new();

        gateway
            .expect_select()
            .withf(|table, _| table == "live_products")
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = RestLivesService::new(Arc::new(gateway));
        let products = service.get_live_products(Uuid::new_v4()).await?;

        assert!(products.is_empty());

        Ok(())
    }

    #[test]
    fn upcoming_sessions_sort_soonest_first() {
        let mut lives: Vec<Live> = vec![
            serde_json::from_value(live("later", "upcoming", "2024-06-25T20:00:00Z")),
            serde_json::from_value(live("soon", "upcoming", "2024-06-20T20:00:00Z")),
        ]
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("live rows should deserialize");

        sort_for_listing(&mut lives);

        let first = lives.first().map(|live| live.scheduled_at);

        assert_eq!(first, "2024-06-20T20:00:00Z".parse::<Timestamp>().ok());
    }
}
