use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    errors::DeliveryResult,
    repositories::deliveries::DeliveryRepository,
    value_objects::{
        deliveries::{CreateDeliveryRequest, DeliveryResponse, UpdateDeliveryRequest},
        query_context::QueryContext,
    },
};

/// Operations the HTTP layer drives. Errors from the repository come back
/// untouched.
#[async_trait]
#[automock]
pub trait DeliveryService {
    async fn create_delivery(
        &self,
        ctx: QueryContext,
        request: CreateDeliveryRequest,
    ) -> DeliveryResult<DeliveryResponse>;
    async fn get_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<DeliveryResponse>;
    /// An empty `city` lists everything.
    async fn get_deliveries(
        &self,
        ctx: QueryContext,
        city: String,
    ) -> DeliveryResult<Vec<DeliveryResponse>>;
    async fn update_delivery(
        &self,
        ctx: QueryContext,
        id: i32,
        request: UpdateDeliveryRequest,
    ) -> DeliveryResult<DeliveryResponse>;
    async fn delete_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<()>;
    async fn delete_all_deliveries(&self, ctx: QueryContext) -> DeliveryResult<()>;
}

pub struct DeliveryUseCase<T>
where
    T: DeliveryRepository + Send + Sync + 'static,
{
    delivery_repository: Arc<T>,
}

impl<T> DeliveryUseCase<T>
where
    T: DeliveryRepository + Send + Sync + 'static,
{
    pub fn new(delivery_repository: Arc<T>) -> Self {
        Self {
            delivery_repository,
        }
    }
}

#[async_trait]
impl<T> DeliveryService for DeliveryUseCase<T>
where
    T: DeliveryRepository + Send + Sync + 'static,
{
    async fn create_delivery(
        &self,
        ctx: QueryContext,
        request: CreateDeliveryRequest,
    ) -> DeliveryResult<DeliveryResponse> {
        let entity = self
            .delivery_repository
            .create_delivery(ctx, request.to_entity())
            .await?;

        Ok(entity.into())
    }

    async fn get_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<DeliveryResponse> {
        let entity = self.delivery_repository.get_delivery(ctx, id).await?;

        Ok(entity.into())
    }

    async fn get_deliveries(
        &self,
        ctx: QueryContext,
        city: String,
    ) -> DeliveryResult<Vec<DeliveryResponse>> {
        let entities = if city.is_empty() {
            self.delivery_repository.get_deliveries(ctx).await?
        } else {
            debug!(city = %city, "deliveries: filtering by city");
            self.delivery_repository
                .get_deliveries_by_city(ctx, city)
                .await?
        };

        Ok(entities.into_iter().map(DeliveryResponse::from).collect())
    }

    async fn update_delivery(
        &self,
        ctx: QueryContext,
        id: i32,
        request: UpdateDeliveryRequest,
    ) -> DeliveryResult<DeliveryResponse> {
        let entity = self
            .delivery_repository
            .update_delivery(ctx, id, request.to_entity())
            .await?;

        Ok(entity.into())
    }

    async fn delete_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<()> {
        self.delivery_repository.delete_delivery(ctx, id).await
    }

    async fn delete_all_deliveries(&self, ctx: QueryContext) -> DeliveryResult<()> {
        self.delivery_repository.delete_all_deliveries(ctx).await
    }
}
