use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    entities::deliveries::{DeliveryEntity, InsertDeliveryEntity, UpdateDeliveryEntity},
    errors::DeliveryResult,
    value_objects::query_context::QueryContext,
};

/// Sole reader and writer of persisted deliveries.
///
/// Mutations each run in their own transaction; reads run without one.
/// A missing id surfaces as `DeliveryError::NotFound`, every other store
/// failure as `DeliveryError::Storage`.
#[async_trait]
#[automock]
pub trait DeliveryRepository {
    async fn create_delivery(
        &self,
        ctx: QueryContext,
        insert_delivery_entity: InsertDeliveryEntity,
    ) -> DeliveryResult<DeliveryEntity>;
    async fn update_delivery(
        &self,
        ctx: QueryContext,
        id: i32,
        update_delivery_entity: UpdateDeliveryEntity,
    ) -> DeliveryResult<DeliveryEntity>;
    async fn get_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<DeliveryEntity>;
    async fn get_deliveries(&self, ctx: QueryContext) -> DeliveryResult<Vec<DeliveryEntity>>;
    async fn get_deliveries_by_city(
        &self,
        ctx: QueryContext,
        city: String,
    ) -> DeliveryResult<Vec<DeliveryEntity>>;
    async fn delete_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<()>;
    async fn delete_all_deliveries(&self, ctx: QueryContext) -> DeliveryResult<()>;
}
