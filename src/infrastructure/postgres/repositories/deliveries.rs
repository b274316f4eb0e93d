use async_trait::async_trait;
use diesel::{Connection, PgConnection, RunQueryDsl, delete, dsl::now, insert_into, prelude::*, update};
use std::sync::Arc;
use tokio::task;
use tracing::debug;

use crate::{
    domain::{
        entities::deliveries::{DeliveryEntity, InsertDeliveryEntity, UpdateDeliveryEntity},
        errors::{DeliveryError, DeliveryResult},
        repositories::deliveries::DeliveryRepository,
        value_objects::query_context::QueryContext,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::entregas},
};

pub struct DeliveryPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DeliveryPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    /// Runs `work` on the blocking threadpool with a pooled connection.
    ///
    /// The request deadline bounds the pool checkout, the server-side
    /// `statement_timeout` and the wait on the task itself.
    async fn run<T, F>(&self, ctx: QueryContext, work: F) -> DeliveryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> DeliveryResult<T> + Send + 'static,
    {
        let remaining = ctx.remaining().ok_or(DeliveryError::DeadlineExceeded)?;
        let db_pool = Arc::clone(&self.db_pool);

        let handle = task::spawn_blocking(move || -> DeliveryResult<T> {
            let mut conn = db_pool.get_timeout(remaining)?;
            let remaining = ctx.remaining().ok_or(DeliveryError::DeadlineExceeded)?;
            set_statement_timeout(&mut conn, remaining)?;
            work(&mut conn)
        });

        // On expiry the blocking task keeps running; its transactions re-check
        // the deadline before commit.
        match tokio::time::timeout_at(ctx.deadline(), handle).await {
            Ok(joined) => joined?,
            Err(_) => Err(DeliveryError::DeadlineExceeded),
        }
    }
}

fn set_statement_timeout(
    conn: &mut PgConnection,
    remaining: std::time::Duration,
) -> DeliveryResult<()> {
    // Session level: every call through `run` sets its own value first.
    let millis = remaining.as_millis().max(1);
    diesel::sql_query(format!("SET statement_timeout = {millis}")).execute(conn)?;
    Ok(())
}

fn find_delivery(conn: &mut PgConnection, id: i32) -> DeliveryResult<DeliveryEntity> {
    entregas::table
        .find(id)
        .select(DeliveryEntity::as_select())
        .first::<DeliveryEntity>(conn)
        .optional()?
        .ok_or(DeliveryError::NotFound(id))
}

#[async_trait]
impl DeliveryRepository for DeliveryPostgres {
    async fn create_delivery(
        &self,
        ctx: QueryContext,
        insert_delivery_entity: InsertDeliveryEntity,
    ) -> DeliveryResult<DeliveryEntity> {
        self.run(ctx, move |conn| {
            let id = conn.transaction::<i32, DeliveryError, _>(|tx| {
                let id = insert_into(entregas::table)
                    .values(&insert_delivery_entity)
                    .returning(entregas::id)
                    .get_result::<i32>(tx)?;
                ctx.ensure_time_left()?;
                Ok(id)
            })?;

            debug!(delivery_id = id, "deliveries: inserted");
            find_delivery(conn, id)
        })
        .await
    }

    async fn update_delivery(
        &self,
        ctx: QueryContext,
        id: i32,
        update_delivery_entity: UpdateDeliveryEntity,
    ) -> DeliveryResult<DeliveryEntity> {
        self.run(ctx, move |conn| {
            conn.transaction::<(), DeliveryError, _>(|tx| {
                let affected = update(entregas::table.find(id))
                    .set((&update_delivery_entity, entregas::data_alteracao.eq(now)))
                    .execute(tx)?;

                if affected == 0 {
                    return Err(DeliveryError::NotFound(id));
                }
                ctx.ensure_time_left()?;
                Ok(())
            })?;

            debug!(delivery_id = id, "deliveries: updated");
            find_delivery(conn, id)
        })
        .await
    }

    async fn get_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<DeliveryEntity> {
        self.run(ctx, move |conn| find_delivery(conn, id)).await
    }

    async fn get_deliveries(&self, ctx: QueryContext) -> DeliveryResult<Vec<DeliveryEntity>> {
        self.run(ctx, |conn| {
            let results = entregas::table
                .select(DeliveryEntity::as_select())
                .order(entregas::id.desc())
                .load::<DeliveryEntity>(conn)?;

            Ok(results)
        })
        .await
    }

    async fn get_deliveries_by_city(
        &self,
        ctx: QueryContext,
        city: String,
    ) -> DeliveryResult<Vec<DeliveryEntity>> {
        self.run(ctx, move |conn| {
            let results = entregas::table
                .select(DeliveryEntity::as_select())
                .filter(entregas::cidade.eq(city))
                .order(entregas::id.desc())
                .load::<DeliveryEntity>(conn)?;

            Ok(results)
        })
        .await
    }

    async fn delete_delivery(&self, ctx: QueryContext, id: i32) -> DeliveryResult<()> {
        self.run(ctx, move |conn| {
            conn.transaction::<(), DeliveryError, _>(|tx| {
                let affected = delete(entregas::table.find(id)).execute(tx)?;

                if affected == 0 {
                    return Err(DeliveryError::NotFound(id));
                }
                ctx.ensure_time_left()?;
                Ok(())
            })?;

            debug!(delivery_id = id, "deliveries: deleted");
            Ok(())
        })
        .await
    }

    async fn delete_all_deliveries(&self, ctx: QueryContext) -> DeliveryResult<()> {
        self.run(ctx, move |conn| {
            let affected = conn.transaction::<usize, DeliveryError, _>(|tx| {
                let affected = delete(entregas::table).execute(tx)?;
                ctx.ensure_time_left()?;
                Ok(affected)
            })?;

            debug!(affected, "deliveries: deleted all");
            Ok(())
        })
        .await
    }
}
