use axum::{
    Json, Router,
    extract::{
        OriginalUri, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::{sync::Arc, time::Duration};
use tracing::{error, warn};

use crate::{
    application::usercases::deliveries::{DeliveryService, DeliveryUseCase},
    domain::{
        errors::DeliveryError,
        value_objects::{
            deliveries::{CreateDeliveryRequest, ListDeliveriesFilter, UpdateDeliveryRequest},
            query_context::QueryContext,
            required::RequiredFields,
        },
    },
    infrastructure::{
        axum_http::{
            error_responses::{ErrorKind, classify},
            validation::{RequestValidator, render_violations},
        },
        postgres::{
            postgres_connection::PgPoolSquad, repositories::deliveries::DeliveryPostgres,
        },
    },
};

pub struct DeliveryState<S>
where
    S: DeliveryService + Send + Sync + 'static,
{
    delivery_service: Arc<S>,
    validator: Arc<RequestValidator>,
    query_timeout: Duration,
}

impl<S> DeliveryState<S>
where
    S: DeliveryService + Send + Sync + 'static,
{
    pub fn new(
        delivery_service: Arc<S>,
        validator: Arc<RequestValidator>,
        query_timeout: Duration,
    ) -> Self {
        Self {
            delivery_service,
            validator,
            query_timeout,
        }
    }

    fn query_context(&self) -> QueryContext {
        QueryContext::with_timeout(self.query_timeout)
    }

    fn validate<T: RequiredFields>(&self, request: &T, path: &str) -> Result<(), Response> {
        match self.validator.validate(request) {
            Ok(violations) if violations.is_empty() => Ok(()),
            Ok(violations) => Err(classify(
                ErrorKind::BadRequest,
                render_violations(&violations),
                path,
            )
            .into_response()),
            Err(err) => {
                error!(error = %err, path, "deliveries: validator failed");
                Err(classify(ErrorKind::Internal, err, path).into_response())
            }
        }
    }
}

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    validator: Arc<RequestValidator>,
    query_timeout: Duration,
) -> Router {
    let delivery_repository = DeliveryPostgres::new(Arc::clone(&db_pool));
    let delivery_usecase = DeliveryUseCase::new(Arc::new(delivery_repository));

    router(DeliveryState::new(
        Arc::new(delivery_usecase),
        validator,
        query_timeout,
    ))
}

pub fn router<S>(state: DeliveryState<S>) -> Router
where
    S: DeliveryService + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            post(create_delivery::<S>)
                .get(get_deliveries::<S>)
                .delete(delete_all_deliveries::<S>),
        )
        .route(
            "/:id",
            get(get_delivery::<S>)
                .put(update_delivery::<S>)
                .delete(delete_delivery::<S>),
        )
        .with_state(Arc::new(state))
}

fn bad_request(cause: impl std::fmt::Display, path: &str) -> Response {
    classify(ErrorKind::BadRequest, cause, path).into_response()
}

fn delivery_error(err: &DeliveryError, path: &str) -> Response {
    let kind = ErrorKind::from(err);

    match kind {
        ErrorKind::Internal => error!(error = ?err, path, "deliveries: request failed"),
        _ => warn!(error = %err, path, "deliveries: request rejected"),
    }

    classify(kind, err, path).into_response()
}

pub async fn create_delivery<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<CreateDeliveryRequest>, JsonRejection>,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    if let Err(response) = state.validate(&request, path) {
        return response;
    }

    match state.delivery_service.create_delivery(ctx, request).await {
        Ok(delivery) => (StatusCode::CREATED, Json(delivery)).into_response(),
        Err(err) => delivery_error(&err, path),
    }
}

pub async fn get_deliveries<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
    filter: Result<Query<ListDeliveriesFilter>, QueryRejection>,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    let Query(filter) = match filter {
        Ok(filter) => filter,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    match state.delivery_service.get_deliveries(ctx, filter.city).await {
        Ok(deliveries) => (StatusCode::OK, Json(deliveries)).into_response(),
        Err(err) => delivery_error(&err, path),
    }
}

pub async fn get_delivery<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    match state.delivery_service.get_delivery(ctx, id).await {
        Ok(delivery) => (StatusCode::OK, Json(delivery)).into_response(),
        Err(err) => delivery_error(&err, path),
    }
}

pub async fn update_delivery<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<UpdateDeliveryRequest>, JsonRejection>,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    if let Err(response) = state.validate(&request, path) {
        return response;
    }

    match state.delivery_service.update_delivery(ctx, id, request).await {
        Ok(delivery) => (StatusCode::OK, Json(delivery)).into_response(),
        Err(err) => delivery_error(&err, path),
    }
}

pub async fn delete_delivery<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text(), path),
    };

    match state.delivery_service.delete_delivery(ctx, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => delivery_error(&err, path),
    }
}

pub async fn delete_all_deliveries<S>(
    State(state): State<Arc<DeliveryState<S>>>,
    OriginalUri(uri): OriginalUri,
) -> Response
where
    S: DeliveryService + Send + Sync + 'static,
{
    let path = uri.path();
    let ctx = state.query_context();

    match state.delivery_service.delete_all_deliveries(ctx).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => delivery_error(&err, path),
    }
}
