use delivery_service::{
    application::usercases::deliveries::{DeliveryService, DeliveryUseCase},
    config::config_model::Database,
    domain::{
        errors::DeliveryError,
        value_objects::{
            deliveries::{CreateDeliveryRequest, UpdateDeliveryRequest},
            query_context::QueryContext,
        },
    },
    infrastructure::postgres::{
        postgres_connection::{self, PgPoolSquad},
        repositories::deliveries::DeliveryPostgres,
    },
};
use diesel::connection::SimpleConnection;
use std::{sync::Arc, time::Duration};

const CREATE_ENTREGAS: &str =
    include_str!("../migrations/2024-06-01-000000_create_entregas/up.sql");

fn test_pool() -> Option<PgPoolSquad> {
    dotenvy::dotenv().ok();
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = postgres_connection::establish_connection(&Database {
        url,
        max_connections: 4,
        min_idle: 1,
        max_lifetime: 60,
        connection_timeout: 10,
    })
    .expect("test database should be reachable");

    Some(pool)
}

fn apply_schema(pool: &PgPoolSquad) {
    pool.get()
        .expect("connection")
        .batch_execute(CREATE_ENTREGAS)
        .expect("entregas table");
}

fn ctx() -> QueryContext {
    QueryContext::with_timeout(Duration::from_secs(10))
}

fn create_request(cliente: &str, cidade: &str) -> CreateDeliveryRequest {
    CreateDeliveryRequest {
        cliente: cliente.to_string(),
        peso: 10.5,
        endereco: "Endereço 123".to_string(),
        logradouro: "Rua 1".to_string(),
        numero: "123".to_string(),
        bairro: "Bairro A".to_string(),
        complemento: "Casa".to_string(),
        cidade: cidade.to_string(),
        estado: "Estado A".to_string(),
        pais: "País A".to_string(),
        latitude: 40.7128,
        longitude: -74.006,
    }
}

fn update_request(cidade: &str) -> UpdateDeliveryRequest {
    UpdateDeliveryRequest {
        peso: 12.5,
        endereco: "456 Novo Endereço".to_string(),
        logradouro: "Nova Rua".to_string(),
        numero: "456".to_string(),
        bairro: "Novo Bairro".to_string(),
        complemento: "Apartamento".to_string(),
        cidade: cidade.to_string(),
        estado: "Novo Estado".to_string(),
        pais: "Novo País".to_string(),
        latitude: 51.5074,
        longitude: -0.1278,
    }
}

// One sequential scenario: every step shares the same table.
#[tokio::test]
async fn delivery_lifecycle_against_postgres() {
    let Some(pool) = test_pool() else {
        eprintln!("TEST_DATABASE_URL not set; skipping postgres lifecycle test");
        return;
    };
    apply_schema(&pool);

    let repository = DeliveryPostgres::new(Arc::new(pool));
    let service = DeliveryUseCase::new(Arc::new(repository));

    service.delete_all_deliveries(ctx()).await.unwrap();

    // Round-trip.
    let first = service
        .create_delivery(ctx(), create_request("Cliente A", "Cidade A"))
        .await
        .unwrap();
    let fetched = service.get_delivery(ctx(), first.id).await.unwrap();
    assert_eq!(fetched.cliente, "Cliente A");
    assert_eq!(fetched.peso, 10.5);
    assert_eq!(fetched.cidade, "Cidade A");
    assert_eq!(fetched.longitude, -74.006);

    // Idempotent read.
    let again = service.get_delivery(ctx(), first.id).await.unwrap();
    assert_eq!(fetched, again);

    let second = service
        .create_delivery(ctx(), create_request("Cliente B", "Cidade B"))
        .await
        .unwrap();
    let third = service
        .create_delivery(ctx(), create_request("Cliente C", "Cidade A"))
        .await
        .unwrap();
    assert!(second.id > first.id && third.id > second.id);

    // Filter and ordering.
    let all = service.get_deliveries(ctx(), String::new()).await.unwrap();
    let ids: Vec<i32> = all.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);

    let in_a = service
        .get_deliveries(ctx(), "Cidade A".to_string())
        .await
        .unwrap();
    let ids: Vec<i32> = in_a.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![third.id, first.id]);

    // Update keeps id, cliente and data_inclusao; refreshes data_alteracao.
    let updated = service
        .update_delivery(ctx(), first.id, update_request("Nova Cidade"))
        .await
        .unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.cliente, "Cliente A");
    assert_eq!(updated.cidade, "Nova Cidade");
    assert_eq!(updated.peso, 12.5);
    assert_eq!(updated.data_inclusao, first.data_inclusao);
    assert!(updated.data_alteracao > first.data_alteracao);

    // Missing ids.
    let missing = third.id + 1000;
    let err = service
        .update_delivery(ctx(), missing, update_request("X"))
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::NotFound(id) if id == missing));

    let err = service.delete_delivery(ctx(), missing).await.unwrap_err();
    assert!(err.is_not_found());

    // Delete then read.
    service.delete_delivery(ctx(), second.id).await.unwrap();
    let err = service.get_delivery(ctx(), second.id).await.unwrap_err();
    assert!(err.is_not_found());

    // Bulk delete.
    service.delete_all_deliveries(ctx()).await.unwrap();
    let remaining = service.get_deliveries(ctx(), String::new()).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn expired_deadline_never_reaches_the_store() {
    let Some(pool) = test_pool() else {
        eprintln!("TEST_DATABASE_URL not set; skipping postgres deadline test");
        return;
    };

    let repository = DeliveryPostgres::new(Arc::new(pool));
    let service = DeliveryUseCase::new(Arc::new(repository));

    let expired = QueryContext::with_timeout(Duration::ZERO);
    let err = service
        .get_deliveries(expired, String::new())
        .await
        .unwrap_err();

    assert!(matches!(err, DeliveryError::DeadlineExceeded));
}
