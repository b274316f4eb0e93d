use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::entregas;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = entregas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryEntity {
    pub id: i32,
    pub cliente: String,
    pub peso: f64,
    pub endereco: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub complemento: String,
    pub cidade: String,
    pub estado: String,
    pub pais: String,
    pub latitude: f64,
    pub longitude: f64,
    pub data_inclusao: DateTime<Utc>,
    pub data_alteracao: DateTime<Utc>,
}

/// Row shape for inserts; identity and both timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = entregas)]
pub struct InsertDeliveryEntity {
    pub cliente: String,
    pub peso: f64,
    pub endereco: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub complemento: String,
    pub cidade: String,
    pub estado: String,
    pub pais: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Mutable columns. `cliente` is fixed once the delivery exists.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = entregas)]
pub struct UpdateDeliveryEntity {
    pub peso: f64,
    pub endereco: String,
    pub logradouro: String,
    pub numero: String,
    pub bairro: String,
    pub complemento: String,
    pub cidade: String,
    pub estado: String,
    pub pais: String,
    pub latitude: f64,
    pub longitude: f64,
}
