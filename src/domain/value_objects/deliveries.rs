use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    entities::deliveries::{DeliveryEntity, InsertDeliveryEntity, UpdateDeliveryEntity},
    value_objects::required::{RequiredFields, required},
};

// Absent fields decode to zero values so the validator can report every one
// of them, instead of serde stopping at the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateDeliveryRequest {
    #[validate(custom(function = "required"))]
    pub cliente: String,
    #[validate(custom(function = "required"))]
    pub peso: f64,
    #[validate(custom(function = "required"))]
    pub endereco: String,
    #[validate(custom(function = "required"))]
    pub logradouro: String,
    #[validate(custom(function = "required"))]
    pub numero: String,
    #[validate(custom(function = "required"))]
    pub bairro: String,
    #[validate(custom(function = "required"))]
    pub complemento: String,
    #[validate(custom(function = "required"))]
    pub cidade: String,
    #[validate(custom(function = "required"))]
    pub estado: String,
    #[validate(custom(function = "required"))]
    pub pais: String,
    #[validate(custom(function = "required"))]
    pub latitude: f64,
    #[validate(custom(function = "required"))]
    pub longitude: f64,
}

impl RequiredFields for CreateDeliveryRequest {
    const FIELDS: &'static [&'static str] = &[
        "cliente",
        "peso",
        "endereco",
        "logradouro",
        "numero",
        "bairro",
        "complemento",
        "cidade",
        "estado",
        "pais",
        "latitude",
        "longitude",
    ];
}

impl CreateDeliveryRequest {
    pub fn to_entity(&self) -> InsertDeliveryEntity {
        InsertDeliveryEntity {
            cliente: self.cliente.clone(),
            peso: self.peso,
            endereco: self.endereco.clone(),
            logradouro: self.logradouro.clone(),
            numero: self.numero.clone(),
            bairro: self.bairro.clone(),
            complemento: self.complemento.clone(),
            cidade: self.cidade.clone(),
            estado: self.estado.clone(),
            pais: self.pais.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Same as [`CreateDeliveryRequest`] minus `cliente`, which never changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateDeliveryRequest {
    #[validate(custom(function = "required"))]
    pub peso: f64,
    #[validate(custom(function = "required"))]
    pub endereco: String,
    #[validate(custom(function = "required"))]
    pub logradouro: String,
    #[validate(custom(function = "required"))]
    pub numero: String,
    #[validate(custom(function = "required"))]
    pub bairro: String,
    #[validate(custom(function = "required"))]
    pub complemento: String,
    #[validate(custom(function = "required"))]
    pub cidade: String,
    #[validate(custom(function = "required"))]
    pub estado: String,
    #[validate(custom(function = "required"))]
    pub pais: String,
    #[validate(custom(function = "required"))]
    pub latitude: f64,
    #[validate(custom(function = "required"))]
    pub longitude: f64,
}

impl RequiredFields for UpdateDeliveryRequest {
    const FIELDS: &'static [&'static str] = &[
        "peso",
        "endereco",
        "logradouro",
        "numero",
        "bairro",
        "complemento",
        "cidade",
        "estado",
        "pais",
        "latitude",
        "longitude",
    ];
}

impl UpdateDeliveryRequest {
    pub fn to_entity(&self) -> UpdateDeliveryEntity {
        UpdateDeliveryEntity {
            peso: self.peso,
            endereco: self.endereco.clone(),
            logradouro: self.logradouro.clone(),
            numero: self.numero.clone(),
            bairro: self.bairro.clone(),
            complemento: self.complemento.clone(),
            cidade: self.cidade.clone(),
            estado: self.estado.clone(),
            pais: self.pais.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResponse {
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

impl From<DeliveryEntity> for DeliveryResponse {
    fn from(value: DeliveryEntity) -> Self {
        Self {
            id: value.id,
            cliente: value.cliente,
            peso: value.peso,
            endereco: value.endereco,
            logradouro: value.logradouro,
            numero: value.numero,
            bairro: value.bairro,
            complemento: value.complemento,
            cidade: value.cidade,
            estado: value.estado,
            pais: value.pais,
            latitude: value.latitude,
            longitude: value.longitude,
            data_inclusao: value.data_inclusao,
            data_alteracao: value.data_alteracao,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ListDeliveriesFilter {
    #[serde(default)]
    pub city: String,
}
