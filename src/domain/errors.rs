use thiserror::Error;

pub type DeliveryResult<T> = std::result::Result<T, DeliveryError>;

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// No delivery with this id exists.
    #[error("delivery {0} not found")]
    NotFound(i32),

    #[error("query deadline exceeded")]
    DeadlineExceeded,

    /// Anything the store reported that is not a missing row.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DeliveryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeliveryError::NotFound(_))
    }
}

impl From<diesel::result::Error> for DeliveryError {
    fn from(value: diesel::result::Error) -> Self {
        DeliveryError::Storage(value.into())
    }
}

impl From<diesel::r2d2::PoolError> for DeliveryError {
    fn from(value: diesel::r2d2::PoolError) -> Self {
        DeliveryError::Storage(value.into())
    }
}

impl From<tokio::task::JoinError> for DeliveryError {
    fn from(value: tokio::task::JoinError) -> Self {
        DeliveryError::Storage(value.into())
    }
}
