use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with id: {0}")]
    NotFound(i64),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Internal(format!("Database error: {}", err))
    }
}

/// Handlers never hit the `NotFound` arm since [`ProductError`] answers its
/// own 404; it serves code that folds catalog errors into [`AppError`].
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

/// `NotFound` answers a bare 404 with no body; everything else goes through
/// [`AppError`] and gets the JSON error body.
impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        match self {
            ProductError::NotFound(id) => {
                tracing::info!(product_id = id, "Product not found");
                StatusCode::NOT_FOUND.into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}
