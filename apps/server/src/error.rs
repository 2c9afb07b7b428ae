//! HTTP error mapping.
//!
//! Every engine failure becomes a JSON body `{ "error": message }` with a
//! status that tells the client whether to fix the request (4xx) or retry
//! later (5xx).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use tillpoint_engine::SaleError;

/// An engine error carried to the HTTP layer.
#[derive(Debug)]
pub struct ApiError(pub SaleError);

impl From<SaleError> for ApiError {
    fn from(err: SaleError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    /// Status code for the wrapped engine error.
    ///
    /// - Bad request data and losing stock races → 400 (resubmit with
    ///   corrections, or just resubmit)
    /// - Unknown products → 404, message lists the ids
    /// - Everything the client cannot fix → 500
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SaleError::Validation(_)
            | SaleError::Pricing(_)
            | SaleError::InsufficientStock { .. }
            | SaleError::StockChanged { .. } => StatusCode::BAD_REQUEST,

            SaleError::ProductsNotFound { .. } => StatusCode::NOT_FOUND,

            SaleError::DuplicateReceiptNumber(_)
            | SaleError::TransactionTimeout
            | SaleError::TransactionAborted(_)
            | SaleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match &self.0 {
            // Specialized wording: the caller supplied a receipt label the
            // system has already issued
            SaleError::DuplicateReceiptNumber(receipt) => {
                format!("failed to record sale: receipt number '{receipt}' is already in use")
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, status = %status, "request rejected");
        }

        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tillpoint_core::{Quantity, ValidationError};
    use tillpoint_db::DbError;

    fn status_of(err: SaleError) -> StatusCode {
        ApiError(err).status()
    }

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(
            status_of(SaleError::Validation(ValidationError::EmptyItems)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SaleError::StockChanged {
                product_id: "p-1".to_string(),
                name: "Widget".to_string(),
                available: Quantity::from_hundredths(0),
                requested: Quantity::from_hundredths(100),
            }),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_unknown_products_are_404() {
        assert_eq!(
            status_of(SaleError::ProductsNotFound {
                ids: vec!["p-9".to_string()]
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_errors_are_500() {
        assert_eq!(
            status_of(SaleError::DuplicateReceiptNumber("R-1".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SaleError::TransactionTimeout),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(SaleError::Internal(DbError::PoolExhausted)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_duplicate_receipt_message_is_specialized() {
        let err = ApiError(SaleError::DuplicateReceiptNumber("R-1".to_string()));
        assert_eq!(
            err.message(),
            "failed to record sale: receipt number 'R-1' is already in use"
        );
    }
}
