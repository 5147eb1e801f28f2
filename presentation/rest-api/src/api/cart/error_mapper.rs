use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::cart::errors::CartError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for CartError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            CartError::InvalidQuantity => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    name: "ValidationError".to_string(),
                    message: "cart.invalid_quantity".to_string(),
                }),
            ),
            CartError::Product(err) => err.into_error_response(),
        }
    }
}
