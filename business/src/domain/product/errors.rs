/// Errors surfaced by catalog lookups.
///
/// Every transport or decoding failure is translated into one of these
/// variants at the adapter boundary, so callers never see raw HTTP errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    #[error("product.invalid_input")]
    InvalidInput(&'static str),
    #[error("product.not_found")]
    NotFound,
    #[error("product.search_failed")]
    SearchFailed,
    #[error("product.fetch_failed")]
    FetchFailed,
    #[error("product.unknown")]
    Unknown,
}

impl ProductError {
    /// Stable, user-presentable copy for this error.
    pub fn user_message(&self) -> String {
        match self {
            ProductError::InvalidInput(message) => (*message).to_string(),
            ProductError::NotFound => "Product not found".to_string(),
            ProductError::SearchFailed => "Failed to search products. Please try again.".to_string(),
            ProductError::FetchFailed => {
                "Failed to fetch product details. Please try again.".to_string()
            }
            ProductError::Unknown => "Something went wrong. Please try again later.".to_string(),
        }
    }

    /// True for transport, timeout and non-2xx failures.
    pub fn is_request_failure(&self) -> bool {
        matches!(self, ProductError::SearchFailed | ProductError::FetchFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flag_only_transport_failures_as_request_failures() {
        assert!(ProductError::SearchFailed.is_request_failure());
        assert!(ProductError::FetchFailed.is_request_failure());
        assert!(!ProductError::NotFound.is_request_failure());
        assert!(!ProductError::InvalidInput("Barcode is required").is_request_failure());
        assert!(!ProductError::Unknown.is_request_failure());
    }

    #[test]
    fn should_keep_not_found_copy_distinct_from_fetch_failure() {
        assert_ne!(
            ProductError::NotFound.user_message(),
            ProductError::FetchFailed.user_message()
        );
        assert_eq!(
            ProductError::InvalidInput("Barcode is required").user_message(),
            "Barcode is required"
        );
    }
}
