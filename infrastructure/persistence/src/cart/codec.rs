use business::domain::cart::model::CartItem;
use business::domain::errors::RepositoryError;

/// Serializes the whole cart as a JSON array of flat line items.
pub fn encode(items: &[CartItem]) -> Result<String, RepositoryError> {
    serde_json::to_string(items).map_err(|_| RepositoryError::Persistence)
}

/// Parses a stored cart. Anything that is not a list of line items is
/// reported as corrupted.
pub fn decode(raw: &str) -> Result<Vec<CartItem>, RepositoryError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|_| RepositoryError::Corrupted)
}
