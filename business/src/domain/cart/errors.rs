#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("cart.invalid_quantity")]
    InvalidQuantity,
    #[error("cart.product_lookup_failed")]
    Product(#[from] crate::domain::product::errors::ProductError),
}
