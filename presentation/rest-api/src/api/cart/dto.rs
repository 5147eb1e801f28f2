use poem_openapi::Object;

use business::domain::cart::model::CartItem;

use crate::api::product::dto::ProductResponse;

#[derive(Debug, Clone, Object)]
pub struct AddCartItemRequest {
    /// Product barcode
    pub code: String,
    /// Units to add (default: 1)
    #[oai(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Object)]
pub struct UpdateCartItemRequest {
    /// New quantity; zero or less removes the item
    pub quantity: i64,
}

#[derive(Debug, Clone, Object)]
pub struct CartItemResponse {
    pub product: ProductResponse,
    pub quantity: u32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            product: item.product.into(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    /// Sum of quantities across all items
    pub total: u64,
}

impl From<Vec<CartItem>> for CartResponse {
    fn from(items: Vec<CartItem>) -> Self {
        let total = items.iter().map(|item| u64::from(item.quantity)).sum();
        Self {
            items: items.into_iter().map(Into::into).collect(),
            total,
        }
    }
}
