use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, payload::Json};

use business::domain::cart::use_cases::add_by_barcode::{
    AddToCartByBarcodeParams, AddToCartByBarcodeUseCase,
};
use business::domain::cart::use_cases::manage::ManageCartUseCase;

use crate::api::cart::dto::{AddCartItemRequest, CartResponse, UpdateCartItemRequest};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::tags::ApiTags;

pub struct CartApi {
    cart: Arc<dyn ManageCartUseCase>,
    add_by_barcode_use_case: Arc<dyn AddToCartByBarcodeUseCase>,
}

impl CartApi {
    pub fn new(
        cart: Arc<dyn ManageCartUseCase>,
        add_by_barcode_use_case: Arc<dyn AddToCartByBarcodeUseCase>,
    ) -> Self {
        Self {
            cart,
            add_by_barcode_use_case,
        }
    }
}

/// Cart API
///
/// The cart is kept in memory and written to local storage after every
/// change.
#[OpenApi]
impl CartApi {
    /// Get the cart
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(&self) -> Json<CartResponse> {
        Json(self.cart.items().await.into())
    }

    /// Add a product
    ///
    /// Looks the barcode up and adds the product, or increments its quantity
    /// when it is already in the cart.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(&self, body: Json<AddCartItemRequest>) -> AddCartItemResponse {
        let params = AddToCartByBarcodeParams {
            code: body.0.code,
            quantity: body.0.quantity,
        };

        match self.add_by_barcode_use_case.execute(params).await {
            Ok(items) => AddCartItemResponse::Ok(Json(items.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => AddCartItemResponse::BadRequest(json),
                    404 => AddCartItemResponse::NotFound(json),
                    502 => AddCartItemResponse::BadGateway(json),
                    _ => AddCartItemResponse::InternalError(json),
                }
            }
        }
    }

    /// Set an item quantity
    ///
    /// Zero or a negative quantity removes the item. Unknown codes leave the
    /// cart unchanged.
    #[oai(path = "/cart/items/:code", method = "put", tag = "ApiTags::Cart")]
    async fn update_item(
        &self,
        code: Path<String>,
        body: Json<UpdateCartItemRequest>,
    ) -> Json<CartResponse> {
        let items = self.cart.update_quantity(&code.0, body.0.quantity).await;
        Json(items.into())
    }

    /// Remove an item
    #[oai(path = "/cart/items/:code", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(&self, code: Path<String>) -> Json<CartResponse> {
        Json(self.cart.remove_from_cart(&code.0).await.into())
    }

    /// Empty the cart
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear_cart(&self) -> ClearCartResponse {
        self.cart.clear_cart().await;
        ClearCartResponse::NoContent
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum AddCartItemResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ClearCartResponse {
    #[oai(status = 204)]
    NoContent,
}
