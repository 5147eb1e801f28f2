use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartItem;
use crate::domain::cart::use_cases::add_by_barcode::{
    AddToCartByBarcodeParams, AddToCartByBarcodeUseCase,
};
use crate::domain::cart::use_cases::manage::ManageCartUseCase;
use crate::domain::logger::Logger;
use crate::domain::product::use_cases::get_by_barcode::{
    GetProductByBarcodeParams, GetProductByBarcodeUseCase,
};

/// Looks the product up by barcode and snapshots it into the cart.
pub struct AddToCartByBarcodeUseCaseImpl {
    pub cart: Arc<dyn ManageCartUseCase>,
    pub get_product: Arc<dyn GetProductByBarcodeUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl AddToCartByBarcodeUseCase for AddToCartByBarcodeUseCaseImpl {
    async fn execute(&self, params: AddToCartByBarcodeParams) -> Result<Vec<CartItem>, CartError> {
        let quantity = u32::try_from(params.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(CartError::InvalidQuantity)?;

        let product = self
            .get_product
            .execute(GetProductByBarcodeParams { code: params.code })
            .await?;

        self.logger
            .info(&format!("Adding {} x{} to cart", product.code, quantity));

        Ok(self.cart.add_to_cart(product, quantity).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::errors::ProductError;
    use crate::domain::product::model::Product;
    use mockall::mock;

    mock! {
        pub Cart {}

        #[async_trait]
        impl ManageCartUseCase for Cart {
            async fn items(&self) -> Vec<CartItem>;
            async fn add_to_cart(&self, product: Product, quantity: u32) -> Vec<CartItem>;
            async fn remove_from_cart(&self, code: &str) -> Vec<CartItem>;
            async fn update_quantity(&self, code: &str, quantity: i64) -> Vec<CartItem>;
            async fn clear_cart(&self) -> Vec<CartItem>;
            async fn cart_total(&self) -> u64;
            async fn is_in_cart(&self, code: &str) -> bool;
            async fn item_quantity(&self, code: &str) -> u32;
        }
    }

    mock! {
        pub GetProduct {}

        #[async_trait]
        impl GetProductByBarcodeUseCase for GetProduct {
            async fn execute(&self, params: GetProductByBarcodeParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_add_looked_up_product_to_cart() {
        let mut get_product = MockGetProduct::new();
        get_product
            .expect_execute()
            .withf(|params| params.code == "42")
            .returning(|params| Ok(Product::with_code(params.code)));
        let mut cart = MockCart::new();
        cart.expect_add_to_cart()
            .withf(|product, quantity| product.code == "42" && *quantity == 2)
            .returning(|product, quantity| vec![CartItem { product, quantity }]);

        let use_case = AddToCartByBarcodeUseCaseImpl {
            cart: Arc::new(cart),
            get_product: Arc::new(get_product),
            logger: mock_logger(),
        };

        let items = use_case
            .execute(AddToCartByBarcodeParams {
                code: "42".to_string(),
                quantity: 2,
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity_without_lookup() {
        let mut get_product = MockGetProduct::new();
        get_product.expect_execute().never();
        let mut cart = MockCart::new();
        cart.expect_add_to_cart().never();

        let use_case = AddToCartByBarcodeUseCaseImpl {
            cart: Arc::new(cart),
            get_product: Arc::new(get_product),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddToCartByBarcodeParams {
                code: "42".to_string(),
                quantity: 0,
            })
            .await;

        assert_eq!(result, Err(CartError::InvalidQuantity));
    }

    #[tokio::test]
    async fn should_propagate_missing_product() {
        let mut get_product = MockGetProduct::new();
        get_product
            .expect_execute()
            .returning(|_| Err(ProductError::NotFound));
        let mut cart = MockCart::new();
        cart.expect_add_to_cart().never();

        let use_case = AddToCartByBarcodeUseCaseImpl {
            cart: Arc::new(cart),
            get_product: Arc::new(get_product),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(AddToCartByBarcodeParams {
                code: "42".to_string(),
                quantity: 1,
            })
            .await;

        assert_eq!(result, Err(CartError::Product(ProductError::NotFound)));
    }
}
