use poem_openapi::Object;
use serde_json::Value;

use business::domain::product::formatters::{
    DEFAULT_CATEGORY_LIMIT, calories_per_100g, dietary_info, ecoscore_color, format_allergens,
    format_brand, format_categories, format_nutrient, format_serving_size, has_product_image,
    nova_group_label, nutriscore_color, product_display_name, product_image,
};
use business::domain::product::model::Product;
use business::domain::product::query::{SearchResultPage, Suggestion};

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Barcode
    pub code: String,
    #[oai(skip_serializing_if_is_none)]
    pub product_name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub generic_name: Option<String>,
    /// Comma-separated brand list
    #[oai(skip_serializing_if_is_none)]
    pub brands: Option<String>,
    /// Comma-separated category list
    #[oai(skip_serializing_if_is_none)]
    pub categories: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub labels: Option<String>,
    /// Package quantity description
    #[oai(skip_serializing_if_is_none)]
    pub quantity: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub serving_size: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_small_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_front_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_nutrition_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_ingredients_url: Option<String>,
    /// Nutri-Score grade, a to e
    #[oai(skip_serializing_if_is_none)]
    pub nutriscore_grade: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub nutriscore_score: Option<f64>,
    #[oai(skip_serializing_if_is_none)]
    pub nutrition_grades: Option<String>,
    /// NOVA processing group, 1 to 4
    #[oai(skip_serializing_if_is_none)]
    pub nova_group: Option<u8>,
    #[oai(skip_serializing_if_is_none)]
    pub ecoscore_grade: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub ecoscore_score: Option<f64>,
    /// Nutrient amounts keyed as published (`fat_100g`, ...)
    #[oai(skip_serializing_if_is_none)]
    pub nutriments: Option<Value>,
    #[oai(skip_serializing_if_is_none)]
    pub ingredients: Option<Value>,
    #[oai(skip_serializing_if_is_none)]
    pub ingredients_text: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub allergens: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub traces: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub additives_tags: Option<Vec<String>>,
    #[oai(skip_serializing_if_is_none)]
    pub stores: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub countries: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            code: product.code,
            product_name: product.product_name,
            generic_name: product.generic_name,
            brands: product.brands,
            categories: product.categories,
            labels: product.labels,
            quantity: product.quantity,
            serving_size: product.serving_size,
            image_url: product.image_url,
            image_small_url: product.image_small_url,
            image_front_url: product.image_front_url,
            image_nutrition_url: product.image_nutrition_url,
            image_ingredients_url: product.image_ingredients_url,
            nutriscore_grade: product.nutriscore_grade,
            nutriscore_score: product.nutriscore_score,
            nutrition_grades: product.nutrition_grades,
            nova_group: product.nova_group,
            ecoscore_grade: product.ecoscore_grade,
            ecoscore_score: product.ecoscore_score,
            nutriments: product
                .nutriments
                .and_then(|n| serde_json::to_value(n).ok()),
            ingredients: product.ingredients,
            ingredients_text: product.ingredients_text,
            allergens: product.allergens,
            traces: product.traces,
            additives_tags: product.additives_tags,
            stores: product.stores,
            countries: product.countries,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SearchResultResponse {
    pub products: Vec<ProductResponse>,
    /// Total number of matches
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl From<SearchResultPage> for SearchResultResponse {
    fn from(page: SearchResultPage) -> Self {
        Self {
            products: page.products.into_iter().map(Into::into).collect(),
            count: page.count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct SuggestionResponse {
    pub code: String,
    #[oai(skip_serializing_if_is_none)]
    pub name: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub brand: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

impl From<Suggestion> for SuggestionResponse {
    fn from(suggestion: Suggestion) -> Self {
        Self {
            code: suggestion.code,
            name: suggestion.name,
            brand: suggestion.brand,
            image_url: suggestion.image_url,
        }
    }
}

/// Per-100g nutrient amounts formatted for display ("N/A" when absent)
#[derive(Debug, Clone, Object)]
pub struct NutrientDisplayResponse {
    pub fat: String,
    pub saturated_fat: String,
    pub carbohydrates: String,
    pub sugars: String,
    pub fiber: String,
    pub proteins: String,
    pub salt: String,
}

/// Strings and flags derived from the raw record for the detail page
#[derive(Debug, Clone, Object)]
pub struct ProductDisplayResponse {
    pub name: String,
    pub brand: String,
    pub image: String,
    pub has_image: bool,
    pub categories: Vec<String>,
    pub allergens: Vec<String>,
    pub serving_size: String,
    pub calories_per_100g: f64,
    pub nutriscore_color: String,
    pub ecoscore_color: String,
    pub nova_group_label: String,
    pub is_vegetarian: bool,
    pub is_vegan: bool,
    pub nutrients: NutrientDisplayResponse,
}

impl From<&Product> for ProductDisplayResponse {
    fn from(product: &Product) -> Self {
        let nutriments = product.nutriments.as_ref();
        let per_100g = |nutrient: &str| {
            format_nutrient(nutriments.and_then(|n| n.per_100g(nutrient)), "g")
        };
        let dietary = dietary_info(product.ingredients.as_ref());
        let grade = product
            .nutriscore_grade
            .as_deref()
            .or(product.nutrition_grades.as_deref());

        Self {
            name: product_display_name(product),
            brand: format_brand(product.brands.as_deref()),
            image: product_image(product),
            has_image: has_product_image(product),
            categories: format_categories(product.categories.as_deref(), DEFAULT_CATEGORY_LIMIT),
            allergens: format_allergens(product.allergens.as_deref()),
            serving_size: format_serving_size(product.serving_size.as_deref()),
            calories_per_100g: calories_per_100g(nutriments),
            nutriscore_color: nutriscore_color(grade).to_string(),
            ecoscore_color: ecoscore_color(product.ecoscore_grade.as_deref()).to_string(),
            nova_group_label: nova_group_label(product.nova_group).to_string(),
            is_vegetarian: dietary.is_vegetarian,
            is_vegan: dietary.is_vegan,
            nutrients: NutrientDisplayResponse {
                fat: per_100g("fat"),
                saturated_fat: per_100g("saturated-fat"),
                carbohydrates: per_100g("carbohydrates"),
                sugars: per_100g("sugars"),
                fiber: per_100g("fiber"),
                proteins: per_100g("proteins"),
                salt: per_100g("salt"),
            },
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub display: ProductDisplayResponse,
}

impl From<Product> for ProductDetailResponse {
    fn from(product: Product) -> Self {
        let display = ProductDisplayResponse::from(&product);
        Self {
            product: product.into(),
            display,
        }
    }
}
