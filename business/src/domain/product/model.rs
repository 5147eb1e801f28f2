use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::shared::lenient;

/// A product record as published by the nutrition database.
///
/// Every descriptive field is optional: records are sparse and an absent
/// value must never be read as zero. The record is only ever copied, never
/// mutated, once it leaves the catalog adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::string_or_number")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_small_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_front_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_nutrition_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ingredients_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriscore_grade: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub nutriscore_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_grades: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_u8",
        skip_serializing_if = "Option::is_none"
    )]
    pub nova_group: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecoscore_grade: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::option_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub ecoscore_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutriments: Option<Nutriments>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergens: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additives_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<String>,
}

impl Product {
    /// Minimal record carrying only a barcode.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }
}

/// Nutrient amounts keyed the way the database publishes them
/// (`fat_100g`, `energy-kcal_100g`, `salt_serving`, ...).
///
/// Values are kept verbatim so a cart snapshot round-trips unchanged;
/// numeric reads go through [`Nutriments::get`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nutriments(BTreeMap<String, Value>);

impl Nutriments {
    /// Numeric value of a raw key, if present and numeric.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(lenient::value_as_f64)
    }

    /// Amount per 100g/100ml of a nutrient (`"fat"` reads `fat_100g`).
    pub fn per_100g(&self, nutrient: &str) -> Option<f64> {
        self.get(&format!("{nutrient}_100g"))
    }
}
