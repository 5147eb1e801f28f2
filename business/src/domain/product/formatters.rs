//! Display helpers deriving strings and badge colours from raw product records.
//!
//! All functions are pure. Absent data is reported as such ("N/A", "Unknown
//! Brand", grey badge) and only [`calories_per_100g`] defaults to zero.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::model::{Nutriments, Product};
use super::value_objects::{NovaGroup, NutritionGrade};

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/200x200?text=No+Image";
pub const DEFAULT_CATEGORY_LIMIT: usize = 3;

const KJ_PER_KCAL: f64 = 4.184;
const NEUTRAL_BADGE: &str = "bg-gray-400";

static ENGLISH_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^en:").ok());

const MEAT_KEYWORDS: [&str; 6] = ["meat", "chicken", "beef", "pork", "fish", "seafood"];
const OTHER_ANIMAL_KEYWORDS: [&str; 5] = ["milk", "egg", "honey", "cheese", "butter"];

/// "12.3 g", or "N/A" when the amount is absent.
pub fn format_nutrient(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.1} {}", v, unit),
        None => "N/A".to_string(),
    }
}

pub fn nutriscore_color(grade: Option<&str>) -> &'static str {
    match grade.and_then(|g| g.parse::<NutritionGrade>().ok()) {
        Some(NutritionGrade::A) => "bg-green-500",
        Some(NutritionGrade::B) => "bg-lime-400",
        Some(NutritionGrade::C) => "bg-yellow-400",
        Some(NutritionGrade::D) => "bg-orange-400",
        Some(NutritionGrade::E) => "bg-red-500",
        None => NEUTRAL_BADGE,
    }
}

pub fn ecoscore_color(grade: Option<&str>) -> &'static str {
    match grade.and_then(|g| g.parse::<NutritionGrade>().ok()) {
        Some(NutritionGrade::A) => "bg-green-600",
        Some(NutritionGrade::B) => "bg-lime-500",
        Some(NutritionGrade::C) => "bg-yellow-500",
        Some(NutritionGrade::D) => "bg-orange-500",
        Some(NutritionGrade::E) => "bg-red-600",
        None => NEUTRAL_BADGE,
    }
}

pub fn nova_group_label(group: Option<u8>) -> &'static str {
    group
        .and_then(NovaGroup::from_group)
        .map(|g| g.label())
        .unwrap_or("Unknown")
}

/// Product name, then generic name, then "Unknown Product".
pub fn product_display_name(product: &Product) -> String {
    non_empty(&product.product_name)
        .or_else(|| non_empty(&product.generic_name))
        .unwrap_or("Unknown Product")
        .to_string()
}

/// First entry of the comma-separated brand list.
pub fn format_brand(brands: Option<&str>) -> String {
    match brands.filter(|b| !b.is_empty()) {
        Some(b) => b.split(',').next().unwrap_or_default().trim().to_string(),
        None => "Unknown Brand".to_string(),
    }
}

pub fn format_categories(categories: Option<&str>, limit: usize) -> Vec<String> {
    let Some(categories) = categories.filter(|c| !c.is_empty()) else {
        return Vec::new();
    };
    categories
        .split(',')
        .map(|c| c.trim().to_string())
        .take(limit)
        .collect()
}

pub fn has_product_image(product: &Product) -> bool {
    non_empty(&product.image_url).is_some() || non_empty(&product.image_front_url).is_some()
}

pub fn product_image(product: &Product) -> String {
    non_empty(&product.image_url)
        .or_else(|| non_empty(&product.image_front_url))
        .or_else(|| non_empty(&product.image_small_url))
        .unwrap_or(PLACEHOLDER_IMAGE_URL)
        .to_string()
}

/// "en:milk,en:tree-nuts" -> ["milk", "tree nuts"]
pub fn format_allergens(allergens: Option<&str>) -> Vec<String> {
    let Some(allergens) = allergens else {
        return Vec::new();
    };
    allergens
        .split(',')
        .map(|a| {
            let a = a.trim();
            let stripped = match ENGLISH_PREFIX.as_ref() {
                Some(re) => re.replace(a, "").to_string(),
                None => a.to_string(),
            };
            stripped.replace('-', " ").trim().to_string()
        })
        .filter(|a| !a.is_empty())
        .collect()
}

/// Energy per 100g in kcal.
///
/// Uses `energy-kcal_100g` when present and non-zero, otherwise converts
/// `energy_100g` (kJ); 0 when neither yields a value.
pub fn calories_per_100g(nutriments: Option<&Nutriments>) -> f64 {
    let Some(nutriments) = nutriments else {
        return 0.0;
    };
    nutriments
        .get("energy-kcal_100g")
        .filter(|kcal| *kcal != 0.0)
        .or_else(|| {
            nutriments
                .get("energy_100g")
                .map(|kj| kj / KJ_PER_KCAL)
                .filter(|kcal| *kcal != 0.0)
        })
        .unwrap_or(0.0)
}

pub fn format_serving_size(serving_size: Option<&str>) -> String {
    serving_size
        .filter(|s| !s.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DietaryInfo {
    pub is_vegetarian: bool,
    pub is_vegan: bool,
}

/// Keyword heuristic over the serialized ingredient list.
pub fn dietary_info(ingredients: Option<&serde_json::Value>) -> DietaryInfo {
    let text = ingredients
        .map(|i| i.to_string())
        .unwrap_or_else(|| "[]".to_string())
        .to_lowercase();

    let has_meat = MEAT_KEYWORDS.iter().any(|k| text.contains(k));
    let has_other_animal = OTHER_ANIMAL_KEYWORDS.iter().any(|k| text.contains(k));

    DietaryInfo {
        is_vegetarian: !has_meat,
        is_vegan: !has_meat && !has_other_animal,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
