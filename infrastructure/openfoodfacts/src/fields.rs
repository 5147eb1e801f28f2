/// Attributes requested for search listings.
pub const SEARCH_FIELDS: &[&str] = &[
    "code",
    "product_name",
    "brands",
    "image_url",
    "image_small_url",
    "nutriscore_grade",
    "nova_group",
    "ecoscore_grade",
    "categories",
    "quantity",
    "nutriments",
    "serving_size",
    "allergens",
    "ingredients_text",
];

/// Attributes requested for the product detail view.
pub const PRODUCT_FIELDS: &[&str] = &[
    "code",
    "product_name",
    "generic_name",
    "brands",
    "categories",
    "labels",
    "quantity",
    "serving_size",
    "image_url",
    "image_front_url",
    "image_nutrition_url",
    "image_ingredients_url",
    "nutriscore_grade",
    "nutriscore_score",
    "nova_group",
    "ecoscore_grade",
    "ecoscore_score",
    "nutriments",
    "ingredients",
    "ingredients_text",
    "allergens",
    "traces",
    "additives_tags",
    "nutrition_grades",
    "stores",
    "countries",
];
