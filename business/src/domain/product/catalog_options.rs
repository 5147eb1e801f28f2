use serde::Serialize;

/// One selectable entry of the filter bar. An empty value means "all".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

pub const POPULAR_CATEGORIES: &[FilterOption] = &[
    option("", "All Categories"),
    option("beverages", "Beverages"),
    option("snacks", "Snacks"),
    option("dairy", "Dairy"),
    option("breakfast", "Breakfast"),
    option("desserts", "Desserts"),
    option("bakery", "Bakery"),
    option("cereals", "Cereals"),
    option("fruits", "Fruits"),
    option("vegetables", "Vegetables"),
    option("meat", "Meat"),
    option("seafood", "Seafood"),
    option("pasta", "Pasta"),
    option("rice", "Rice"),
    option("sauces", "Sauces"),
    option("condiments", "Condiments"),
    option("frozen-foods", "Frozen Foods"),
    option("prepared-meals", "Prepared Meals"),
    option("plant-based", "Plant-based"),
    option("organic", "Organic"),
];

pub const SORT_OPTIONS: &[FilterOption] = &[
    option("popularity", "Most Popular"),
    option("product_name", "Name (A-Z)"),
    option("product_name_desc", "Name (Z-A)"),
    option("nutriscore_asc", "Best Nutrition Grade"),
    option("nutriscore_desc", "Worst Nutrition Grade"),
];

pub const NUTRISCORE_OPTIONS: &[FilterOption] = &[
    option("", "All Grades"),
    option("a", "Grade A (Best)"),
    option("b", "Grade B"),
    option("c", "Grade C"),
    option("d", "Grade D"),
    option("e", "Grade E (Worst)"),
];
