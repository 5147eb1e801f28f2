use std::cmp::Ordering;

use super::model::Product;
use super::value_objects::SortKey;

/// Returns a sorted copy of `products`.
///
/// Rules:
/// - `product_name` / `product_name_desc`: case-insensitive, missing name sorts as ""
/// - `nutriscore_asc`: a < b < ... < e, missing grade last
/// - `nutriscore_desc`: e < d < ... < a, missing grade still last
/// - `popularity` or any unrecognised key: input order unchanged
pub fn sort_products(products: &[Product], sort_by: &str) -> Vec<Product> {
    let mut sorted = products.to_vec();
    let Ok(key) = sort_by.parse::<SortKey>() else {
        return sorted;
    };

    match key {
        SortKey::ProductName => sorted.sort_by(|a, b| name_key(a).cmp(&name_key(b))),
        SortKey::ProductNameDesc => sorted.sort_by(|a, b| name_key(b).cmp(&name_key(a))),
        SortKey::NutriscoreAsc => sorted.sort_by(|a, b| compare_grades(a, b, false)),
        SortKey::NutriscoreDesc => sorted.sort_by(|a, b| compare_grades(a, b, true)),
        SortKey::Popularity => {}
    }

    sorted
}

fn name_key(product: &Product) -> String {
    product
        .product_name
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
}

fn grade(product: &Product) -> Option<String> {
    product
        .nutriscore_grade
        .as_deref()
        .filter(|g| !g.is_empty())
        .map(str::to_lowercase)
}

fn compare_grades(a: &Product, b: &Product, descending: bool) -> Ordering {
    match (grade(a), grade(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ga), Some(gb)) if descending => gb.cmp(&ga),
        (Some(ga), Some(gb)) => ga.cmp(&gb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn named(code: &str, name: Option<&str>) -> Product {
        Product {
            product_name: name.map(str::to_string),
            ..Product::with_code(code)
        }
    }

    fn graded(code: &str, grade: Option<&str>) -> Product {
        Product {
            nutriscore_grade: grade.map(str::to_string),
            ..Product::with_code(code)
        }
    }

    fn codes(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.code.as_str()).collect()
    }

    #[test]
    fn should_sort_by_name_ignoring_case() {
        let products = vec![
            named("1", Some("banana")),
            named("2", Some("Apple")),
            named("3", Some("cherry")),
        ];

        let sorted = sort_products(&products, "product_name");

        assert_eq!(codes(&sorted), vec!["2", "1", "3"]);
    }

    #[test]
    fn should_treat_missing_name_as_empty_string() {
        let products = vec![named("1", Some("apple")), named("2", None)];

        assert_eq!(codes(&sort_products(&products, "product_name")), vec!["2", "1"]);
        assert_eq!(
            codes(&sort_products(&products, "product_name_desc")),
            vec!["1", "2"]
        );
    }

    #[test]
    fn should_put_missing_grade_last_when_ascending() {
        let products = vec![
            graded("1", None),
            graded("2", Some("c")),
            graded("3", Some("a")),
            graded("4", Some("e")),
        ];

        let sorted = sort_products(&products, "nutriscore_asc");

        assert_eq!(codes(&sorted), vec!["3", "2", "4", "1"]);
    }

    #[test]
    fn should_put_missing_grade_last_when_descending() {
        let products = vec![
            graded("1", None),
            graded("2", Some("c")),
            graded("3", Some("a")),
            graded("4", Some("e")),
        ];

        let sorted = sort_products(&products, "nutriscore_desc");

        assert_eq!(codes(&sorted), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn should_keep_input_order_for_popularity_and_unknown_keys() {
        let products = vec![named("1", Some("b")), named("2", Some("a"))];

        assert_eq!(codes(&sort_products(&products, "popularity")), vec!["1", "2"]);
        assert_eq!(codes(&sort_products(&products, "whatever")), vec!["1", "2"]);
    }

    #[test]
    fn should_not_mutate_the_input() {
        let products = vec![named("1", Some("b")), named("2", Some("a"))];
        let before = products.clone();

        let _ = sort_products(&products, "product_name");

        assert_eq!(products, before);
    }

    proptest! {
        #[test]
        fn should_reverse_name_order_when_names_are_distinct(
            names in prop::collection::btree_set("[a-z]{1,8}", 0..20)
        ) {
            let products: Vec<Product> = names
                .iter()
                .enumerate()
                .map(|(i, n)| named(&i.to_string(), Some(n)))
                .collect();

            let asc = sort_products(&products, "product_name");
            let mut desc = sort_products(&products, "product_name_desc");
            desc.reverse();

            prop_assert_eq!(asc, desc);
        }

        #[test]
        fn should_be_idempotent_for_every_key(
            grades in prop::collection::vec(prop::option::of("[a-e]"), 0..20),
            key in prop::sample::select(vec![
                "popularity", "product_name", "product_name_desc",
                "nutriscore_asc", "nutriscore_desc",
            ]),
        ) {
            let products: Vec<Product> = grades
                .iter()
                .enumerate()
                .map(|(i, g)| Product {
                    product_name: Some(format!("item {}", i % 7)),
                    nutriscore_grade: g.clone(),
                    ..Product::with_code(i.to_string())
                })
                .collect();

            let once = sort_products(&products, key);
            let twice = sort_products(&once, key);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn should_sort_missing_grade_after_grade_e(
            key in prop::sample::select(vec!["nutriscore_asc", "nutriscore_desc"]),
            missing_first in any::<bool>(),
        ) {
            let mut products = vec![graded("e", Some("e")), graded("none", None)];
            if missing_first {
                products.reverse();
            }

            let sorted = sort_products(&products, key);

            prop_assert_eq!(codes(&sorted), vec!["e", "none"]);
        }
    }
}
