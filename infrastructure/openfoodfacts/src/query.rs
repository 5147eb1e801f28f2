use business::domain::product::query::SearchQuery;

use crate::fields::SEARCH_FIELDS;

/// Translates a search into the query string of `/cgi/search.pl`.
///
/// Tag filters take consecutive slots starting at 0, in the order
/// categories, brands, nutrition grade; empty filters take no slot.
pub fn build_search_params(query: &SearchQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("search_terms".to_string(), query.search.trim().to_string()),
        ("page".to_string(), query.page.to_string()),
        ("page_size".to_string(), query.page_size.to_string()),
        ("sort_by".to_string(), query.sort_by.clone()),
        ("json".to_string(), "true".to_string()),
        ("fields".to_string(), SEARCH_FIELDS.join(",")),
    ];

    let tags = [
        ("categories", query.categories.clone()),
        ("brands", query.brands.clone()),
        ("nutrition_grades", query.nutriscore_grade.to_lowercase()),
    ];

    for (slot, (tag_type, value)) in tags
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .enumerate()
    {
        params.push((format!("tagtype_{slot}"), tag_type.to_string()));
        params.push((format!("tag_contains_{slot}"), "contains".to_string()));
        params.push((format!("tag_{slot}"), value));
    }

    params
}
