use std::fmt;

use crate::domain::product::query::SearchQuery;

/// Identity of a cached query: operation name followed by its normalized
/// parameters. Two calls with equal keys share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn search(query: &SearchQuery) -> Self {
        Self::new([
            "products".to_string(),
            "search".to_string(),
            query.search.trim().to_string(),
            query.page.to_string(),
            query.page_size.to_string(),
            query.sort_by.clone(),
            query.categories.clone(),
            query.brands.clone(),
            query.nutriscore_grade.clone(),
        ])
    }

    pub fn product(code: &str) -> Self {
        Self::new(["products", "detail", code.trim()])
    }

    pub fn category(category: &str, page: u32, page_size: u32) -> Self {
        Self::new([
            "products".to_string(),
            "category".to_string(),
            category.to_string(),
            page.to_string(),
            page_size.to_string(),
        ])
    }

    pub fn brand(brand: &str, page: u32, page_size: u32) -> Self {
        Self::new([
            "products".to_string(),
            "brand".to_string(),
            brand.to_string(),
            page.to_string(),
            page_size.to_string(),
        ])
    }

    pub fn popular(limit: u32) -> Self {
        Self::new(["products".to_string(), "popular".to_string(), limit.to_string()])
    }

    pub fn suggestions(term: &str) -> Self {
        Self::new(["products", "suggestions", term])
    }

    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.0.len() && self.0.iter().zip(prefix).all(|(part, p)| part == p)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
