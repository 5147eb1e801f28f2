use poem_openapi::Object;

use business::domain::product::catalog_options::FilterOption;

#[derive(Debug, Clone, Object)]
pub struct FilterOptionResponse {
    /// Value to send back as the filter; empty means "all"
    pub value: String,
    pub label: String,
}

impl From<&FilterOption> for FilterOptionResponse {
    fn from(option: &FilterOption) -> Self {
        Self {
            value: option.value.to_string(),
            label: option.label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct FiltersResponse {
    pub categories: Vec<FilterOptionResponse>,
    pub sort_options: Vec<FilterOptionResponse>,
    pub nutriscore_options: Vec<FilterOptionResponse>,
}
