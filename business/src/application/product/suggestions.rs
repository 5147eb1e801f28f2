use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::query::{SearchQuery, Suggestion};
use crate::domain::product::use_cases::search::SearchProductsUseCase;
use crate::domain::product::use_cases::suggestions::{
    GetSearchSuggestionsUseCase, GetSuggestionsParams,
};

pub const MIN_SUGGESTION_TERM_CHARS: usize = 2;
pub const SUGGESTION_LIMIT: u32 = 5;

pub struct GetSearchSuggestionsUseCaseImpl {
    pub search: Arc<dyn SearchProductsUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetSearchSuggestionsUseCase for GetSearchSuggestionsUseCaseImpl {
    async fn execute(&self, params: GetSuggestionsParams) -> Vec<Suggestion> {
        if params.term.chars().count() < MIN_SUGGESTION_TERM_CHARS {
            return Vec::new();
        }

        let query = SearchQuery {
            search: params.term,
            page_size: SUGGESTION_LIMIT,
            ..SearchQuery::default()
        };

        match self.search.execute(query).await {
            Ok(page) => page.products.iter().map(Suggestion::from).collect(),
            Err(err) => {
                self.logger
                    .warn(&format!("Error fetching suggestions: {}", err));
                Vec::new()
            }
        }
    }
}
