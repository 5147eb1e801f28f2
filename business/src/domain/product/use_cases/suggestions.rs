use async_trait::async_trait;

use crate::domain::product::query::Suggestion;

pub struct GetSuggestionsParams {
    pub term: String,
}

/// Best-effort: failures degrade to an empty list.
#[async_trait]
pub trait GetSearchSuggestionsUseCase: Send + Sync {
    async fn execute(&self, params: GetSuggestionsParams) -> Vec<Suggestion>;
}
