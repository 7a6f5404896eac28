use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeatureRequest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub votes: i32,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub feature_id: Uuid,
}

impl FeatureRequest {
    /// Case-insensitive substring match on title or description. An empty term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Filters by `search` and moves finished requests behind open ones, keeping relative order.
pub fn filter_and_order(features: Vec<FeatureRequest>, search: Option<&str>) -> Vec<FeatureRequest> {
    let mut filtered: Vec<FeatureRequest> = match search {
        Some(term) => features.into_iter().filter(|f| f.matches(term)).collect(),
        None => features,
    };
    filtered.sort_by_key(|f| f.done);
    filtered
}
