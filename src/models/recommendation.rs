//! Recommendation criteria

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecommendBy {
    /// Items by the borrower's most borrowed author
    Authors,
    /// Items sharing the borrower's most borrowed genre
    Genres,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecommendationQuery {
    pub by: RecommendBy,
}
