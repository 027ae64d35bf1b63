use serde::{Deserialize, Serialize};
use shelf_catalog::query::sanitize_average;
use shelf_catalog::CatalogQuery;

/// Parameters shared by every page of one feed session.
///
/// Changing any field starts a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedParams {
    pub seed: String,
    pub language: String,
    pub likes: f64,
    pub reviews: f64,
}

impl FeedParams {
    /// Averages are clamped the same way the catalog clamps them, so NaN never enters a session.
    pub fn new(seed: impl Into<String>, language: impl Into<String>, likes: f64, reviews: f64) -> Self {
        Self {
            seed: seed.into(),
            language: language.into(),
            likes: sanitize_average(likes),
            reviews: sanitize_average(reviews),
        }
    }

    /// Catalog query for `page` of this session.
    pub fn query(&self, page: u32) -> CatalogQuery {
        CatalogQuery::new(
            self.seed.clone(),
            page,
            self.language.clone(),
            self.likes,
            self.reviews,
        )
    }
}

/// Averages compare by bit pattern so equality stays reflexive for any `f64`.
impl PartialEq for FeedParams {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
            && self.language == other.language
            && self.likes.to_bits() == other.likes.to_bits()
            && self.reviews.to_bits() == other.reviews.to_bits()
    }
}

impl Default for FeedParams {
    fn default() -> Self {
        Self::new("42", "en", 3.5, 2.7)
    }
}
