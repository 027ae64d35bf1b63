use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: &str = "default";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Averages above this are capped so one request cannot ask for unbounded review lists.
pub const MAX_AVERAGE: f64 = 1_000.0;

/// Parameters identifying one generated page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub seed: String,
    pub page: u32,
    pub language: String,
    /// Target average of `likes`
    pub likes: f64,
    /// Target average of `reviews`
    pub reviews: f64,
}

impl CatalogQuery {
    pub fn new(
        seed: impl Into<String>,
        page: u32,
        language: impl Into<String>,
        likes: f64,
        reviews: f64,
    ) -> Self {
        Self {
            seed: seed.into(),
            page,
            language: language.into(),
            likes,
            reviews,
        }
    }

    /// Clamp out-of-contract values instead of failing.
    ///
    /// `page` becomes at least 1; negative or non-finite averages become 0.
    pub fn sanitized(mut self) -> Self {
        self.page = self.page.max(1);
        self.likes = sanitize_average(self.likes);
        self.reviews = sanitize_average(self.reviews);
        self
    }

    /// Key of the deterministic stream backing this page, `"<seed>-<page>"`.
    pub fn stream_key(&self) -> String {
        format!("{}-{}", self.seed, self.page)
    }
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, 1, DEFAULT_LANGUAGE, 0.0, 0.0)
    }
}

/// Map a requested average onto `[0, MAX_AVERAGE]`; negative and non-finite values become 0.
pub fn sanitize_average(avg: f64) -> f64 {
    if avg.is_finite() && avg > 0.0 {
        avg.min(MAX_AVERAGE)
    } else {
        0.0
    }
}
