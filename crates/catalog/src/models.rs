use serde::{Deserialize, Serialize};

/// A single generated catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// 1-based position across the whole paginated sequence
    pub index: u64,
    /// Generated digits suffixed with the offset inside the page
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Language tag exactly as requested, even when it fell back to English
    pub language: String,
    pub likes: u32,
    pub reviews: u32,
    /// Cover image URL
    pub cover: String,
    /// Always holds exactly `reviews` entries
    #[serde(rename = "reviewsData")]
    pub reviews_data: Vec<Review>,
}

/// A reader review attached to a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: String,
    pub text: String,
}
