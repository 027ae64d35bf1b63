//! Seeding of the per-call random streams.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

use crate::query::CatalogQuery;

/// Build a generator seeded from the SHA-256 digest of `key`.
pub fn stream_rng(key: &str) -> StdRng {
    let digest = Sha256::digest(key.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}

/// Stream for record content, keyed by `"<seed>-<page>"`.
pub fn page_rng(query: &CatalogQuery) -> StdRng {
    stream_rng(&query.stream_key())
}

/// Independent stream for the like and review counts.
///
/// Kept apart from [`page_rng`] so the averages never shift record content.
pub fn counts_rng(query: &CatalogQuery) -> StdRng {
    stream_rng(&format!("{}#counts", query.stream_key()))
}
