//! Deterministic generation of paginated synthetic book records.
//!
//! A page is a pure function of its [`CatalogQuery`]: every call owns its random streams,
//! so identical `(seed, page)` pairs always produce the same batch and calls can run in
//! parallel without coordination.

pub mod distribution;
pub mod engine;
pub mod locale;
pub mod models;
pub mod provider;
pub mod query;
pub mod seed;

pub use distribution::FractionalCount;
pub use engine::{generate, generate_with, PAGE_SIZE};
pub use locale::Locale;
pub use models::{Book, Review};
pub use provider::{FakeProvider, LocaleProvider};
pub use query::CatalogQuery;
