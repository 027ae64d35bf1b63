use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::distribution::FractionalCount;
use crate::locale::Locale;
use crate::models::{Book, Review};
use crate::provider::{FakeProvider, LocaleProvider};
use crate::query::CatalogQuery;
use crate::seed;

/// Number of records in every generated page.
pub const PAGE_SIZE: usize = 20;

const ISBN_DIGITS: usize = 12;
const TITLE_WORDS: usize = 3;
const COVER_WIDTH: u32 = 200;
const COVER_HEIGHT: u32 = 300;

/// Generate one page using the provider for the query's language.
pub fn generate(query: &CatalogQuery) -> Vec<Book> {
    let provider = LocaleProvider::new(Locale::resolve(&query.language));
    generate_with(&provider, query)
}

/// Generate one page of [`PAGE_SIZE`] books with an explicit provider.
///
/// The content stream draws exactly one record seed per book, and the counts stream
/// exactly two values per book, so neither the averages nor the length of a review list
/// can shift the content of any other record.
pub fn generate_with<P: FakeProvider>(provider: &P, query: &CatalogQuery) -> Vec<Book> {
    let query = query.clone().sanitized();

    let mut page_rng = seed::page_rng(&query);
    let mut counts_rng = seed::counts_rng(&query);
    let likes = FractionalCount::new(query.likes);
    let reviews = FractionalCount::new(query.reviews);

    let first_index = u64::from(query.page - 1) * PAGE_SIZE as u64 + 1;

    let books: Vec<Book> = (0..PAGE_SIZE)
        .map(|offset| {
            let mut record_rng = StdRng::seed_from_u64(page_rng.random());
            let likes = likes.sample(&mut counts_rng);
            let reviews = reviews.sample(&mut counts_rng);

            build_book(
                provider,
                &mut record_rng,
                &query.language,
                first_index + offset as u64,
                offset,
                likes,
                reviews,
            )
        })
        .collect();

    tracing::debug!(
        seed = %query.seed,
        page = query.page,
        language = %query.language,
        count = books.len(),
        "generated catalog page"
    );

    books
}

fn build_book<P: FakeProvider, R: Rng>(
    provider: &P,
    rng: &mut R,
    language: &str,
    index: u64,
    offset: usize,
    likes: u32,
    reviews: u32,
) -> Book {
    // Field order fixes the draw order; isbn first keeps it locale independent.
    let isbn = format!("{}{}", provider.numeric(rng, ISBN_DIGITS), offset);
    let title = provider.words(rng, TITLE_WORDS);
    let author = provider.full_name(rng);
    let publisher = provider.company_name(rng);
    let cover = provider.cover_url(rng, COVER_WIDTH, COVER_HEIGHT);

    let reviews_data = (0..reviews)
        .map(|_| Review {
            reviewer: provider.full_name(rng),
            text: provider.sentence(rng),
        })
        .collect();

    Book {
        index,
        isbn,
        title,
        author,
        publisher,
        language: language.to_string(),
        likes,
        reviews,
        cover,
        reviews_data,
    }
}
