//! Locale-aware fake data.
//!
//! Providers are stateless tables; every draw comes from the RNG handed in by the caller.

use rand::Rng;

use crate::locale::Locale;

/// Produces realistic-looking strings from a caller-owned random stream.
pub trait FakeProvider {
    fn full_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    fn company_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    /// `count` lowercase words separated by single spaces.
    fn words<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String;

    /// One capitalized sentence terminated by a period.
    fn sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    /// `len` decimal digits; leading zeros allowed.
    fn numeric<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> String {
        (0..len)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }

    fn cover_url<R: Rng + ?Sized>(&self, rng: &mut R, width: u32, height: u32) -> String {
        const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let token: String = (0..10)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        format!("https://picsum.photos/seed/{token}/{width}/{height}")
    }
}

struct LocaleTables {
    first_names: &'static [&'static str],
    last_names: &'static [&'static str],
    company_suffixes: &'static [&'static str],
    conjunction: &'static str,
}

const ENGLISH: LocaleTables = LocaleTables {
    first_names: &[
        "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
        "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
        "Thomas", "Sarah", "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa",
    ],
    last_names: &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Wilson", "Anderson", "Taylor", "Moore", "Jackson", "Martin", "Lee", "Thompson",
        "White", "Harris", "Clark", "Lewis", "Walker", "Hall", "Young", "King",
    ],
    company_suffixes: &["Inc", "LLC", "Group", "and Sons", "Press", "Publishing"],
    conjunction: "and",
};

const GERMAN: LocaleTables = LocaleTables {
    first_names: &[
        "Lukas", "Anna", "Leon", "Marie", "Finn", "Sophie", "Jonas", "Lena", "Paul",
        "Emma", "Felix", "Hannah", "Maximilian", "Mia", "Tobias", "Laura", "Julian",
        "Lea", "Niklas", "Katharina", "Moritz", "Johanna", "Sebastian", "Clara",
    ],
    last_names: &[
        "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker",
        "Schulz", "Hoffmann", "Schäfer", "Koch", "Bauer", "Richter", "Klein", "Wolf",
        "Schröder", "Neumann", "Schwarz", "Zimmermann", "Braun", "Krüger", "Hofmann",
        "Hartmann",
    ],
    company_suffixes: &["GmbH", "AG", "KG", "GmbH & Co. KG", "Verlag", "OHG"],
    conjunction: "und",
};

const FRENCH: LocaleTables = LocaleTables {
    first_names: &[
        "Gabriel", "Louise", "Raphaël", "Jade", "Léo", "Ambre", "Louis", "Chloé", "Lucas",
        "Alice", "Hugo", "Léa", "Arthur", "Manon", "Jules", "Camille", "Adam", "Inès",
        "Mathis", "Zoé", "Nathan", "Juliette", "Théo", "Margaux",
    ],
    last_names: &[
        "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
        "Leroy", "Moreau", "Simon", "Laurent", "Lefebvre", "Michel", "Garcia", "David",
        "Bertrand", "Roux", "Vincent", "Fournier", "Morel", "Girard", "André", "Mercier",
    ],
    company_suffixes: &["SA", "SARL", "SAS", "EURL", "Éditions", "et Fils"],
    conjunction: "et",
};

/// Lorem text is shared by all locales.
const LOREM: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation",
    "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo", "consequat", "duis",
    "aute", "irure", "in", "reprehenderit", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "non",
    "proident", "sunt", "culpa", "qui", "officia", "deserunt", "mollit", "anim", "id",
    "est", "laborum", "vitae", "beatae", "explicabo", "nemo", "ipsam", "voluptatem",
];

const SENTENCE_MIN_WORDS: usize = 3;
const SENTENCE_MAX_WORDS: usize = 10;

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

/// [`FakeProvider`] backed by static per-locale tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleProvider {
    locale: Locale,
}

impl LocaleProvider {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn tables(&self) -> &'static LocaleTables {
        match self.locale {
            Locale::English => &ENGLISH,
            Locale::German => &GERMAN,
            Locale::French => &FRENCH,
        }
    }
}

impl FakeProvider for LocaleProvider {
    fn full_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let tables = self.tables();
        let first = pick(rng, tables.first_names);
        let last = pick(rng, tables.last_names);
        format!("{first} {last}")
    }

    fn company_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let tables = self.tables();
        match rng.random_range(0..3u8) {
            0 => format!(
                "{} {}",
                pick(rng, tables.last_names),
                pick(rng, tables.company_suffixes)
            ),
            1 => format!(
                "{}-{}",
                pick(rng, tables.last_names),
                pick(rng, tables.last_names)
            ),
            _ => format!(
                "{}, {} {} {}",
                pick(rng, tables.last_names),
                pick(rng, tables.last_names),
                tables.conjunction,
                pick(rng, tables.last_names)
            ),
        }
    }

    fn words<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> String {
        (0..count)
            .map(|_| pick(rng, LOREM))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let count = rng.random_range(SENTENCE_MIN_WORDS..=SENTENCE_MAX_WORDS);
        let body = self.words(rng, count);

        let mut chars = body.chars();
        let mut sentence = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        sentence.push('.');
        sentence
    }
}
