use std::fmt;

/// Locales with dedicated fake-data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    English,
    German,
    French,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::English, Locale::German, Locale::French];

    /// Map a language tag onto a supported locale.
    ///
    /// Anything other than `en`, `de` or `fr` falls back to English.
    pub fn resolve(tag: &str) -> Self {
        match tag {
            "de" => Locale::German,
            "fr" => Locale::French,
            "en" => Locale::English,
            other => {
                tracing::trace!(tag = other, "unsupported language tag, using English");
                Locale::English
            }
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::German => "de",
            Locale::French => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
