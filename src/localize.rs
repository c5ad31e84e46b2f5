//! Active-language field selection and locale-aware relative time.
//!
//! Every record carries parallel English/Hindi fields. [`select`] picks the
//! one belonging to the active language and never falls back to the other
//! language: an empty field is passed through and the renderer shows its
//! own placeholder.
//!
//! Relative timestamps ("5 minutes ago") are produced from a per-language
//! [`Locale`] table. The Hindi locale writes Devanagari numerals, which are
//! mapped back to Latin digits because the rest of the UI uses Latin
//! numerals throughout.

use crate::models::{ArchiveEntry, Article, Category, Language};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A field that exists once per language on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
    Author,
    PdfLink,
}

/// The English and Hindi values of one [`Field`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parallel<'a> {
    pub english: Option<&'a str>,
    pub hindi: Option<&'a str>,
}

impl<'a> Parallel<'a> {
    pub fn new(english: Option<&'a str>, hindi: Option<&'a str>) -> Self {
        Self { english, hindi }
    }

    /// Hindi when Hindi is active, English otherwise. No cross-language fallback.
    pub fn pick(self, language: Language) -> Option<&'a str> {
        match language {
            Language::Hindi => self.hindi,
            Language::English => self.english,
        }
    }
}

/// Records exposing parallel per-language fields.
///
/// Fields a record does not declare come back as an empty [`Parallel`].
pub trait Bilingual {
    fn parallel(&self, field: Field) -> Parallel<'_>;
}

impl Bilingual for Article {
    fn parallel(&self, field: Field) -> Parallel<'_> {
        match field {
            Field::Title => Parallel::new(self.english_title.as_deref(), self.hindi_title.as_deref()),
            Field::Body => Parallel::new(self.english_body.as_deref(), self.hindi_body.as_deref()),
            Field::Author => {
                Parallel::new(self.english_author.as_deref(), self.hindi_author.as_deref())
            }
            Field::PdfLink => Parallel::default(),
        }
    }
}

impl Bilingual for ArchiveEntry {
    fn parallel(&self, field: Field) -> Parallel<'_> {
        match field {
            Field::Title => Parallel::new(self.english_title.as_deref(), self.hindi_title.as_deref()),
            Field::PdfLink => Parallel::new(
                self.english_pdf_link.as_ref().map(|m| m.url.as_str()),
                self.hindi_pdf_link.as_ref().map(|m| m.url.as_str()),
            ),
            Field::Body | Field::Author => Parallel::default(),
        }
    }
}

/// Value of `field` on `record` for the active `language`.
pub fn select<R: Bilingual + ?Sized>(record: &R, field: Field, language: Language) -> Option<&str> {
    record.parallel(field).pick(language)
}

/// Units used by strict distance formatting, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

#[derive(Debug)]
struct UnitName {
    one: &'static str,
    other: &'static str,
}

/// Formatting table for one display language.
#[derive(Debug)]
pub struct Locale {
    pub language: Language,
    /// Numeral glyphs, indexed by digit value.
    digits: [char; 10],
    /// Unit names, indexed by [`TimeUnit`] order.
    units: [UnitName; 6],
    /// `{}` is replaced by the formatted distance.
    past: &'static str,
    future: &'static str,
    recently: &'static str,
}

const LATIN_DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const DEVANAGARI_DIGITS: [char; 10] = ['०', '१', '२', '३', '४', '५', '६', '७', '८', '९'];

static ENGLISH: Locale = Locale {
    language: Language::English,
    digits: LATIN_DIGITS,
    units: [
        UnitName { one: "second", other: "seconds" },
        UnitName { one: "minute", other: "minutes" },
        UnitName { one: "hour", other: "hours" },
        UnitName { one: "day", other: "days" },
        UnitName { one: "month", other: "months" },
        UnitName { one: "year", other: "years" },
    ],
    past: "{} ago",
    future: "in {}",
    recently: "Recently",
};

static HINDI: Locale = Locale {
    language: Language::Hindi,
    digits: DEVANAGARI_DIGITS,
    units: [
        UnitName { one: "सेकंड", other: "सेकंड" },
        UnitName { one: "मिनट", other: "मिनट" },
        UnitName { one: "घंटा", other: "घंटे" },
        UnitName { one: "दिन", other: "दिन" },
        UnitName { one: "महीना", other: "महीने" },
        UnitName { one: "वर्ष", other: "वर्ष" },
    ],
    past: "{} पहले",
    future: "{} में",
    recently: "हाल ही में",
};

/// Locale table for `language`.
pub fn locale(language: Language) -> &'static Locale {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
    }
}

const MINUTES_IN_DAY: f64 = 1440.0;
const MINUTES_IN_MONTH: f64 = 43200.0;
const MINUTES_IN_YEAR: f64 = 525600.0;

impl Locale {
    /// Write `n` using this locale's numeral glyphs.
    fn numerals(&self, n: u64) -> String {
        n.to_string()
            .chars()
            .map(|c| c.to_digit(10).map_or(c, |d| self.digits[d as usize]))
            .collect()
    }

    /// Strict distance between `date` and `now` with a past/future suffix,
    /// in this locale's own numerals.
    ///
    /// Picks the largest unit that keeps the value meaningful (seconds under
    /// a minute, minutes under an hour, hours under a day, days under 30
    /// days, months under a year) and rounds half up. Twelve rounded months
    /// read as one year.
    pub fn format_distance(&self, date: DateTime<Utc>, now: DateTime<Utc>) -> String {
        let signed_ms = (date - now).num_milliseconds();
        let ms = signed_ms.unsigned_abs() as f64;
        let minutes = ms / 60_000.0;

        let (unit, count) = if minutes < 1.0 {
            (TimeUnit::Second, (ms / 1000.0).round())
        } else if minutes < 60.0 {
            (TimeUnit::Minute, minutes.round())
        } else if minutes < MINUTES_IN_DAY {
            (TimeUnit::Hour, (minutes / 60.0).round())
        } else if minutes < MINUTES_IN_MONTH {
            (TimeUnit::Day, (minutes / MINUTES_IN_DAY).round())
        } else if minutes < MINUTES_IN_YEAR {
            match (minutes / MINUTES_IN_MONTH).round() {
                m if m >= 12.0 => (TimeUnit::Year, 1.0),
                m => (TimeUnit::Month, m),
            }
        } else {
            (TimeUnit::Year, (minutes / MINUTES_IN_YEAR).round())
        };

        let count = count as u64;
        let name = &self.units[unit as usize];
        let name = if count == 1 { name.one } else { name.other };
        let distance = format!("{} {}", self.numerals(count), name);

        let template = if signed_ms > 0 { self.future } else { self.past };
        template.replacen("{}", &distance, 1)
    }
}

/// Replace this locale's numeral glyphs with Latin digits.
///
/// Lookup is by position in the locale's digit table, so a glyph maps to the
/// digit of the same value. Other characters are left alone.
pub fn latin_digits(text: &str, native: &[char; 10]) -> String {
    text.chars()
        .map(|c| match native.iter().position(|&g| g == c) {
            Some(value) => LATIN_DIGITS[value],
            None => c,
        })
        .collect()
}

/// "Time since" `created_at` in the active language, always with Latin digits.
///
/// A missing timestamp yields the locale's fixed "recently" text instead.
pub fn relative_time(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>, language: Language) -> String {
    let locale = locale(language);
    match created_at {
        Some(date) => latin_digits(&locale.format_distance(date, now), &locale.digits),
        None => locale.recently.to_string(),
    }
}

/// Advisory reading time, e.g. `"4 min read"`.
pub fn reading_time(minutes: Option<u32>, language: Language) -> Option<String> {
    let minutes = minutes?;
    Some(match language {
        Language::English => format!("{minutes} min read"),
        Language::Hindi => format!("{minutes} मिनट पढ़ने का समय"),
    })
}

/// Section heading for `category`.
pub fn category_label(category: Category, language: Language) -> &'static str {
    match language {
        Language::English => category.as_str(),
        Language::Hindi => match category {
            Category::National => "राष्ट्रीय",
            Category::International => "अंतर्राष्ट्रीय",
            Category::Technology => "प्रौद्योगिकी",
            Category::Business => "व्यापार",
            Category::Education => "शिक्षा",
            Category::Lifestyle => "जीवनशैली",
            Category::Entertainment => "मनोरंजन",
            Category::Sports => "खेल",
        },
    }
}

/// An article rendered for one language, ready for a card or page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCard {
    pub id: u64,
    pub title: Option<String>,
    pub author: Option<String>,
    pub body: Option<String>,
    pub category: Option<String>,
    /// Localized section heading; `None` for categories outside the closed set.
    pub category_label: Option<String>,
    pub published: String,
    pub reading_time: Option<String>,
    pub cover_image_url: Option<String>,
}

impl ArticleCard {
    pub fn new(
        article: &Article,
        cover_image_url: Option<&str>,
        language: Language,
        now: DateTime<Utc>,
    ) -> Self {
        let text = |field| select(article, field, language).map(str::to_string);
        Self {
            id: article.id,
            title: text(Field::Title),
            author: text(Field::Author),
            body: text(Field::Body),
            category: article.category.clone(),
            category_label: article
                .category()
                .map(|c| category_label(c, language).to_string()),
            published: relative_time(article.created_at, now, language),
            reading_time: reading_time(article.time_to_read, language),
            cover_image_url: cover_image_url.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaReference;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap()
    }

    fn article() -> Article {
        serde_json::from_str(
            r#"{
                "id": 1,
                "englishTitle": "Monsoon arrives early",
                "hindiTitle": "मानसून जल्दी आया",
                "englishAuthor": "R. Sharma",
                "category": "National",
                "timeToRead": 3
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_select_active_language() {
        let a = article();
        assert_eq!(select(&a, Field::Title, Language::English), Some("Monsoon arrives early"));
        assert_eq!(select(&a, Field::Title, Language::Hindi), Some("मानसून जल्दी आया"));
    }

    #[test]
    fn test_select_does_not_fall_back() {
        let a = article();
        assert_eq!(select(&a, Field::Author, Language::English), Some("R. Sharma"));
        assert_eq!(select(&a, Field::Author, Language::Hindi), None);
        assert_eq!(select(&a, Field::Body, Language::English), None);
        assert_eq!(select(&a, Field::Body, Language::Hindi), None);
    }

    #[test]
    fn test_select_passes_empty_strings_through() {
        let mut a = article();
        a.english_title = Some(String::new());
        assert_eq!(select(&a, Field::Title, Language::English), Some(""));
    }

    #[test]
    fn test_select_archive_pdf_link_only_hindi() {
        let entry = ArchiveEntry {
            id: 9,
            english_title: None,
            hindi_title: Some("अप्रैल संस्करण".to_string()),
            english_pdf_link: None,
            hindi_pdf_link: Some(MediaReference::new("/uploads/april_hi.pdf")),
            created_at: None,
            extra: Default::default(),
        };
        assert_eq!(select(&entry, Field::PdfLink, Language::English), None);
        assert_eq!(select(&entry, Field::Title, Language::English), None);
        assert_eq!(
            select(&entry, Field::PdfLink, Language::Hindi),
            Some("/uploads/april_hi.pdf")
        );
        assert_eq!(select(&entry, Field::Author, Language::Hindi), None);
    }

    #[test]
    fn test_relative_time_english() {
        let n = now();
        assert_eq!(relative_time(Some(n - Duration::seconds(30)), n, Language::English), "30 seconds ago");
        assert_eq!(relative_time(Some(n - Duration::minutes(1)), n, Language::English), "1 minute ago");
        assert_eq!(relative_time(Some(n - Duration::minutes(5)), n, Language::English), "5 minutes ago");
        assert_eq!(relative_time(Some(n - Duration::hours(3)), n, Language::English), "3 hours ago");
        assert_eq!(relative_time(Some(n - Duration::days(2)), n, Language::English), "2 days ago");
        assert_eq!(relative_time(Some(n - Duration::days(45)), n, Language::English), "2 months ago");
        assert_eq!(relative_time(Some(n - Duration::days(800)), n, Language::English), "2 years ago");
        assert_eq!(relative_time(Some(n + Duration::days(2)), n, Language::English), "in 2 days");
    }

    #[test]
    fn test_relative_time_rounds_half_up() {
        let n = now();
        // 90 minutes is 1.5 hours
        assert_eq!(relative_time(Some(n - Duration::minutes(90)), n, Language::English), "2 hours ago");
        // 89 minutes rounds down
        assert_eq!(relative_time(Some(n - Duration::minutes(89)), n, Language::English), "1 hour ago");
    }

    #[test]
    fn test_relative_time_twelve_months_reads_as_year() {
        let n = now();
        assert_eq!(relative_time(Some(n - Duration::days(355)), n, Language::English), "1 year ago");
    }

    #[test]
    fn test_relative_time_hindi_uses_latin_digits() {
        let n = now();
        let text = relative_time(Some(n - Duration::minutes(25)), n, Language::Hindi);
        assert_eq!(text, "25 मिनट पहले");
        assert!(!text.chars().any(|c| DEVANAGARI_DIGITS.contains(&c)));
        assert_eq!(relative_time(Some(n - Duration::hours(1)), n, Language::Hindi), "1 घंटा पहले");
        assert_eq!(relative_time(Some(n + Duration::days(3)), n, Language::Hindi), "3 दिन में");
    }

    #[test]
    fn test_hindi_locale_emits_devanagari_before_normalization() {
        let n = now();
        let raw = locale(Language::Hindi).format_distance(n - Duration::days(17), n);
        assert_eq!(raw, "१७ दिन पहले");
    }

    #[test]
    fn test_relative_time_missing_timestamp() {
        assert_eq!(relative_time(None, now(), Language::English), "Recently");
        assert_eq!(relative_time(None, now(), Language::Hindi), "हाल ही में");
    }

    #[test]
    fn test_latin_digits_table() {
        assert_eq!(latin_digits("०१२३४५६७८९", &DEVANAGARI_DIGITS), "0123456789");
        assert_eq!(latin_digits("अंक ४२!", &DEVANAGARI_DIGITS), "अंक 42!");
        assert_eq!(latin_digits("already 42", &DEVANAGARI_DIGITS), "already 42");
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time(Some(4), Language::English).as_deref(), Some("4 min read"));
        assert_eq!(
            reading_time(Some(4), Language::Hindi).as_deref(),
            Some("4 मिनट पढ़ने का समय")
        );
        assert_eq!(reading_time(None, Language::Hindi), None);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(category_label(Category::Sports, Language::English), "Sports");
        assert_eq!(category_label(Category::Sports, Language::Hindi), "खेल");
    }

    #[test]
    fn test_article_card_hindi() {
        let a = article();
        let card = ArticleCard::new(&a, Some("http://cdn.example/x.jpg"), Language::Hindi, now());
        assert_eq!(card.title.as_deref(), Some("मानसून जल्दी आया"));
        assert_eq!(card.author, None);
        assert_eq!(card.category_label.as_deref(), Some("राष्ट्रीय"));
        assert_eq!(card.published, "हाल ही में");
        assert_eq!(card.reading_time.as_deref(), Some("3 मिनट पढ़ने का समय"));
        assert_eq!(card.cover_image_url.as_deref(), Some("http://cdn.example/x.jpg"));
    }
}
