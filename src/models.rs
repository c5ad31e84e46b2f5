//! Data models for articles, archive editions and their media references.
//!
//! This module defines the records read from the content store:
//! - [`Article`]: A bilingual news article with an editorial category
//! - [`ArchiveEntry`]: A past print edition with per-language PDF documents
//! - [`MediaReference`]: A media object as emitted by the content store
//! - [`Category`] and [`Language`]: The closed sets the curation layer filters on
//!
//! Field names are camelCase on the wire to match the content store's JSON,
//! hence the `#[serde(rename_all = "camelCase")]` attributes. Fields this
//! layer does not interpret (`updatedAt`, `formats`, ...) are kept in an
//! `extra` map and written back out unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A media object (image, PDF) uploaded to the content store.
///
/// The `url` is usually root-relative (`/uploads/x.jpg`) and must be resolved
/// against the store's origin before it can be fetched, see
/// [`crate::assets`]. Other metadata the store attaches is kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReference {
    /// Relative or absolute address of the asset.
    pub url: String,
    /// Original file name, when the store reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// MIME type, when the store reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Size, dimensions, renditions and anything else the store attaches.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            mime: None,
            extra: Map::new(),
        }
    }
}

/// Treat an explicit `null` like a missing key.
///
/// The store sends `null` for unset booleans; `#[serde(default)]` alone only
/// covers absent keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A bilingual news article.
///
/// Every text field comes in an English and a Hindi variant; either may be
/// missing. `created_at` is the only recency signal and is never mutated
/// once the store has created the record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique, stable identifier within a snapshot.
    pub id: u64,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub hindi_title: Option<String>,
    /// Long-form markup body (English).
    #[serde(default)]
    pub english_body: Option<String>,
    /// Long-form markup body (Hindi).
    #[serde(default)]
    pub hindi_body: Option<String>,
    #[serde(default)]
    pub english_author: Option<String>,
    #[serde(default)]
    pub hindi_author: Option<String>,
    /// Editorial section. Matched exactly (case-sensitive) against
    /// [`Category::as_str`]; `null` and values outside the closed set never
    /// match a category filter.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub cover_image: Option<MediaReference>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Editorial "featured" flag; `null` reads as `false`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub top_story: bool,
    /// Advisory reading time in minutes.
    #[serde(default)]
    pub time_to_read: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// The article's category, if it belongs to the closed set.
    pub fn category(&self) -> Option<Category> {
        self.category.as_deref()?.parse().ok()
    }

    /// Whether the article belongs to `category` (exact string match).
    pub fn is_in(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// A past print edition, available as one PDF per language.
///
/// An entry with neither link present is valid but has no document to open.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveEntry {
    pub id: u64,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub hindi_title: Option<String>,
    #[serde(default)]
    pub english_pdf_link: Option<MediaReference>,
    #[serde(default)]
    pub hindi_pdf_link: Option<MediaReference>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArchiveEntry {
    /// `true` if at least one language has a document attached.
    pub fn is_actionable(&self) -> bool {
        self.english_pdf_link.is_some() || self.hindi_pdf_link.is_some()
    }
}

/// The closed set of editorial sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Category {
    National,
    International,
    Technology,
    Business,
    Education,
    Lifestyle,
    Entertainment,
    Sports,
}

impl Category {
    /// All categories in site navigation order.
    pub const ALL: [Category; 8] = [
        Category::National,
        Category::International,
        Category::Technology,
        Category::Business,
        Category::Education,
        Category::Lifestyle,
        Category::Entertainment,
        Category::Sports,
    ];

    /// Canonical form, as stored on [`Article::category`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::National => "National",
            Category::International => "International",
            Category::Technology => "Technology",
            Category::Business => "Business",
            Category::Education => "Education",
            Category::Lifestyle => "Lifestyle",
            Category::Entertainment => "Entertainment",
            Category::Sports => "Sports",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Exact, case-sensitive match on the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// Display language of the site. English is the default; Hindi is the
/// target language with its own parallel fields on every record.
///
/// Deserialization accepts the same spellings as [`FromStr`], so config
/// files may say `hi` or `Hindi`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("english"),
            Language::Hindi => f.write_str("hindi"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            other => Err(format!("unknown language: {other}")),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
