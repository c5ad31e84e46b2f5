//! Named page views assembled from an in-memory snapshot.
//!
//! [`FeedCurator`] composes asset resolution, ranking and recommendation
//! sampling into the views each page needs:
//!
//! | View | Sections |
//! |------|----------|
//! | [`FeedCurator::home_feed`] | hero top stories, one block per category |
//! | [`FeedCurator::category_feed`] | top, more, latest, recommended |
//! | [`FeedCurator::article_sidebar`] | recommended from other sections |
//! | [`FeedCurator::archive_list`] | print editions, newest first |
//!
//! Nothing here performs I/O. Each view element borrows the original record
//! and adds resolved asset addresses; the record itself is never modified.

use crate::assets::AssetResolver;
use crate::localize::{ArticleCard, Field, select};
use crate::models::{ArchiveEntry, Article, Category, Language};
use crate::ranking::{self, ids};
use crate::sampler;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Slice sizes of one home page block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SectionLimits {
    pub category: Category,
    /// Featured-first slice.
    pub primary: usize,
    /// Follow-up slice drawn from what `primary` did not show.
    #[serde(default)]
    pub secondary: usize,
}

impl SectionLimits {
    pub fn new(category: Category, primary: usize, secondary: usize) -> Self {
        Self {
            category,
            primary,
            secondary,
        }
    }
}

/// Per-section limits for every page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Layout {
    pub hero: usize,
    pub home_sections: Vec<SectionLimits>,
    pub category_top: usize,
    pub category_more: usize,
    pub recommended: usize,
    pub sidebar: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            hero: 5,
            home_sections: vec![
                SectionLimits::new(Category::National, 3, 0),
                SectionLimits::new(Category::International, 3, 2),
                SectionLimits::new(Category::Technology, 3, 2),
                SectionLimits::new(Category::Business, 5, 0),
                SectionLimits::new(Category::Education, 2, 0),
                SectionLimits::new(Category::Lifestyle, 2, 0),
                SectionLimits::new(Category::Entertainment, 2, 0),
                SectionLimits::new(Category::Sports, 6, 4),
            ],
            category_top: 4,
            category_more: 6,
            recommended: 6,
            sidebar: 6,
        }
    }
}

/// An article together with its resolved cover image address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView<'a> {
    #[serde(flatten)]
    pub article: &'a Article,
    pub cover_image_url: Option<String>,
}

impl ArticleView<'_> {
    pub fn id(&self) -> u64 {
        self.article.id
    }

    /// Render for `language` as of `now`.
    pub fn card(&self, language: Language, now: DateTime<Utc>) -> ArticleCard {
        ArticleCard::new(self.article, self.cover_image_url.as_deref(), language, now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSection<'a> {
    pub category: Category,
    pub primary: Vec<ArticleView<'a>>,
    pub secondary: Vec<ArticleView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeFeed<'a> {
    pub hero: Vec<ArticleView<'a>>,
    pub sections: Vec<HomeSection<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFeed<'a> {
    pub category: String,
    pub top: Vec<ArticleView<'a>>,
    pub more: Vec<ArticleView<'a>>,
    pub latest: Vec<ArticleView<'a>>,
    pub recommended: Vec<ArticleView<'a>>,
}

impl CategoryFeed<'_> {
    /// `true` when the category has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage<'a> {
    pub article: ArticleView<'a>,
    pub sidebar: Vec<ArticleView<'a>>,
}

/// Whether an archive edition's document can be opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Availability {
    /// A document exists but has not been probed.
    Unchecked,
    /// The probe reached the document.
    Available,
    /// No document for the active language.
    Missing,
    /// The probe failed; the entry stays listed with a direct-open link.
    /// `status` (`httpStatus` on the wire) is absent when no response arrived.
    Unavailable {
        #[serde(rename = "httpStatus")]
        status: Option<u16>,
        reason: String,
    },
}

/// An archive edition prepared for one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveItem<'a> {
    #[serde(flatten)]
    pub entry: &'a ArchiveEntry,
    pub english_pdf_url: Option<String>,
    pub hindi_pdf_url: Option<String>,
    /// Title in the active language.
    pub title: Option<String>,
    /// Document address in the active language.
    pub pdf_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub availability: Availability,
}

/// Assembles page views from snapshots of the content store.
#[derive(Debug, Clone)]
pub struct FeedCurator {
    resolver: AssetResolver,
    layout: Layout,
}

impl FeedCurator {
    pub fn new(origin_base: impl Into<String>, layout: Layout) -> Self {
        Self {
            resolver: AssetResolver::new(origin_base),
            layout,
        }
    }

    /// Wrap an article with its resolved cover image.
    pub fn view<'a>(&self, article: &'a Article) -> ArticleView<'a> {
        ArticleView {
            article,
            cover_image_url: self.resolver.resolve_media(article.cover_image.as_ref()),
        }
    }

    fn views<'a>(&self, articles: Vec<&'a Article>) -> Vec<ArticleView<'a>> {
        articles.into_iter().map(|a| self.view(a)).collect()
    }

    /// Hero top stories across all categories, then one block per configured
    /// category. Each block's secondary slice skips what its primary shows.
    #[instrument(level = "info", skip_all, fields(articles = articles.len()))]
    pub fn home_feed<'a>(&self, articles: &'a [Article]) -> HomeFeed<'a> {
        let hero = ranking::rank_top_stories(articles, self.layout.hero);

        let sections = self
            .layout
            .home_sections
            .iter()
            .map(|limits| {
                let category = limits.category.as_str();
                let primary = ranking::rank_by_category(articles, category, limits.primary);
                let secondary = ranking::rank_excluding(
                    articles,
                    Some(category),
                    &ids(&primary),
                    limits.secondary,
                );
                debug!(
                    %category,
                    primary = primary.len(),
                    secondary = secondary.len(),
                    "Assembled home section"
                );
                HomeSection {
                    category: limits.category,
                    primary: self.views(primary),
                    secondary: self.views(secondary),
                }
            })
            .collect();

        HomeFeed {
            hero: self.views(hero),
            sections,
        }
    }

    /// Category page: featured-first `top`, `more` from the remainder, the
    /// full `latest` list, and recommendations from other categories.
    ///
    /// An unknown category yields empty ranked sections; recommendations are
    /// still drawn from the whole snapshot.
    #[instrument(level = "info", skip(self, articles, rng), fields(articles = articles.len()))]
    pub fn category_feed<'a, R>(&self, articles: &'a [Article], category: &str, rng: &mut R) -> CategoryFeed<'a>
    where
        R: Rng + ?Sized,
    {
        let top = ranking::rank_by_category(articles, category, self.layout.category_top);
        let more = ranking::rank_excluding(
            articles,
            Some(category),
            &ids(&top),
            self.layout.category_more,
        );
        let latest = ranking::latest_in_category(articles, category);
        let recommended = sampler::sample(articles, category, self.layout.recommended, rng);

        CategoryFeed {
            category: category.to_string(),
            top: self.views(top),
            more: self.views(more),
            latest: self.views(latest),
            recommended: self.views(recommended),
        }
    }

    /// Recommendations next to an article: other categories only, never the
    /// article itself.
    pub fn article_sidebar<'a, R>(
        &self,
        all_articles: &'a [Article],
        current_article_id: u64,
        current_category: &str,
        rng: &mut R,
    ) -> Vec<ArticleView<'a>>
    where
        R: Rng + ?Sized,
    {
        self.views(sampler::sample_excluding(
            all_articles,
            current_category,
            current_article_id,
            self.layout.sidebar,
            rng,
        ))
    }

    /// Single-article page: the article and its sidebar.
    #[instrument(level = "info", skip(self, article, all_articles, rng), fields(id = article.id))]
    pub fn article_page<'a, R>(&self, article: &'a Article, all_articles: &'a [Article], rng: &mut R) -> ArticlePage<'a>
    where
        R: Rng + ?Sized,
    {
        ArticlePage {
            article: self.view(article),
            sidebar: self.article_sidebar(
                all_articles,
                article.id,
                article.category.as_deref().unwrap_or_default(),
                rng,
            ),
        }
    }

    /// Archive editions newest first, prepared for `language`.
    ///
    /// Both documents are resolved regardless of language so the alternate
    /// rendering path keeps its address. Entries without a document for the
    /// active language are kept and marked [`Availability::Missing`].
    #[instrument(level = "info", skip(self, entries), fields(entries = entries.len()))]
    pub fn archive_list<'a>(&self, entries: &'a [ArchiveEntry], language: Language) -> Vec<ArchiveItem<'a>> {
        let mut sorted: Vec<&ArchiveEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        sorted
            .into_iter()
            .map(|entry| {
                let pdf_url = self.resolver.resolve(select(entry, Field::PdfLink, language));
                let availability = if pdf_url.is_some() {
                    Availability::Unchecked
                } else {
                    Availability::Missing
                };
                ArchiveItem {
                    entry,
                    english_pdf_url: self.resolver.resolve_media(entry.english_pdf_link.as_ref()),
                    hindi_pdf_url: self.resolver.resolve_media(entry.hindi_pdf_link.as_ref()),
                    title: select(entry, Field::Title, language).map(str::to_string),
                    pdf_url,
                    date: entry.created_at.map(|t| t.date_naive()),
                    availability,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MediaReference;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const ORIGIN: &str = "http://localhost:1337";

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 20, 8, 0, 0).unwrap()
    }

    fn article(id: u64, category: &str, hours: i64, top_story: bool) -> Article {
        Article {
            id,
            english_title: Some(format!("Story {id}")),
            hindi_title: Some(format!("खबर {id}")),
            english_body: None,
            hindi_body: None,
            english_author: None,
            hindi_author: None,
            category: Some(category.to_string()),
            cover_image: Some(MediaReference::new(format!("/uploads/{id}.jpg"))),
            created_at: Some(base() + Duration::hours(hours)),
            top_story,
            time_to_read: Some(2),
            extra: Default::default(),
        }
    }

    fn snapshot() -> Vec<Article> {
        let mut articles = Vec::new();
        let mut id = 0;
        for (i, category) in Category::ALL.iter().enumerate() {
            for n in 0..12 {
                id += 1;
                articles.push(article(id, category.as_str(), (i * 20 + n) as i64, n % 3 == 0));
            }
        }
        articles
    }

    fn curator() -> FeedCurator {
        FeedCurator::new(ORIGIN, Layout::default())
    }

    fn view_ids(views: &[ArticleView<'_>]) -> Vec<u64> {
        views.iter().map(|v| v.id()).collect()
    }

    #[test]
    fn test_view_resolves_cover_image() {
        let a = article(1, "Sports", 0, false);
        let view = curator().view(&a);
        assert_eq!(view.cover_image_url.as_deref(), Some("http://localhost:1337/uploads/1.jpg"));
        assert_eq!(view.article, &a);
    }

    #[test]
    fn test_view_without_cover_image() {
        let mut a = article(1, "Sports", 0, false);
        a.cover_image = None;
        assert_eq!(curator().view(&a).cover_image_url, None);
    }

    #[test]
    fn test_home_feed_sections_follow_layout() {
        let articles = snapshot();
        let home = curator().home_feed(&articles);

        assert_eq!(home.hero.len(), 5);
        assert!(home.hero.iter().all(|v| v.article.top_story));
        assert_eq!(home.sections.len(), 8);

        for (section, limits) in home.sections.iter().zip(&Layout::default().home_sections) {
            assert_eq!(section.category, limits.category);
            assert_eq!(section.primary.len(), limits.primary);
            assert_eq!(section.secondary.len(), limits.secondary);
            assert!(section
                .primary
                .iter()
                .chain(&section.secondary)
                .all(|v| v.article.is_in(limits.category.as_str())));

            let primary: HashSet<u64> = view_ids(&section.primary).into_iter().collect();
            assert!(section.secondary.iter().all(|v| !primary.contains(&v.id())));
        }
    }

    #[test]
    fn test_home_feed_on_empty_snapshot() {
        let home = curator().home_feed(&[]);
        assert!(home.hero.is_empty());
        assert!(home.sections.iter().all(|s| s.primary.is_empty() && s.secondary.is_empty()));
    }

    #[test]
    fn test_category_feed() {
        let articles = snapshot();
        let mut rng = StdRng::seed_from_u64(8);
        let feed = curator().category_feed(&articles, "Sports", &mut rng);

        // Sports ids are 85..=96; every third one is featured.
        assert_eq!(view_ids(&feed.top), vec![94, 91, 88, 85]);
        assert_eq!(view_ids(&feed.more), vec![96, 95, 93, 92, 90, 89]);
        assert_eq!(feed.latest.len(), 12);
        assert_eq!(feed.latest[0].id(), 96);
        assert_eq!(feed.recommended.len(), 6);
        assert!(feed.recommended.iter().all(|v| !v.article.is_in("Sports")));
        assert!(!feed.is_empty());
    }

    #[test]
    fn test_category_feed_unknown_category() {
        let articles = snapshot();
        let mut rng = StdRng::seed_from_u64(8);
        let feed = curator().category_feed(&articles, "sports", &mut rng);
        assert!(feed.top.is_empty());
        assert!(feed.more.is_empty());
        assert!(feed.is_empty());
        assert_eq!(feed.recommended.len(), 6);
    }

    #[test]
    fn test_article_sidebar_excludes_current() {
        let articles = snapshot();
        let mut rng = StdRng::seed_from_u64(21);
        let current = &articles[3];
        let current_category = current.category.as_deref().unwrap();
        let sidebar = curator().article_sidebar(&articles, current.id, current_category, &mut rng);

        assert_eq!(sidebar.len(), 6);
        assert!(sidebar.iter().all(|v| v.id() != current.id));
        assert!(sidebar.iter().all(|v| !v.article.is_in(current_category)));
    }

    #[test]
    fn test_article_page() {
        let articles = snapshot();
        let mut rng = StdRng::seed_from_u64(2);
        let page = curator().article_page(&articles[10], &articles, &mut rng);
        assert_eq!(page.article.id(), articles[10].id);
        assert_eq!(page.sidebar.len(), 6);
    }

    fn archive_entry(id: u64, days: i64, english: Option<&str>, hindi: Option<&str>) -> ArchiveEntry {
        ArchiveEntry {
            id,
            english_title: Some(format!("Edition {id}")),
            hindi_title: Some(format!("संस्करण {id}")),
            english_pdf_link: english.map(MediaReference::new),
            hindi_pdf_link: hindi.map(MediaReference::new),
            created_at: Some(base() + Duration::days(days)),
            extra: Default::default(),
        }
    }

    #[test]
    fn test_archive_list_newest_first_and_resolved() {
        let entries = vec![
            archive_entry(1, 0, Some("/uploads/1_en.pdf"), Some("/uploads/1_hi.pdf")),
            archive_entry(2, 30, Some("https://files.example/2_en.pdf"), None),
        ];
        let items = curator().archive_list(&entries, Language::English);

        assert_eq!(items.iter().map(|i| i.entry.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(items[0].pdf_url.as_deref(), Some("https://files.example/2_en.pdf"));
        assert_eq!(items[1].pdf_url.as_deref(), Some("http://localhost:1337/uploads/1_en.pdf"));
        assert_eq!(items[1].hindi_pdf_url.as_deref(), Some("http://localhost:1337/uploads/1_hi.pdf"));
        assert_eq!(items[1].date, NaiveDate::from_ymd_opt(2025, 4, 20));
        assert_eq!(items[1].title.as_deref(), Some("Edition 1"));
        assert!(items.iter().all(|i| i.availability == Availability::Unchecked));
    }

    #[test]
    fn test_archive_only_hindi_pdf_in_english() {
        let mut entry = archive_entry(5, 0, None, Some("/uploads/5_hi.pdf"));
        entry.english_title = None;
        let entries = vec![entry];
        let items = curator().archive_list(&entries, Language::English);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, None);
        assert_eq!(items[0].pdf_url, None);
        assert_eq!(items[0].availability, Availability::Missing);
        assert_eq!(items[0].hindi_pdf_url.as_deref(), Some("http://localhost:1337/uploads/5_hi.pdf"));

        let hindi = curator().archive_list(&entries, Language::Hindi);
        assert_eq!(hindi[0].title.as_deref(), Some("संस्करण 5"));
        assert_eq!(hindi[0].availability, Availability::Unchecked);
    }

    #[test]
    fn test_archive_item_serialization() {
        let entries = vec![archive_entry(1, 0, Some("/a.pdf"), None)];
        let items = curator().archive_list(&entries, Language::Hindi);
        let json = serde_json::to_value(&items[0]).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["englishPdfUrl"], "http://localhost:1337/a.pdf");
        assert_eq!(json["availability"]["status"], "missing");
        assert_eq!(json["date"], "2025-04-20");
    }

    #[test]
    fn test_view_keeps_record_untouched_apart_from_addresses() {
        let article: Article = serde_json::from_str(
            r#"{ "id": 4, "category": "Sports", "publishedAt": "2025-04-20T08:00:00.000Z",
                 "coverImage": { "url": "/uploads/4.jpg", "size": 12.5, "formats": { "thumbnail": {} } } }"#,
        )
        .unwrap();
        let json = serde_json::to_value(curator().view(&article)).unwrap();

        assert_eq!(json["publishedAt"], "2025-04-20T08:00:00.000Z");
        assert_eq!(json["coverImage"]["url"], "/uploads/4.jpg");
        assert_eq!(json["coverImage"]["size"], 12.5);
        assert!(json["coverImage"]["formats"]["thumbnail"].is_object());
        assert_eq!(json["coverImageUrl"], "http://localhost:1337/uploads/4.jpg");
    }

    #[test]
    fn test_layout_from_yaml_overrides_some_fields() {
        let layout: Layout = serde_yaml::from_str(
            "hero: 3\nhome_sections:\n  - category: Sports\n    primary: 2\n",
        )
        .unwrap();
        assert_eq!(layout.hero, 3);
        assert_eq!(layout.home_sections, vec![SectionLimits::new(Category::Sports, 2, 0)]);
        assert_eq!(layout.sidebar, 6);
    }
}
