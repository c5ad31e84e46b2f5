//! Featured-first, recency-filled ordering of articles.
//!
//! One rule drives every ranked slice on the site:
//!
//! 1. Keep the candidates (a category, or every article for the cross-category
//!    top stories), dropping ids already shown in an earlier section.
//! 2. Stable-sort newest first by `created_at`. Ties keep their input order.
//! 3. Split into featured (`top_story`) and other, preserving that order.
//! 4. Take featured first, then fill from other, up to `limit`.
//!
//! Articles without a timestamp sort after every dated article. Repeated ids
//! are collapsed to their first occurrence.

use crate::models::Article;
use itertools::Itertools;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Candidates newest first, stable on equal timestamps, deduplicated by id.
pub fn by_recency<'a, I>(articles: I) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut sorted: Vec<&Article> = articles.into_iter().unique_by(|a| a.id).collect();
    // `sort_by` is stable; `None < Some(_)` puts undated articles last when reversed.
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Articles of `category` in plain recency order (the "latest" list).
pub fn latest_in_category<'a>(articles: &'a [Article], category: &str) -> Vec<&'a Article> {
    by_recency(articles.iter().filter(|a| a.is_in(category)))
}

/// Apply the featured-first rule to an arbitrary candidate set.
pub fn rank<'a, I>(candidates: I, limit: usize) -> Vec<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let (featured, other): (Vec<&Article>, Vec<&Article>) =
        by_recency(candidates).into_iter().partition(|a| a.top_story);

    // With `limit` or more featured articles the chain never reaches `other`.
    let ranked: Vec<&Article> = featured
        .iter()
        .chain(other.iter())
        .take(limit)
        .copied()
        .collect();

    debug!(
        featured = featured.len(),
        other = other.len(),
        limit,
        returned = ranked.len(),
        "Ranked candidates"
    );
    ranked
}

/// Up to `limit` articles of `category`, featured first.
///
/// Categories are matched exactly; a name outside the closed set simply
/// yields an empty slice.
#[instrument(level = "debug", skip(articles), fields(total = articles.len()))]
pub fn rank_by_category<'a>(articles: &'a [Article], category: &str, limit: usize) -> Vec<&'a Article> {
    rank(articles.iter().filter(|a| a.is_in(category)), limit)
}

/// Cross-category top stories for hero display.
#[instrument(level = "debug", skip(articles), fields(total = articles.len()))]
pub fn rank_top_stories(articles: &[Article], limit: usize) -> Vec<&Article> {
    rank(articles.iter(), limit)
}

/// Re-run the rule without the ids already allocated to earlier sections.
///
/// `category` of `None` ranks across every category.
pub fn rank_excluding<'a>(
    articles: &'a [Article],
    category: Option<&str>,
    exclude: &HashSet<u64>,
    limit: usize,
) -> Vec<&'a Article> {
    rank(
        articles
            .iter()
            .filter(|a| category.is_none_or(|c| a.is_in(c)))
            .filter(|a| !exclude.contains(&a.id)),
        limit,
    )
}

/// Ids of a ranked slice, for use as an exclusion set.
pub fn ids(articles: &[&Article]) -> HashSet<u64> {
    articles.iter().map(|a| a.id).collect()
}
