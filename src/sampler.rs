//! Randomized "you may also like" selection.
//!
//! Recommendations come from every category except the one the reader is
//! already in. The eligible set is deduplicated by id, shuffled uniformly
//! (Fisher–Yates, every permutation equally likely) and cut to size.
//!
//! Output order is deliberately unstable between calls. Callers that need
//! reproducible output inject a seeded RNG; production code uses
//! [`rand::rng`].

use crate::models::Article;
use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

/// Up to `count` random articles outside `exclude_category`.
///
/// Returns every eligible article (in random order) when fewer than `count`
/// remain.
pub fn sample<'a, R>(articles: &'a [Article], exclude_category: &str, count: usize, rng: &mut R) -> Vec<&'a Article>
where
    R: Rng + ?Sized,
{
    draw(articles.iter().filter(|a| !a.is_in(exclude_category)), count, rng)
}

/// Like [`sample`], also leaving out the article currently being read.
pub fn sample_excluding<'a, R>(
    articles: &'a [Article],
    exclude_category: &str,
    exclude_id: u64,
    count: usize,
    rng: &mut R,
) -> Vec<&'a Article>
where
    R: Rng + ?Sized,
{
    draw(
        articles
            .iter()
            .filter(|a| !a.is_in(exclude_category) && a.id != exclude_id),
        count,
        rng,
    )
}

fn draw<'a, I, R>(eligible: I, count: usize, rng: &mut R) -> Vec<&'a Article>
where
    I: Iterator<Item = &'a Article>,
    R: Rng + ?Sized,
{
    let mut pool: Vec<&Article> = eligible.unique_by(|a| a.id).collect();
    let eligible = pool.len();
    pool.shuffle(rng);
    pool.truncate(count);
    debug!(eligible, requested = count, returned = pool.len(), "Sampled recommendations");
    pool
}
