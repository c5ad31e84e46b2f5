//! # newsdesk
//!
//! Feed curation and localization for a bilingual (English/Hindi) news site.
//! Given snapshots of articles and archive editions from the content store,
//! this crate produces the ranked, deduplicated, language-correct lists each
//! page renders, with every media and document reference resolved to an
//! absolute address.
//!
//! ## Pipeline
//!
//! 1. **Fetch**: load a snapshot through a [`store::ContentStore`]
//! 2. **Normalize**: resolve asset addresses ([`assets`]) and pick
//!    active-language fields ([`localize`])
//! 3. **Rank**: featured-first, recency-filled slices ([`ranking`])
//! 4. **Sample**: uniform random recommendations ([`sampler`])
//! 5. **Assemble**: named page views ([`curation::FeedCurator`])
//! 6. **Probe** (optional): check archive PDFs are reachable ([`probe`])
//!
//! Steps 2–5 are synchronous, pure functions of the snapshot. Only fetching
//! and probing are async.
//!
//! ## Example
//!
//! ```
//! use newsdesk::curation::{FeedCurator, Layout};
//! use newsdesk::models::Article;
//!
//! let articles: Vec<Article> = serde_json::from_str(r#"[
//!     { "id": 1, "category": "Sports", "topStory": true,
//!       "coverImage": { "url": "/uploads/final.jpg" },
//!       "createdAt": "2025-05-01T10:00:00Z" },
//!     { "id": 2, "category": "Sports", "createdAt": "2025-05-02T10:00:00Z" }
//! ]"#).unwrap();
//!
//! let curator = FeedCurator::new("http://localhost:1337", Layout::default());
//! let home = curator.home_feed(&articles);
//! let sports = home.sections.last().unwrap();
//!
//! assert_eq!(sports.primary[0].article.id, 1);
//! assert_eq!(
//!     sports.primary[0].cover_image_url.as_deref(),
//!     Some("http://localhost:1337/uploads/final.jpg")
//! );
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod curation;
pub mod localize;
pub mod models;
pub mod output;
pub mod probe;
pub mod ranking;
pub mod sampler;
pub mod store;
pub mod utils;
