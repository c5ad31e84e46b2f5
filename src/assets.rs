//! Resolution of media and document references into fetchable addresses.
//!
//! The content store emits root-relative paths such as `/uploads/x.jpg`.
//! They are turned into absolute addresses by prefixing the store's origin.
//! References that already carry an `http://` or `https://` scheme are left
//! untouched, which makes resolution idempotent.
//!
//! This is a pure string transform: no I/O, no validation, no re-encoding.
//! Reachability is a separate concern, see [`crate::probe`].

use crate::models::MediaReference;

const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Whether `reference` already carries a recognized absolute-URL scheme.
pub fn is_absolute(reference: &str) -> bool {
    ABSOLUTE_SCHEMES
        .iter()
        .any(|scheme| reference.starts_with(scheme))
}

/// Resolve a possibly-relative reference against `origin_base`.
///
/// - `None` stays `None` (no asset).
/// - Absolute references are returned unchanged.
/// - Anything else is concatenated verbatim to `origin_base`.
///
/// # Examples
///
/// ```
/// use newsdesk::assets::resolve;
///
/// assert_eq!(
///     resolve(Some("/uploads/x.jpg"), "http://cdn.example").as_deref(),
///     Some("http://cdn.example/uploads/x.jpg")
/// );
/// assert_eq!(
///     resolve(Some("http://other.com/x.jpg"), "http://cdn.example").as_deref(),
///     Some("http://other.com/x.jpg")
/// );
/// assert_eq!(resolve(None, "http://cdn.example"), None);
/// ```
pub fn resolve(reference: Option<&str>, origin_base: &str) -> Option<String> {
    let reference = reference?;
    if is_absolute(reference) {
        Some(reference.to_string())
    } else {
        Some(format!("{origin_base}{reference}"))
    }
}

/// Resolve the `url` of an optional media object.
pub fn resolve_media(media: Option<&MediaReference>, origin_base: &str) -> Option<String> {
    resolve(media.map(|m| m.url.as_str()), origin_base)
}

/// Resolver bound to a single content-store origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    origin_base: String,
}

impl AssetResolver {
    pub fn new(origin_base: impl Into<String>) -> Self {
        Self {
            origin_base: origin_base.into(),
        }
    }

    pub fn resolve(&self, reference: Option<&str>) -> Option<String> {
        resolve(reference, &self.origin_base)
    }

    pub fn resolve_media(&self, media: Option<&MediaReference>) -> Option<String> {
        resolve_media(media, &self.origin_base)
    }
}
