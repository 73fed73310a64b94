//! Public URL policy.
//!
//! Single source of truth for "may this URL appear in a public sitemap".
//! Checks run against the URL path (and query) in this order:
//!
//! | Rule              | Rejects                                                   |
//! |-------------------|-----------------------------------------------------------|
//! | `QueryString`     | any non-empty query                                       |
//! | `SearchPage`      | `/s` and `/{xx}/s`                                        |
//! | `Booking`         | a `booking` or `bookings` segment                         |
//! | `VehicleDetail`   | `vehicle` or a provider car-detail segment                |
//! | `ProviderBooking` | provider booking-flow identifiers anywhere in the path    |
//! | `PrivateArea`     | `admin`, `vendor`, `profile`, `messages`, `dashboard`, `auth` segments |
//! | `Affiliate`       | `/affiliate/` anywhere in the path                        |
//!
//! Path rules see both the path as written and its dot-normalized form, so
//! `..` segments cannot cancel a forbidden segment.

use super::error::SitemapError;
use anyhow::{Result, bail};
use regex::Regex;
use std::{fmt, sync::LazyLock};
use url::Url;

/// Provider booking-flow page identifiers, matched as plain substrings.
const PROVIDER_BOOKING_MARKERS: &[&str] = &[
    "ok-mobility-booking",
    "green-motion-booking",
    "adobe-booking",
    "locauto-rent-booking",
    "wheelsys-booking",
];

const AFFILIATE_MARKER: &str = "/affiliate/";

static RE_SEARCH_PAGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/[a-z]{2}/s$").unwrap());

static RE_BOOKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:booking|bookings)(?:/|$)").unwrap());

static RE_VEHICLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:vehicle|wheelsys-car|adobe-car|renteon-car|locauto-rent-car)(?:/|$)").unwrap()
});

static RE_PRIVATE_AREA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:admin|vendor|profile|messages|dashboard|auth)(?:/|$)").unwrap()
});

/// Why a URL was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    QueryString,
    SearchPage,
    Booking,
    VehicleDetail,
    ProviderBooking,
    PrivateArea,
    Affiliate,
}

impl Reason {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::QueryString => "query strings are not canonical",
            Self::SearchPage => "search result page",
            Self::Booking => "booking page",
            Self::VehicleDetail => "vehicle detail page",
            Self::ProviderBooking => "provider booking flow",
            Self::PrivateArea => "private area",
            Self::Affiliate => "affiliate page",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Rejected(Reason),
}

/// Denylist policy for public sitemap URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SitemapUrlPolicy;

impl SitemapUrlPolicy {
    pub const fn new() -> Self {
        Self
    }

    /// Check a URL (absolute, or a bare path) against every rule.
    ///
    /// Path rules run on the path as written and on its dot-normalized
    /// form; a match in either rejects the URL.
    pub fn check(&self, url: &str) -> Verdict {
        let (path, query) = split_url(url);

        if !query.is_empty() {
            return Verdict::Rejected(Reason::QueryString);
        }

        match path_rejection(raw_path(url)).or_else(|| path_rejection(&path)) {
            Some(reason) => Verdict::Rejected(reason),
            None => Verdict::Allowed,
        }
    }

    #[inline]
    pub fn is_allowed(&self, url: &str) -> bool {
        self.check(url) == Verdict::Allowed
    }

    /// Fail with [`SitemapError::BlockedUrl`] unless the URL is allowed.
    pub fn assert_allowed(&self, url: &str) -> Result<()> {
        if let Verdict::Rejected(reason) = self.check(url) {
            bail!(SitemapError::BlockedUrl {
                url: url.to_owned(),
                reason,
            });
        }
        Ok(())
    }
}

/// First path rule that matches, in rule order.
fn path_rejection(path: &str) -> Option<Reason> {
    if path == "/s" || RE_SEARCH_PAGE.is_match(path) {
        Some(Reason::SearchPage)
    } else if RE_BOOKING.is_match(path) {
        Some(Reason::Booking)
    } else if RE_VEHICLE.is_match(path) {
        Some(Reason::VehicleDetail)
    } else if PROVIDER_BOOKING_MARKERS.iter().any(|m| path.contains(m)) {
        Some(Reason::ProviderBooking)
    } else if RE_PRIVATE_AREA.is_match(path) {
        Some(Reason::PrivateArea)
    } else if path.contains(AFFILIATE_MARKER) {
        Some(Reason::Affiliate)
    } else {
        None
    }
}

/// Path exactly as written: after the authority, before `?` or `#`.
fn raw_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];

    match url.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => url,
    }
}

/// Split a URL into `(path, query)`.
///
/// Absolute URLs go through the `url` parser, which also resolves dot
/// segments; anything else is treated as a bare path.
fn split_url(url: &str) -> (String, String) {
    if let Ok(parsed) = Url::parse(url) {
        return (
            parsed.path().to_owned(),
            parsed.query().unwrap_or_default().to_owned(),
        );
    }

    let without_fragment = url.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((path, query)) => (path.to_owned(), query.to_owned()),
        None => (without_fragment.to_owned(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(url: &str) -> Verdict {
        SitemapUrlPolicy::new().check(url)
    }

    #[test]
    fn test_allows_public_pages() {
        let policy = SitemapUrlPolicy::new();
        for url in [
            "https://example.com/en",
            "https://example.com/en/faq",
            "https://example.com/en/contact-us",
            "https://example.com/en/business/register",
            "https://example.com/en/page/about-us",
            "https://example.com/fr/be/blog",
            "https://example.com/fr/be/blog/bonjour",
            "/en/search-tips",
            "/en/bookings-explained",
        ] {
            assert!(policy.is_allowed(url), "{url} should be allowed");
        }
    }

    #[test]
    fn test_rejects_query_string() {
        assert_eq!(
            verdict("https://example.com/en/faq?page=2"),
            Verdict::Rejected(Reason::QueryString)
        );
        assert_eq!(verdict("/en/faq?x=1"), Verdict::Rejected(Reason::QueryString));
        // An empty query is not a query
        assert_eq!(verdict("https://example.com/en/faq?"), Verdict::Allowed);
    }

    #[test]
    fn test_rejects_search_pages() {
        assert_eq!(
            verdict("https://example.com/s"),
            Verdict::Rejected(Reason::SearchPage)
        );
        assert_eq!(
            verdict("https://example.com/en/s"),
            Verdict::Rejected(Reason::SearchPage)
        );
        // Only two-letter locales
        assert_eq!(verdict("https://example.com/eng/s"), Verdict::Allowed);
        assert_eq!(verdict("https://example.com/en/s/extra"), Verdict::Allowed);
    }

    #[test]
    fn test_rejects_booking_segments() {
        for url in [
            "https://example.com/en/booking",
            "https://example.com/en/bookings/42",
            "https://example.com/booking/success",
        ] {
            assert_eq!(verdict(url), Verdict::Rejected(Reason::Booking), "{url}");
        }
    }

    #[test]
    fn test_rejects_vehicle_detail_segments() {
        for url in [
            "https://example.com/en/vehicle/12",
            "https://example.com/en/wheelsys-car/abc",
            "https://example.com/en/adobe-car/abc",
            "https://example.com/en/renteon-car/abc",
            "https://example.com/en/locauto-rent-car",
        ] {
            assert_eq!(verdict(url), Verdict::Rejected(Reason::VehicleDetail), "{url}");
        }
        assert_eq!(verdict("https://example.com/en/vehicles-guide"), Verdict::Allowed);
    }

    #[test]
    fn test_rejects_provider_booking_substrings() {
        for url in [
            "https://example.com/en/green-motion-booking",
            "https://example.com/en/page/my-ok-mobility-booking-tips",
            "https://example.com/en/adobe-booking-success",
            "https://example.com/en/locauto-rent-booking/1",
            "https://example.com/en/wheelsys-booking",
        ] {
            assert_eq!(
                verdict(url),
                Verdict::Rejected(Reason::ProviderBooking),
                "{url}"
            );
        }
    }

    #[test]
    fn test_rejects_private_areas() {
        for url in [
            "https://example.com/admin",
            "https://example.com/en/vendor/cars",
            "https://example.com/en/profile",
            "https://example.com/en/messages/3",
            "https://example.com/en/dashboard",
            "https://example.com/auth/login",
        ] {
            assert_eq!(verdict(url), Verdict::Rejected(Reason::PrivateArea), "{url}");
        }
        assert_eq!(verdict("https://example.com/en/page/vendors"), Verdict::Allowed);
    }

    #[test]
    fn test_rejects_affiliate_paths() {
        assert_eq!(
            verdict("https://example.com/en/affiliate/track"),
            Verdict::Rejected(Reason::Affiliate)
        );
        assert_eq!(verdict("https://example.com/en/affiliate"), Verdict::Allowed);
    }

    #[test]
    fn test_dot_segments_cannot_hide_private_paths() {
        assert_eq!(
            verdict("https://example.com/en/page/../admin/secret"),
            Verdict::Rejected(Reason::PrivateArea)
        );
        assert_eq!(
            verdict("/en/page/../admin/secret"),
            Verdict::Rejected(Reason::PrivateArea)
        );
    }

    #[test]
    fn test_dot_segments_cannot_cancel_forbidden_segments() {
        assert_eq!(
            verdict("https://example.com/en/page/vendor/.."),
            Verdict::Rejected(Reason::PrivateArea)
        );
        assert_eq!(
            verdict("https://example.com/en/page/../booking/../x"),
            Verdict::Rejected(Reason::Booking)
        );
        assert_eq!(
            verdict("/en/page/affiliate/../x"),
            Verdict::Rejected(Reason::Affiliate)
        );
    }

    #[test]
    fn test_raw_path() {
        assert_eq!(raw_path("https://example.com/en/a/../b?x=1#f"), "/en/a/../b");
        assert_eq!(raw_path("https://example.com"), "");
        assert_eq!(raw_path("/en/vendor/..#top"), "/en/vendor/..");
    }

    #[test]
    fn test_assert_allowed_carries_url_and_reason() {
        let policy = SitemapUrlPolicy::new();
        assert!(policy.assert_allowed("https://example.com/en").is_ok());

        let err = policy
            .assert_allowed("https://example.com/en/vendor/x")
            .unwrap_err();
        match err.downcast_ref::<SitemapError>() {
            Some(SitemapError::BlockedUrl { url, reason }) => {
                assert_eq!(url, "https://example.com/en/vendor/x");
                assert_eq!(*reason, Reason::PrivateArea);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_split_url() {
        assert_eq!(
            split_url("https://example.com/a/b?c=d#e"),
            ("/a/b".to_string(), "c=d".to_string())
        );
        assert_eq!(
            split_url("/a/b#frag"),
            ("/a/b".to_string(), String::new())
        );
        assert_eq!(split_url("https://example.com"), ("/".to_string(), String::new()));
    }
}
