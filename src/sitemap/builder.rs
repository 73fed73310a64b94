//! Public sitemap builder.
//!
//! Enumerates the public URL space per locale and country and assembles one
//! document per file plus the index:
//!
//! | File                                        | Entries                              |
//! |---------------------------------------------|--------------------------------------|
//! | `sitemaps/static-{locale}.xml`              | home, FAQ, contact, business signup  |
//! | `sitemaps/pages-{locale}.xml`               | `{locale}/page/{slug}`               |
//! | `sitemaps/blog-listings-{locale}.xml`       | `{locale}/{country}/blog`            |
//! | `sitemaps/blogs-{locale}-{country}-{n}.xml` | `{locale}/{country}/blog/{slug}`     |
//!
//! Every URL and alternate passes [`SitemapUrlPolicy::assert_allowed`] before
//! it is added, so a single disallowed URL aborts the whole build.

use super::{
    document::{Alternate, Image, IndexEntry, SitemapIndex, UrlEntry},
    error::SitemapError,
    file::{SitemapBuildResult, SitemapFile},
    policy::SitemapUrlPolicy,
    provider::{BlogPost, PageTranslationRow, SitemapDataProvider},
};
use crate::{
    config::cfg,
    utils::date::{self, Timestamp},
};
use anyhow::{Result, bail};
use rustc_hash::{FxHashMap, FxHashSet};

/// Country used when no blog declares any.
const FALLBACK_COUNTRY: &str = "us";

/// Static paths after the locale segment (`""` is the locale home).
const STATIC_PATHS: &[&str] = &["", "faq", "contact-us", "business/register"];

// ============================================================================
// Builder
// ============================================================================

pub struct PublicSitemapBuilder<P> {
    provider: P,
    policy: SitemapUrlPolicy,
    base_url: String,
    max_urls_per_sitemap: usize,
}

impl<P: SitemapDataProvider> PublicSitemapBuilder<P> {
    /// Create a builder.
    ///
    /// `base_url = None` uses `[base.url]` from the loaded config. Trailing
    /// slashes are dropped; an empty base URL is an error.
    /// `max_urls_per_sitemap` is raised to at least 1.
    pub fn new(
        provider: P,
        policy: SitemapUrlPolicy,
        base_url: Option<&str>,
        max_urls_per_sitemap: usize,
    ) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url.to_owned(),
            None => cfg().base.url.clone().unwrap_or_default(),
        };
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            bail!(SitemapError::MissingBaseUrl);
        }

        Ok(Self {
            provider,
            policy,
            base_url: base_url.to_owned(),
            max_urls_per_sitemap: max_urls_per_sitemap.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_urls_per_sitemap(&self) -> usize {
        self.max_urls_per_sitemap
    }

    /// Build every sitemap file and the index from current provider data.
    pub fn build(&self) -> Result<SitemapBuildResult> {
        let locales = self.provider.locales()?;
        if locales.is_empty() {
            bail!(SitemapError::NoLocales);
        }

        let pages = group_page_translations(self.provider.page_translations()?);
        let blogs = self.provider.published_blogs()?;
        let countries = extract_countries(&blogs);

        let mut files = Vec::new();

        for locale in &locales {
            files.extend(self.static_sitemap(locale, &locales)?);
        }
        for locale in &locales {
            files.extend(self.pages_sitemap(locale, &pages)?);
        }

        let country_blogs: Vec<_> = countries
            .iter()
            .map(|country| CountryBlogs::new(country, &blogs))
            .collect();

        for locale in &locales {
            files.extend(self.blog_listings_sitemap(locale, &locales, &country_blogs)?);
        }
        for country in &country_blogs {
            for locale in &locales {
                files.extend(self.blog_post_sitemaps(locale, country)?);
            }
        }

        let index = self.index(&files);
        Ok(SitemapBuildResult { index, files })
    }

    // ------------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------------

    fn static_sitemap(&self, locale: &str, locales: &[String]) -> Result<Option<SitemapFile>> {
        let entries = STATIC_PATHS
            .iter()
            .map(|suffix| {
                let alternates = locales
                    .iter()
                    .map(|alt| (alt.as_str(), self.url(&static_path(alt, suffix))))
                    .collect();
                self.entry(self.url(&static_path(locale, suffix)), None, alternates, None)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SitemapFile::from_entries(
            format!("sitemaps/static-{locale}.xml"),
            entries,
        ))
    }

    fn pages_sitemap(&self, locale: &str, pages: &[PageGroup]) -> Result<Option<SitemapFile>> {
        let mut entries = Vec::new();

        for page in pages {
            let Some(translation) = page.translation(locale) else {
                continue;
            };
            if translation.slug.is_empty() {
                continue;
            }

            let url = self.url(&format!("{locale}/page/{}", translation.slug));
            let lastmod = date::latest([page.page_updated_at, translation.updated_at]);
            let alternates = page
                .translations
                .iter()
                .filter(|alt| !alt.slug.is_empty())
                .map(|alt| {
                    let href = self.url(&format!("{}/page/{}", alt.locale, alt.slug));
                    (alt.locale.as_str(), href)
                })
                .collect();

            entries.push(self.entry(url, lastmod, alternates, None)?);
        }

        Ok(SitemapFile::from_entries(
            format!("sitemaps/pages-{locale}.xml"),
            entries,
        ))
    }

    fn blog_listings_sitemap(
        &self,
        locale: &str,
        locales: &[String],
        countries: &[CountryBlogs<'_>],
    ) -> Result<Option<SitemapFile>> {
        let entries = countries
            .iter()
            .map(|country| {
                let name = country.country;
                let alternates = locales
                    .iter()
                    .map(|alt| (alt.as_str(), self.url(&format!("{alt}/{name}/blog"))))
                    .collect();
                self.entry(
                    self.url(&format!("{locale}/{name}/blog")),
                    country.last_modified,
                    alternates,
                    None,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SitemapFile::from_entries(
            format!("sitemaps/blog-listings-{locale}.xml"),
            entries,
        ))
    }

    fn blog_post_sitemaps(
        &self,
        locale: &str,
        country: &CountryBlogs<'_>,
    ) -> Result<Vec<SitemapFile>> {
        let name = country.country;
        let mut entries = Vec::new();

        for blog in &country.blogs {
            let Some(translation) = blog.translation(locale) else {
                continue;
            };
            if translation.slug.is_empty() {
                continue;
            }

            let url = self.url(&format!("{locale}/{name}/blog/{}", translation.slug));
            let lastmod = date::latest([blog.updated_at, translation.updated_at]);
            let alternates = blog
                .translations
                .iter()
                .filter(|alt| !alt.locale.is_empty() && !alt.slug.is_empty())
                .map(|alt| {
                    let href = self.url(&format!("{}/{name}/blog/{}", alt.locale, alt.slug));
                    (alt.locale.as_str(), href)
                })
                .collect();
            let image = blog
                .image
                .as_deref()
                .filter(|image| !image.is_empty())
                .map(|image| Image {
                    loc: self.url(image),
                    title: translation.title.clone().filter(|t| !t.is_empty()),
                });

            entries.push(self.entry(url, lastmod, alternates, image)?);
        }

        let files = entries
            .chunks(self.max_urls_per_sitemap)
            .enumerate()
            .filter_map(|(i, chunk)| {
                SitemapFile::from_entries(
                    format!("sitemaps/blogs-{locale}-{name}-{}.xml", i + 1),
                    chunk.to_vec(),
                )
            })
            .collect();
        Ok(files)
    }

    fn index(&self, files: &[SitemapFile]) -> SitemapIndex {
        let entries = files
            .iter()
            .map(|file| IndexEntry {
                loc: self.url(&file.path),
                lastmod: file.last_modified,
            })
            .collect();
        SitemapIndex::new(entries)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Assemble an entry, checking the URL and every alternate first.
    ///
    /// Alternates are keyed by locale; a repeated locale keeps its first
    /// position and takes the later URL.
    fn entry(
        &self,
        url: String,
        lastmod: Option<Timestamp>,
        alternates: Vec<(&str, String)>,
        image: Option<Image>,
    ) -> Result<UrlEntry> {
        self.policy.assert_allowed(&url)?;

        let mut merged: Vec<Alternate> = Vec::with_capacity(alternates.len());
        for (locale, href) in alternates {
            self.policy.assert_allowed(&href)?;
            match merged.iter_mut().find(|alt| alt.hreflang == locale) {
                Some(existing) => existing.href = href,
                None => merged.push(Alternate {
                    hreflang: locale.to_owned(),
                    href,
                }),
            }
        }

        Ok(UrlEntry {
            loc: url,
            lastmod,
            alternates: merged,
            image,
        })
    }

    /// Absolute URL for `path`; `http(s)://` values pass through unchanged.
    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn static_path(locale: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        locale.to_owned()
    } else {
        format!("{locale}/{suffix}")
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// All translations of one page.
#[derive(Debug, Clone, PartialEq)]
struct PageGroup {
    page_updated_at: Option<Timestamp>,
    translations: Vec<PageTranslation>,
}

#[derive(Debug, Clone, PartialEq)]
struct PageTranslation {
    locale: String,
    slug: String,
    updated_at: Option<Timestamp>,
}

impl PageGroup {
    fn translation(&self, locale: &str) -> Option<&PageTranslation> {
        self.translations.iter().find(|t| t.locale == locale)
    }
}

/// Group rows by `page_id` in first-seen order.
///
/// `page_updated_at` comes from the first row of each page. A repeated
/// locale replaces the earlier translation in place.
fn group_page_translations(rows: Vec<PageTranslationRow>) -> Vec<PageGroup> {
    let mut positions: FxHashMap<u64, usize> = FxHashMap::default();
    let mut groups: Vec<PageGroup> = Vec::new();

    for row in rows {
        let index = *positions.entry(row.page_id).or_insert_with(|| {
            groups.push(PageGroup {
                page_updated_at: row.page_updated_at,
                translations: Vec::new(),
            });
            groups.len() - 1
        });

        let translation = PageTranslation {
            locale: row.locale,
            slug: row.slug,
            updated_at: row.updated_at,
        };
        let group = &mut groups[index];
        match group
            .translations
            .iter_mut()
            .find(|t| t.locale == translation.locale)
        {
            Some(existing) => *existing = translation,
            None => group.translations.push(translation),
        }
    }

    groups
}

/// Distinct lowercase two-letter country codes in first-seen order.
fn extract_countries(blogs: &[BlogPost]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut countries = Vec::new();

    for country in blogs.iter().filter_map(|b| b.countries.as_ref()).flatten() {
        let country = country.to_lowercase();
        let valid = country.len() == 2 && country.bytes().all(|b| b.is_ascii_lowercase());
        if valid && seen.insert(country.clone()) {
            countries.push(country);
        }
    }

    if countries.is_empty() {
        countries.push(FALLBACK_COUNTRY.to_owned());
    }
    countries
}

/// Blogs visible under one country, with their aggregate last-modified.
struct CountryBlogs<'a> {
    country: &'a str,
    blogs: Vec<&'a BlogPost>,
    last_modified: Option<Timestamp>,
}

impl<'a> CountryBlogs<'a> {
    fn new(country: &'a str, blogs: &'a [BlogPost]) -> Self {
        let blogs: Vec<_> = blogs.iter().filter(|b| b.is_visible_in(country)).collect();
        let last_modified = date::latest(blogs.iter().flat_map(|blog| {
            std::iter::once(blog.updated_at).chain(blog.translations.iter().map(|t| t.updated_at))
        }));

        Self {
            country,
            blogs,
            last_modified,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
