//! Sitemap and robots documents for search engines.

use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

/// Public site URL used when none is configured.
pub const DEFAULT_SITE_URL: &str = "https://mytrip.example.com";

/// Paths crawlers must not index.
pub const DISALLOWED_PATHS: [&str; 3] = ["/api/*", "/auth-test", "/storage-test"];

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    /// Listing and dashboard pages.
    Weekly,
    /// Attraction detail pages.
    Monthly,
}

impl ChangeFrequency {
    fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    /// Absolute page URL.
    pub loc: Url,
    /// Last modification date.
    pub last_modified: NaiveDate,
    /// Expected change frequency.
    pub change_frequency: ChangeFrequency,
    /// Relative priority between 0.0 and 1.0.
    pub priority: f32,
}

/// Static pages with their priorities.
const STATIC_PAGES: [(&str, f32); 3] = [("", 1.0), ("stats", 0.8), ("bookmarks", 0.7)];

/// Entries for the static pages of `site`.
pub fn static_entries(site: &Url, today: NaiveDate) -> Vec<SitemapEntry> {
    STATIC_PAGES
        .iter()
        .filter_map(|(path, priority)| {
            site.join(path).ok().map(|loc| SitemapEntry {
                loc,
                last_modified: today,
                change_frequency: ChangeFrequency::Weekly,
                priority: *priority,
            })
        })
        .collect()
}

/// Detail page URL for an attraction.
pub fn place_url(site: &Url, content_id: &str) -> Option<Url> {
    site.join(&format!("places/{content_id}")).ok()
}

/// Date part of a provider `YYYYMMDDHHmmss` timestamp, or `fallback`.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use mytrip::domain::sitemap::last_modified_date;
///
/// let date = last_modified_date(Some("20250114093015"), Utc::now());
/// assert_eq!(date.to_string(), "2025-01-14");
/// ```
pub fn last_modified_date(modified_time: Option<&str>, fallback: DateTime<Utc>) -> NaiveDate {
    modified_time
        .and_then(|raw| raw.get(..8))
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y%m%d").ok())
        .unwrap_or_else(|| fallback.date_naive())
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render entries as a sitemap protocol 0.9 document.
pub fn render_sitemap(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(entry.loc.as_str()),
            entry.last_modified.format("%Y-%m-%d"),
            entry.change_frequency.as_str(),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render robots.txt for `site`.
pub fn render_robots(site: &Url) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    for path in DISALLOWED_PATHS {
        robots.push_str("Disallow: ");
        robots.push_str(path);
        robots.push('\n');
    }
    if let Ok(sitemap) = site.join("sitemap.xml") {
        robots.push_str("\nSitemap: ");
        robots.push_str(sitemap.as_str());
        robots.push('\n');
    }
    robots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn site() -> Url {
        Url::parse("https://mytrip.example.com/").expect("valid url")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date")
    }

    #[rstest]
    fn static_pages_have_expected_priorities(site: Url) {
        let entries = static_entries(&site, today());
        let summary: Vec<_> = entries
            .iter()
            .map(|entry| (entry.loc.as_str().to_owned(), entry.priority))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("https://mytrip.example.com/".to_owned(), 1.0),
                ("https://mytrip.example.com/stats".to_owned(), 0.8),
                ("https://mytrip.example.com/bookmarks".to_owned(), 0.7),
            ]
        );
    }

    #[rstest]
    #[case(Some("20250114093015"), "2025-01-14")]
    #[case(Some("2025"), "2025-05-01")]
    #[case(Some("garbage!"), "2025-05-01")]
    #[case(None, "2025-05-01")]
    fn last_modified_falls_back_to_now(#[case] raw: Option<&str>, #[case] expected: &str) {
        let now = Utc
            .with_ymd_and_hms(2025, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(last_modified_date(raw, now).to_string(), expected);
    }

    #[rstest]
    fn sitemap_renders_entries(site: Url) {
        let entries = vec![SitemapEntry {
            loc: place_url(&site, "126508").expect("place url"),
            last_modified: today(),
            change_frequency: ChangeFrequency::Monthly,
            priority: 0.7,
        }];
        let xml = render_sitemap(&entries);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://mytrip.example.com/places/126508</loc>"));
        assert!(xml.contains("<lastmod>2025-05-01</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[rstest]
    fn xml_escaping_covers_ampersands() {
        assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
    }

    #[rstest]
    fn robots_lists_disallowed_paths(site: Url) {
        let robots = render_robots(&site);
        assert!(robots.contains("Allow: /\n"));
        assert!(robots.contains("Disallow: /api/*\n"));
        assert!(robots.contains("Disallow: /auth-test\n"));
        assert!(robots.contains("Disallow: /storage-test\n"));
        assert!(robots.ends_with("Sitemap: https://mytrip.example.com/sitemap.xml\n"));
    }
}
