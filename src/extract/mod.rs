//! Listing extraction from result fragments
//!
//! The search endpoint returns listing markup as an HTML fragment embedded
//! in its JSON response. Each `<li>` in the fragment is one investor alert:
//!
//! ```html
//! <li>
//!   2024-01-15
//!   <h3><a href="...">Company AB</a></h3>
//!   <p class="listing-introduction">Warning from <a href="...">FSA:</a></p>
//! </li>
//! ```
//!
//! Field selection preserves the source markup's structure: direct-child
//! relationships and class-attribute containment, never whole-document
//! text searches.

use crate::text::NA;
use scraper::{ElementRef, Html, Selector};

/// One extracted investor-alert entry.
///
/// Every field is always present: either meaningful text or the `"N/A"`
/// sentinel, never an empty string. Full-row equality (and hashing) is what
/// the finalizer deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingRecord {
    /// Canonical listings page the data was sourced from
    pub url: String,

    /// Alert headline
    pub headline: String,

    /// Raw date text as published
    pub date: String,

    /// Absolute link to the alert detail page
    pub external_url: String,

    /// Display text of the alert link
    pub source: String,
}

/// Parses a result fragment and extracts one record per listing element,
/// in document order.
///
/// # Arguments
///
/// * `fragment` - The `hits.row` HTML fragment
/// * `listings_page` - Canonical page URL recorded on every record
/// * `base_origin` - Origin prefixed onto site-relative links
pub fn extract_records(
    fragment: &str,
    listings_page: &str,
    base_origin: &str,
) -> Vec<ListingRecord> {
    let document = Html::parse_fragment(fragment);

    let Ok(listing_selector) = Selector::parse("li") else {
        return Vec::new();
    };

    document
        .select(&listing_selector)
        .map(|item| extract_record(item, listings_page, base_origin))
        .collect()
}

/// Extracts one record from a single listing element.
fn extract_record(item: ElementRef, listings_page: &str, base_origin: &str) -> ListingRecord {
    ListingRecord {
        url: listings_page.to_string(),
        headline: extract_headline(item),
        date: extract_date(item),
        external_url: extract_external_url(item, base_origin),
        source: extract_source(item),
    }
}

/// Headline: all text under the listing's direct-child `<h3>`. Multiple
/// company names arrive separated with " / "; the separator is rewritten
/// to " | ".
fn extract_headline(item: ElementRef) -> String {
    let text = child_element(item, "h3").map(joined_text).unwrap_or_default();
    let headline = text.trim().replace(" / ", " | ");
    or_na(headline)
}

/// Date: the listing's own text nodes (not descendants), skipping
/// whitespace-only nodes left by markup indentation.
fn extract_date(item: ElementRef) -> String {
    let parts: Vec<&str> = item
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .filter(|text| !text.trim().is_empty())
        .collect();
    or_na(parts.join(" ").trim().to_string())
}

/// Source: display text of the introduction anchor, with stray colons and
/// whitespace trimmed off the ends.
fn extract_source(item: ElementRef) -> String {
    let text = introduction_anchor(item)
        .map(joined_text)
        .unwrap_or_default();
    or_na(text.trim_matches(':').trim().to_string())
}

/// External URL: the introduction anchor's href, absolutized.
///
/// Site-relative hrefs get the base origin prefixed. Absolute hrefs
/// occasionally arrive with a clipped scheme ("ttps://...", "htt://...");
/// those are rebuilt from the text after the clipped marker.
fn extract_external_url(item: ElementRef, base_origin: &str) -> String {
    let href = introduction_anchor(item)
        .and_then(|anchor| anchor.value().attr("href"))
        .unwrap_or_default();
    let slug = href.trim_matches(':').trim();

    if slug.starts_with('/') {
        return format!("{}{}", base_origin, slug);
    }

    for marker in ["ttp", "htt"] {
        if let Some(pos) = slug.find(marker) {
            let rest = &slug[pos + marker.len()..];
            if !rest.is_empty() {
                return format!("http{}", rest);
            }
        }
    }

    NA.to_string()
}

/// First direct-child element with the given tag name.
fn child_element<'a>(item: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    item.children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == name)
}

/// The anchor inside the listing's introduction paragraph: a direct-child
/// `<p>` whose class attribute contains "introduction", then its first
/// direct-child `<a>`.
fn introduction_anchor(item: ElementRef) -> Option<ElementRef> {
    item.children()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "p"
                && el
                    .value()
                    .attr("class")
                    .map_or(false, |class| class.contains("introduction"))
        })
        .and_then(|paragraph| {
            paragraph
                .children()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "a")
        })
}

/// Joins every text node under the element with single spaces.
fn joined_text(el: ElementRef) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

fn or_na(value: String) -> String {
    if value.is_empty() {
        NA.to_string()
    } else {
        value
    }
}
