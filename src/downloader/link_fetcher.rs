use crate::constants::SCHEMA_LINK_SELECTOR;
use crate::errors::AppResult;
use crate::models::ListingOutcome;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::{debug, info, warn};
use url::Url;

/// Cached CSS selector for `.zip`/`.xsd` links.
/// Compiled once at initialization for performance.
static SCHEMA_LINK_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Fetches the listing page and extracts its schema download links.
///
/// A non-success HTTP status is not an error: it is reported as
/// [`ListingOutcome::Unavailable`] and no links are processed.
///
/// # Errors
///
/// Returns an error if the request cannot be sent or the body cannot be read
/// (DNS failure, connection refused, reset mid-body).
pub async fn fetch_listing(
    client: &reqwest::Client,
    listing_url: &Url,
) -> AppResult<ListingOutcome> {
    info!(url = %listing_url, "Fetching listing page");
    let response = client.get(listing_url.as_str()).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(
            url = %listing_url,
            status = status.as_u16(),
            "Listing page unavailable, nothing to download"
        );
        return Ok(ListingOutcome::Unavailable {
            status: status.as_u16(),
        });
    }

    let html = response.text().await?;
    let links = parse_schema_links(&html, listing_url);
    info!(links_found = links.len(), "Listing page parsed");

    Ok(ListingOutcome::Links(links))
}

/// Parses HTML content and returns the `.zip`/`.xsd` anchor targets.
///
/// Links keep document order and duplicates are not removed. Relative hrefs
/// are resolved against `base_url`; hrefs that cannot be resolved are dropped.
pub fn parse_schema_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let selector = SCHEMA_LINK_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(SCHEMA_LINK_SELECTOR)
            .expect("SCHEMA_LINK_SELECTOR is a valid CSS selector")
    });

    document
        .select(selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| match base_url.join(href) {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(href = href, error = %e, "Dropping unresolvable link");
                None
            }
        })
        .collect()
}
