//! Client for the accounting REST API.
//!
//! Collection resources are paged with `offset`/`limit` and a `hasMore` flag.
//! [`fetch_all`] walks the pages of one request and returns every item;
//! [`ItemSource`] is the seam the engine talks to, so tests can replace the
//! network with in-process fakes.

use std::future::Future;

use api_types::{Page, QueryParams};
use reqwest::Url;
use serde_json::Value;

pub use client::{Client, ClientBuilder};
pub use error::ClientError;

mod client;
mod error;

/// Fixed page size requested from the server.
pub const PAGE_SIZE: u32 = 500;

/// Upper bound on requests per paginated fetch.
pub const DEFAULT_MAX_PAGES: u32 = 1_000;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Something that can return one page of a collection resource.
pub trait PageSource {
    fn fetch_page(
        &self,
        url: &Url,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Page<Value>>> + Send;
}

/// Something that can return every item of a collection resource.
///
/// `endpoint` is relative to the API base URL.
pub trait ItemSource {
    fn fetch_items(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;
}

/// Join `base` and `endpoint` with exactly one `/` between them.
pub fn api_url(base: &str, endpoint: &str) -> Result<Url> {
    let mut url = base.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(endpoint.strip_prefix('/').unwrap_or(endpoint));
    Url::parse(&url).map_err(|err| ClientError::InvalidUrl(format!("{url}: {err}")))
}

/// Path of the values of `segment_name`'s valueset, below `value_sets_endpoint`.
pub fn value_set_path(value_sets_endpoint: &str, segment_name: &str) -> String {
    let mut path = value_sets_endpoint.to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(segment_name);
    path.push_str("/child/values");
    path
}

/// Fetch every page of `url`, starting at offset 0.
///
/// `params` is never modified; each request gets its own copy with `offset`
/// and `limit` set. Fails with [`ClientError::PageLimit`] once `max_pages`
/// requests have been made and the server still reports `hasMore`.
pub async fn fetch_all<S>(
    source: &S,
    url: &Url,
    params: &QueryParams,
    max_pages: u32,
) -> Result<Vec<Value>>
where
    S: PageSource + Sync,
{
    let mut items = Vec::new();
    let mut offset: u64 = 0;

    for page_number in 1..=max_pages {
        let page_params = params
            .clone()
            .with("offset", offset.to_string())
            .with("limit", PAGE_SIZE.to_string());

        let page = source.fetch_page(url, &page_params).await?;
        tracing::debug!(
            %url,
            page = page_number,
            offset,
            received = page.items.len(),
            has_more = page.has_more,
            "fetched page"
        );
        items.extend(page.items);

        if !page.has_more {
            return Ok(items);
        }
        offset += u64::from(PAGE_SIZE);
    }

    tracing::error!(%url, max_pages, "pagination did not terminate");
    Err(ClientError::PageLimit(max_pages))
}
