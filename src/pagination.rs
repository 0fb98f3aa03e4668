//! Pagination over OSDI collection responses.
//!
//! Collection endpoints return pages with items nested under
//! `_embedded.<key>` and a `_links.next.href` continuation URL. The
//! collector walks that chain iteratively (a long chain must not grow the
//! call stack) and fails as a whole if any page fails: callers never
//! receive a truncated result that looks complete.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::client::AnClient;
use crate::discovery::OSDI_PREFIX;
use crate::error::{AnError, Result};
use crate::traits::Resource;

/// Maximum pages to follow before giving up on a `next` chain.
///
/// Guards against a misbehaving upstream producing an endless chain;
/// tripping it is an error, not a truncation.
pub const MAX_PAGES: u32 = 1000;

/// One raw page of an OSDI collection, as served on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionPage {
    #[serde(rename = "_embedded", default)]
    embedded: HashMap<String, Value>,

    #[serde(rename = "_links", default)]
    links: PageLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<NextLink>,
}

#[derive(Debug, Clone, Deserialize)]
struct NextLink {
    href: Url,
}

impl CollectionPage {
    /// The raw embedded items for a resource.
    ///
    /// The embedding key is resolved like a link relation: the bare
    /// resource name first, then the `osdi:`-prefixed form.
    ///
    /// # Errors
    ///
    /// Returns [`AnError::DataContract`] if the page has no embedded array
    /// under either key.
    pub fn items(&self, resource: &str) -> Result<&[Value]> {
        let entry = self
            .embedded
            .get(resource)
            .or_else(|| self.embedded.get(&format!("{OSDI_PREFIX}{resource}")));

        match entry.map(Value::as_array) {
            Some(Some(items)) => Ok(items),
            Some(None) => Err(AnError::DataContract(format!(
                "embedded '{resource}' is not an array"
            ))),
            None => Err(AnError::DataContract(format!(
                "page has no '_embedded.{resource}' or '_embedded.{OSDI_PREFIX}{resource}'"
            ))),
        }
    }

    /// Decode the embedded items into typed records, preserving order.
    pub fn decode<T: Resource>(&self) -> Result<Vec<T>> {
        self.items(T::RESOURCE)?
            .iter()
            .map(|raw| serde_json::from_value(raw.clone()).map_err(AnError::ParseError))
            .collect()
    }

    /// The continuation URL, if the chain has more pages.
    pub fn next_url(&self) -> Option<&Url> {
        self.links.next.as_ref().map(|link| &link.href)
    }
}

/// A decoded page of records plus its continuation URL.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items on this page, in served order.
    pub items: Vec<T>,
    /// URL of the next page, if any.
    pub next: Option<Url>,
}

impl<T> Page<T> {
    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next: self.next,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if more pages follow this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Fetch one collection page.
pub async fn fetch_page(client: &AnClient, url: Url) -> Result<CollectionPage> {
    let response = client.get(url).await?;
    response.json().await.map_err(AnError::HttpError)
}

/// Exhaustively collect a paginated collection, starting at `start` and
/// following `_links.next.href` until the chain ends.
///
/// `extract` turns one raw page into zero or more items, which are appended
/// in page-arrival order. Duplicates across overlapping pages are kept; the
/// collector does not deduplicate.
///
/// # Errors
///
/// Propagates any page fetch or extraction error immediately, discarding
/// items collected so far. Returns [`AnError::PaginationLimit`] if the
/// chain exceeds [`MAX_PAGES`].
pub async fn collect_all<T, F>(client: &AnClient, start: Url, mut extract: F) -> Result<Vec<T>>
where
    F: FnMut(&CollectionPage) -> Result<Vec<T>>,
{
    let mut items = Vec::new();
    let mut next = Some(start);
    let mut pages: u32 = 0;

    while let Some(url) = next {
        if pages >= MAX_PAGES {
            return Err(AnError::PaginationLimit {
                url: url.to_string(),
                pages: MAX_PAGES,
            });
        }
        pages += 1;

        let page = fetch_page(client, url).await?;
        items.extend(extract(&page)?);
        next = page.next_url().cloned();
    }

    tracing::debug!(pages, items = items.len(), "collection exhausted");
    Ok(items)
}
