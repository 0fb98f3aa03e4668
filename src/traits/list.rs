//! List trait for fetching collections of records.

use async_trait::async_trait;
use url::Url;

use crate::client::AnClient;
use crate::error::Result;
use crate::pagination::{collect_all, fetch_page, Page};
use crate::traits::Resource;

/// List records from a paginated collection.
///
/// # Example
///
/// ```ignore
/// use anapi::{AnClient, Donation, List};
///
/// let client = AnClient::from_env().await?;
///
/// // Fetch a single page
/// let page = Donation::list_page(&client).await?;
///
/// // Walk the whole `next` chain
/// let all = Donation::list_all(&client).await?;
/// ```
#[async_trait]
pub trait List: Resource + Sized + Send {
    /// Fetch the first page of the collection.
    async fn list_page(client: &AnClient) -> Result<Page<Self>> {
        let url = client.resolve(Self::RESOURCE)?;
        Self::list_page_at(client, url).await
    }

    /// Fetch one page at a specific URL, typically a previous page's
    /// [`next`](Page::next).
    async fn list_page_at(client: &AnClient, url: Url) -> Result<Page<Self>> {
        let raw = fetch_page(client, url).await?;
        Ok(Page {
            items: raw.decode::<Self>()?,
            next: raw.next_url().cloned(),
        })
    }

    /// Collect every record in the collection by exhausting the `next`
    /// chain, preserving page order.
    ///
    /// # Errors
    ///
    /// Fails as a whole if any page fails; no partial results are returned.
    async fn list_all(client: &AnClient) -> Result<Vec<Self>> {
        let start = client.resolve(Self::RESOURCE)?;
        collect_all(client, start, |page| page.decode::<Self>()).await
    }
}
