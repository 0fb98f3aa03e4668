//! Get trait for fetching single records.

use async_trait::async_trait;

use crate::client::AnClient;
use crate::discovery::join_segment;
use crate::error::{AnError, Result};
use crate::traits::Resource;

/// Fetch a single record by id.
///
/// The default implementation resolves the resource's collection URL from
/// the link index and appends the id as a path segment.
///
/// # Example
///
/// ```ignore
/// use anapi::{AnClient, Person, Get};
///
/// let client = AnClient::from_env().await?;
/// let person = Person::get(&client, "d91b4b2e-ae0e-4cd3-9ed7-d0ec501b0bc3").await?;
/// ```
#[async_trait]
pub trait Get: Resource + Sized + Send {
    /// Fetch the record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be resolved, the record does
    /// not exist, or the request fails.
    async fn get(client: &AnClient, id: &str) -> Result<Self> {
        let base = client.resolve(Self::RESOURCE)?;
        let url = join_segment(&base, id)?;

        let response = client.get(url).await?;
        response.json().await.map_err(AnError::HttpError)
    }
}
