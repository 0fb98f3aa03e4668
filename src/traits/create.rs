//! Create trait for posting new records.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AnClient;
use crate::error::{AnError, Result};
use crate::traits::Resource;

/// Create a new record.
///
/// # Example
///
/// ```ignore
/// use anapi::{AnClient, Person, Create, PersonSignup};
///
/// let client = AnClient::from_env().await?;
/// let created = Person::create(&client, &PersonSignup {
///     person: params,
///     add_tags: vec!["volunteer".to_string()],
/// }).await?;
/// ```
#[async_trait]
pub trait Create: Resource + Sized + Send {
    /// Payload for the create request. Its serialized shape is the wire
    /// contract; see the record type for any required nesting.
    type Params: Serialize + Send + Sync;

    /// POST the payload to the resource's collection endpoint and return
    /// the created record.
    async fn create(client: &AnClient, params: &Self::Params) -> Result<Self> {
        let url = client.resolve(Self::RESOURCE)?;

        let response = client.post(url, params).await?;
        response.json().await.map_err(AnError::HttpError)
    }
}
