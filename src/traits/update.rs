//! Update trait for modifying existing records.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AnClient;
use crate::discovery::join_segment;
use crate::error::{AnError, Result};
use crate::traits::Resource;

/// Update an existing record.
///
/// # Example
///
/// ```ignore
/// use anapi::{AnClient, Person, Update, PersonParams};
///
/// let client = AnClient::from_env().await?;
/// let updated = Person::update(&client, "d91b4b2e-...", &PersonParams {
///     given_name: Some("Jane".to_string()),
///     ..Default::default()
/// }).await?;
/// ```
#[async_trait]
pub trait Update: Resource + Sized + Send {
    /// Payload for the update request. Note that the service's update
    /// shape can differ from its create shape; each record type documents
    /// its own contract.
    type Params: Serialize + Send + Sync;

    /// PUT the payload to the record's item endpoint and return the
    /// updated record.
    async fn update(client: &AnClient, id: &str, params: &Self::Params) -> Result<Self> {
        let base = client.resolve(Self::RESOURCE)?;
        let url = join_segment(&base, id)?;

        let response = client.put(url, params).await?;
        response.json().await.map_err(AnError::HttpError)
    }
}
