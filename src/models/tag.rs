//! Tag and tagging records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::AnClient;
use crate::discovery::join_segment;
use crate::error::Result;
use crate::models::record::Identified;
use crate::pagination::collect_all;
use crate::traits::{Get, List, Resource};

/// An organizing tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub identifiers: Vec<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The application of a [`Tag`] to a person.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tagging {
    #[serde(default)]
    pub identifiers: Vec<String>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    /// All taggings of this tag, walking the nested `taggings` collection.
    pub async fn taggings(&self, client: &AnClient) -> Result<Vec<Tagging>> {
        let id = self.id()?;
        let base = client.resolve(Tag::RESOURCE)?;
        let url = join_segment(&join_segment(&base, id.primary())?, Tagging::RESOURCE)?;

        collect_all(client, url, |page| page.decode::<Tagging>()).await
    }
}

impl Identified for Tag {
    fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl Identified for Tagging {
    fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl Resource for Tag {
    const RESOURCE: &'static str = "tags";
}

impl Get for Tag {}

impl List for Tag {}

impl Resource for Tagging {
    const RESOURCE: &'static str = "taggings";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_from_osdi_response() {
        let tag: Tag = serde_json::from_value(serde_json::json!({
            "identifiers": ["action_network:ccc91387-2a79-4ec4-91e6-8104e931bd03"],
            "name": "2017_04_general_meeting",
            "created_date": "2017-04-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(
            tag.id().unwrap().primary(),
            "ccc91387-2a79-4ec4-91e6-8104e931bd03"
        );
        assert_eq!(tag.name.as_deref(), Some("2017_04_general_meeting"));
    }
}
