//! Person record and trait implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::AnClient;
use crate::error::Result;
use crate::models::record::Identified;
use crate::pagination::collect_all;
use crate::traits::{Create, Get, List, Resource, Update};

/// An activist registered with the organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// Namespace-prefixed identifiers. Always present in well-formed
    /// responses; use [`Identified::id`] for the stripped form.
    #[serde(default)]
    pub identifiers: Vec<String>,

    #[serde(default)]
    pub given_name: Option<String>,

    #[serde(default)]
    pub family_name: Option<String>,

    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,

    #[serde(default)]
    pub postal_addresses: Vec<PostalAddress>,

    #[serde(default)]
    pub custom_fields: Map<String, Value>,

    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,

    /// Server fields this library does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An email address entry on a person record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,

    /// Subscription status (e.g. "subscribed", "unsubscribed").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A postal address entry on a person record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_lines: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

impl Person {
    /// The person's primary email address, falling back to the first one.
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .iter()
            .find(|e| e.primary == Some(true))
            .or_else(|| self.email_addresses.first())
            .and_then(|e| e.address.as_deref())
    }

    /// Given and family name joined for display.
    pub fn full_name(&self) -> String {
        [self.given_name.as_deref(), self.family_name.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Identified for Person {
    fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

/// Person fields shared by create and update payloads.
///
/// Serialized as-is this is the **update** body: the service expects update
/// fields at the top level. Creates nest the same fields under a `person`
/// key; see [`PersonSignup`]. That asymmetry is the service's documented
/// contract and is preserved here, one type per shape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub postal_addresses: Vec<PostalAddress>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
}

/// Create payload: person fields nested under `person`, plus tag names to
/// apply on signup.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonSignup {
    pub person: PersonParams,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub add_tags: Vec<String>,
}

impl Resource for Person {
    const RESOURCE: &'static str = "people";
}

impl Get for Person {}

impl List for Person {}

impl Create for Person {
    type Params = PersonSignup;
}

impl Update for Person {
    type Params = PersonParams;
}

/// Search for people with an OSDI filter query
/// (`filter=<field> eq '<term>'`), walking all result pages.
///
/// # Arguments
///
/// * `field` - Field to match (e.g. `email_address`)
/// * `term` - Exact value to match
///
/// # Example
///
/// ```ignore
/// use anapi::find_people;
///
/// let matches = find_people(&client, "email_address", "jane@example.com").await?;
/// ```
#[tracing::instrument(skip(client))]
pub async fn find_people(client: &AnClient, field: &str, term: &str) -> Result<Vec<Person>> {
    let mut url = client.resolve(Person::RESOURCE)?;
    url.query_pairs_mut()
        .append_pair("filter", &format!("{field} eq '{term}'"));

    collect_all(client, url, |page| page.decode::<Person>()).await
}

/// Get a single person by id.
pub async fn get_person(client: &AnClient, id: &str) -> Result<Person> {
    Person::get(client, id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_from_osdi_response() {
        let person: Person = serde_json::from_value(serde_json::json!({
            "identifiers": ["action_network:d91b4b2e-ae0e-4cd3-9ed7-d0ec501b0bc3"],
            "given_name": "Jane",
            "family_name": "Doe",
            "email_addresses": [
                { "address": "jane@example.com", "primary": true, "status": "subscribed" }
            ],
            "created_date": "2017-08-14T14:54:26Z",
            "languages_spoken": ["en"]
        }))
        .unwrap();

        assert_eq!(
            person.id().unwrap().primary(),
            "d91b4b2e-ae0e-4cd3-9ed7-d0ec501b0bc3"
        );
        assert_eq!(person.primary_email(), Some("jane@example.com"));
        assert_eq!(person.full_name(), "Jane Doe");
        // Unmodeled fields land in the extra bag
        assert_eq!(person.extra["languages_spoken"][0], "en");
    }

    #[test]
    fn test_person_without_identifiers_fails_on_id() {
        let person: Person = serde_json::from_value(serde_json::json!({
            "given_name": "Ghost"
        }))
        .unwrap();
        assert!(person.id().is_err());
    }

    #[test]
    fn test_signup_nests_under_person_key() {
        let signup = PersonSignup {
            person: PersonParams {
                given_name: Some("John".to_string()),
                family_name: Some("Doe".to_string()),
                email_addresses: vec![EmailAddress {
                    address: Some("john.doe@example.com".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            },
            add_tags: vec!["volunteer".to_string()],
        };

        let body = serde_json::to_value(&signup).unwrap();
        assert_eq!(body["person"]["given_name"], "John");
        assert_eq!(body["add_tags"][0], "volunteer");
    }

    #[test]
    fn test_update_body_is_flat() {
        // Updates send the same fields unnested; the asymmetry is upstream
        // contract, not a bug.
        let params = PersonParams {
            family_name: Some("Doe".to_string()),
            ..Default::default()
        };

        let body = serde_json::to_value(&params).unwrap();
        assert_eq!(body["family_name"], "Doe");
        assert!(body.get("person").is_none());
    }
}
