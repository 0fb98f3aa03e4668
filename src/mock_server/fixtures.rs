//! Canned records for mock server scenarios.

use serde_json::json;

use crate::{Donation, Person, Tag, Tagging};

/// Factory for mock records.
pub struct Fixtures;

/// The data behind [`super::MockServer::start`].
pub struct DefaultScenario {
    pub people: Vec<Person>,
    pub donations: Vec<Donation>,
    pub tags: Vec<Tag>,
    pub taggings: Vec<(String, Vec<Tagging>)>,
}

impl Fixtures {
    /// A person with one subscribed email address.
    pub fn person(id: &str, given_name: &str, family_name: &str, email: &str) -> Person {
        serde_json::from_value(json!({
            "identifiers": [format!("action_network:{id}")],
            "given_name": given_name,
            "family_name": family_name,
            "email_addresses": [
                { "address": email, "primary": true, "status": "subscribed" }
            ],
            "created_date": "2017-08-01T10:00:00Z",
            "modified_date": "2017-08-01T10:00:00Z"
        }))
        .expect("fixture person is valid")
    }

    /// A recurring donation with the given period phrase.
    pub fn recurring_donation(id: &str, created: &str, amount: &str, period: &str) -> Donation {
        serde_json::from_value(json!({
            "identifiers": [format!("action_network:{id}")],
            "created_date": created,
            "amount": amount,
            "currency": "usd",
            "action_network:recurrence": { "recurring": true, "period": period }
        }))
        .expect("fixture donation is valid")
    }

    /// A one-off donation.
    pub fn one_off_donation(id: &str, created: &str, amount: &str) -> Donation {
        serde_json::from_value(json!({
            "identifiers": [format!("action_network:{id}")],
            "created_date": created,
            "amount": amount,
            "currency": "usd",
            "action_network:recurrence": { "recurring": false }
        }))
        .expect("fixture donation is valid")
    }

    /// A tag.
    pub fn tag(id: &str, name: &str) -> Tag {
        serde_json::from_value(json!({
            "identifiers": [format!("action_network:{id}")],
            "name": name,
            "created_date": "2017-04-01T10:00:00Z"
        }))
        .expect("fixture tag is valid")
    }

    /// A tagging.
    pub fn tagging(id: &str) -> Tagging {
        serde_json::from_value(json!({
            "identifiers": [format!("action_network:{id}")],
            "created_date": "2017-04-02T10:00:00Z"
        }))
        .expect("fixture tagging is valid")
    }

    /// Default scenario: a couple of people, enough donations to paginate
    /// at small page sizes, and a tag with taggings.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            people: vec![
                Self::person("p-1", "Jane", "Doe", "jane@example.com"),
                Self::person("p-2", "John", "Doe", "john@example.com"),
            ],
            donations: vec![
                Self::recurring_donation("d-1", "2017-08-14T14:54:26Z", "20.00", "every 1 month"),
                Self::one_off_donation("d-2", "2017-08-15T09:00:00Z", "5.00"),
                Self::recurring_donation("d-3", "2017-07-01T12:00:00Z", "10.00", "every 2 weeks"),
                Self::one_off_donation("d-4", "2017-09-01T08:30:00Z", "50.00"),
                Self::recurring_donation("d-5", "2016-12-25T00:00:00Z", "15.00", "every 1 year"),
            ],
            tags: vec![
                Self::tag("t-1", "volunteer"),
                Self::tag("t-2", "2017_04_general_meeting"),
            ],
            taggings: vec![(
                "t-1".to_string(),
                vec![Self::tagging("tg-1"), Self::tagging("tg-2")],
            )],
        }
    }
}
