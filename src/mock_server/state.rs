//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Action Network server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{Donation, Person, Tag, Tagging, ACTION_NETWORK_PREFIX};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Base URL of the running server, set at startup; hypermedia links
    /// are rendered against it.
    pub base_url: String,

    /// Message of the day served in the discovery document.
    pub motd: String,

    /// People, in insertion order.
    pub people: Vec<Person>,

    /// Donations, in insertion order; served in pages of `page_size`.
    pub donations: Vec<Donation>,

    /// Tags, in insertion order.
    pub tags: Vec<Tag>,

    /// Taggings indexed by stripped tag id.
    pub taggings: HashMap<String, Vec<Tagging>>,

    /// Items per collection page.
    pub page_size: usize,
}

/// Whether a record's identifiers contain the given stripped id.
pub(super) fn has_id(identifiers: &[String], id: &str) -> bool {
    identifiers
        .iter()
        .any(|i| i.strip_prefix(ACTION_NETWORK_PREFIX).unwrap_or(i) == id)
}

impl MockState {
    /// Create a new empty state with the default page size.
    pub fn new() -> Self {
        Self {
            motd: "Welcome to the mock Action Network API!".to_string(),
            page_size: 25,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Set the collection page size (useful to force multi-page chains).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the message of the day.
    pub fn with_motd(mut self, motd: &str) -> Self {
        self.motd = motd.to_string();
        self
    }

    /// Add a person to the state.
    pub fn with_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    /// Add a donation to the state.
    pub fn with_donation(mut self, donation: Donation) -> Self {
        self.donations.push(donation);
        self
    }

    /// Add a tag to the state.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Add taggings for a tag id.
    pub fn with_taggings(mut self, tag_id: &str, taggings: Vec<Tagging>) -> Self {
        self.taggings.insert(tag_id.to_string(), taggings);
        self
    }

    /// Find a person by stripped id.
    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| has_id(&p.identifiers, id))
    }

    /// Find a tag by stripped id.
    pub fn get_tag(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| has_id(&t.identifiers, id))
    }

    /// People matching an OSDI filter (`<field> eq '<term>'`); all people
    /// when no filter is given.
    pub fn filter_people(&self, field: Option<&str>, term: Option<&str>) -> Vec<&Person> {
        let (Some(field), Some(term)) = (field, term) else {
            return self.people.iter().collect();
        };

        self.people
            .iter()
            .filter(|p| match field {
                "email_address" => p
                    .email_addresses
                    .iter()
                    .any(|e| e.address.as_deref() == Some(term)),
                "given_name" => p.given_name.as_deref() == Some(term),
                "family_name" => p.family_name.as_deref() == Some(term),
                _ => false,
            })
            .collect()
    }
}
