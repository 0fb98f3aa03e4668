//! Action Network API client library.
//!
//! A Rust library for the Action Network OSDI REST API. The API is
//! hypermedia-driven: capabilities are discovered at runtime from the root
//! discovery document, and every endpoint is resolved by logical name
//! through an immutable [`LinkIndex`] snapshot rather than hardcoded.
//! Operations (Get, List, Create, Update) are traits that record types
//! implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use anapi::{AnClient, Donation, Person, Tag, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> anapi::Result<()> {
//!     // Create client from environment variables; this fetches the
//!     // discovery document and freezes the link index.
//!     let client = AnClient::from_env().await?;
//!
//!     // Search people by email
//!     let people = anapi::find_people(&client, "email_address", "jane@example.com").await?;
//!
//!     // Collect every donation, following pagination links
//!     let donations = Donation::list_all(&client).await?;
//!     for donation in &donations {
//!         if let Some(next) = donation.next_donation()? {
//!             println!("next charge: {next}");
//!         }
//!     }
//!
//!     // Get a tag by id
//!     let tag = Tag::get(&client, "ccc91387-2a79-4ec4-91e6-8104e931bd03").await?;
//!     println!("{:?}", tag.name);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`AnClient`] performs authenticated HTTP and owns the [`LinkIndex`]
//!   snapshot built from the discovery document.
//! - [`Get`], [`List`], [`Create`], [`Update`] are implemented by record
//!   types for the operations their endpoints support; their default
//!   implementations resolve endpoints through the link index.
//! - [`Person`], [`Donation`], [`Tag`] are typed records; unanticipated
//!   server fields are preserved in each record's `extra` bag.
//! - Collection responses paginate via `_links.next`; [`List::list_all`]
//!   exhausts the chain.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `AN_API_KEY` (required) - Your Action Network API key
//! - `AN_API_URL` (optional) - Discovery endpoint (defaults to
//!   `https://actionnetwork.org/api/v2/`)

mod client;
mod discovery;
mod error;
mod models;
mod pagination;
mod recurrence;
mod traits;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::AnClient;
pub use discovery::{DiscoveryDocument, Link, LinkIndex, RootLinks, OSDI_PREFIX};
pub use error::{AnError, Result};
pub use pagination::{collect_all, fetch_page, CollectionPage, Page, MAX_PAGES};
pub use recurrence::{RecurrenceInterval, RecurrenceUnit};

// Re-export traits
pub use traits::{Create, Get, List, Resource, Update};

// Re-export models
pub use models::{
    derive_id,
    // Donation types
    Donation,
    // Email/address pieces
    EmailAddress,
    // Identifier handling
    Identified,
    // Person types
    Person,
    PersonParams,
    PersonSignup,
    PostalAddress,
    Recurrence,
    RecordId,
    // Tag types
    Tag,
    Tagging,
    ACTION_NETWORK_PREFIX,
};

// Re-export convenience functions
pub use models::{find_people, get_person};
