//! Discovery document and link resolution.
//!
//! The Action Network API is hypermedia-driven: its root endpoint returns a
//! discovery document whose `_links` object maps link-relation names to
//! endpoint URLs. [`LinkIndex`] is the immutable snapshot of one such fetch;
//! all resource URLs are resolved through it rather than hardcoded.

use std::collections::HashMap;

use serde::Deserialize;
use url::Url;

use crate::error::{AnError, Result};

/// Namespace prefix the service applies to OSDI link relations
/// (e.g. `osdi:people`).
pub const OSDI_PREFIX: &str = "osdi:";

/// The discovery document served by the API root.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryDocument {
    /// Message of the day. Display-only.
    #[serde(default)]
    pub motd: Option<String>,

    /// Root links, including the API base URL.
    pub links: RootLinks,

    /// Link relations: logical name (bare or `osdi:`-prefixed) to href.
    #[serde(rename = "_links", default)]
    pub link_relations: HashMap<String, Link>,
}

/// The `links` object of the discovery document.
#[derive(Debug, Clone, Deserialize)]
pub struct RootLinks {
    /// Absolute base URL of the API.
    #[serde(rename = "self")]
    pub self_url: Url,
}

/// A single hypermedia link.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: Url,
}

/// Resolved map from logical resource names to endpoint URLs.
///
/// Built once per discovery fetch and never mutated; refreshing the client
/// produces a new snapshot, so readers holding an old one keep a consistent
/// view. Safe to share across tasks.
#[derive(Debug, Clone)]
pub struct LinkIndex {
    base_url: Url,
    motd: Option<String>,
    links: HashMap<String, Url>,
}

impl LinkIndex {
    /// Build an index from a fetched discovery document.
    pub fn from_document(doc: DiscoveryDocument) -> Self {
        let links = doc
            .link_relations
            .into_iter()
            .map(|(name, link)| (name, link.href))
            .collect();
        Self {
            base_url: doc.links.self_url,
            motd: doc.motd,
            links,
        }
    }

    /// Resolve a logical resource name to its endpoint URL.
    ///
    /// Looks up the bare name first, then the `osdi:`-prefixed form. The
    /// bare form always wins when both exist, so resolution stays
    /// deterministic if the service ever defines both.
    ///
    /// # Errors
    ///
    /// Returns [`AnError::UnknownResource`] if the name is present in
    /// neither form.
    pub fn resolve(&self, resource: &str) -> Result<&Url> {
        self.links
            .get(resource)
            .or_else(|| self.links.get(&format!("{OSDI_PREFIX}{resource}")))
            .ok_or_else(|| AnError::UnknownResource(resource.to_string()))
    }

    /// The API base URL (`links.self` from the discovery document).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Message of the day, if the service sent one.
    pub fn motd(&self) -> Option<&str> {
        self.motd.as_deref()
    }

    /// All known link-relation names, as served (prefixes intact).
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.links.keys().map(String::as_str)
    }
}

/// Append a path segment to an endpoint URL (e.g. a record id onto a
/// collection URL), regardless of whether the endpoint carries a trailing
/// slash.
pub(crate) fn join_segment(base: &Url, segment: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| AnError::DataContract(format!("endpoint URL '{base}' cannot take a path")))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
