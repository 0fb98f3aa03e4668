//! Resource naming for link and embedding resolution.

use serde::de::DeserializeOwned;

/// A record type served by a named API collection.
///
/// `RESOURCE` is the logical link-relation name in the discovery document
/// and the embedding key in collection pages. Both are resolved with the
/// bare-then-`osdi:`-prefixed fallback.
pub trait Resource: DeserializeOwned {
    /// Logical resource name (e.g. `"people"`, `"donations"`, `"tags"`).
    const RESOURCE: &'static str;
}
