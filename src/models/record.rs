//! Shared identifier handling for OSDI records.
//!
//! Every well-formed record carries an `identifiers` array of
//! namespace-prefixed strings (e.g. `"action_network:d91b4b2e-..."`). The
//! derived id strips the namespace; a record without identifiers violates
//! the API contract and fails loudly rather than defaulting.

use serde::Serialize;

use crate::error::{AnError, Result};

/// Namespace prefix the service applies to identifiers and some record
/// fields.
pub const ACTION_NETWORK_PREFIX: &str = "action_network:";

/// A record's derived identifier.
///
/// Records usually carry exactly one identifier; records synced from other
/// systems can carry several, in which case all are kept in served order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    One(String),
    Many(Vec<String>),
}

impl RecordId {
    /// The first identifier, which the service lists first for its own
    /// namespace.
    pub fn primary(&self) -> &str {
        match self {
            Self::One(id) => id,
            Self::Many(ids) => &ids[0],
        }
    }

    /// The sole identifier, or `None` if the record has several.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::One(id) => Some(id),
            Self::Many(_) => None,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(id) => f.write_str(id),
            Self::Many(ids) => f.write_str(&ids.join(", ")),
        }
    }
}

fn strip_namespace(identifier: &str) -> String {
    identifier
        .strip_prefix(ACTION_NETWORK_PREFIX)
        .unwrap_or(identifier)
        .to_string()
}

/// Derive a [`RecordId`] from a record's `identifiers` array.
///
/// # Errors
///
/// Returns [`AnError::DataContract`] if the array is empty (or was missing
/// from the response entirely).
pub fn derive_id(identifiers: &[String]) -> Result<RecordId> {
    match identifiers {
        [] => Err(AnError::DataContract(
            "record is missing the required 'identifiers' field".to_string(),
        )),
        [single] => Ok(RecordId::One(strip_namespace(single))),
        many => Ok(RecordId::Many(
            many.iter().map(|id| strip_namespace(id)).collect(),
        )),
    }
}

/// Records carrying an OSDI `identifiers` array.
pub trait Identified {
    /// The raw identifiers, prefixes intact.
    fn identifiers(&self) -> &[String];

    /// The derived id, namespace prefix stripped.
    ///
    /// # Errors
    ///
    /// Returns [`AnError::DataContract`] if the record has no identifiers.
    fn id(&self) -> Result<RecordId> {
        derive_id(self.identifiers())
    }
}
