//! Donation record and schedule derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AnError, Result};
use crate::models::record::Identified;
use crate::recurrence::RecurrenceInterval;
use crate::traits::{List, Resource};

/// A single donation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub identifiers: Vec<String>,

    /// When the donation was created. Recurring schedules are anchored
    /// here.
    pub created_date: DateTime<Utc>,

    #[serde(default)]
    pub modified_date: Option<DateTime<Utc>>,

    /// Total amount as served (a decimal string, e.g. `"20.00"`).
    #[serde(default)]
    pub amount: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    /// Recurrence descriptor; absent on one-off donations.
    #[serde(rename = "action_network:recurrence", default)]
    pub recurrence: Option<Recurrence>,

    /// Server fields this library does not model, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The service's recurrence descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(default)]
    pub recurring: bool,

    /// Free-text interval phrase, e.g. `"every 1 month"`. Parsed on demand
    /// by [`RecurrenceInterval::parse`].
    #[serde(default)]
    pub period: Option<String>,
}

impl Donation {
    /// Whether this donation repeats.
    pub fn recurring(&self) -> bool {
        self.recurrence.as_ref().is_some_and(|r| r.recurring)
    }

    /// The raw recurrence period phrase, if any.
    pub fn period(&self) -> Option<&str> {
        self.recurrence.as_ref().and_then(|r| r.period.as_deref())
    }

    /// The next charge date, evaluated against the current instant.
    ///
    /// Returns `Ok(None)` for non-recurring donations regardless of the
    /// period content. Recomputed on every call; nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`AnError::MalformedRecurrence`] if the donation is
    /// recurring but its period phrase cannot be parsed.
    pub fn next_donation(&self) -> Result<Option<DateTime<Utc>>> {
        self.next_donation_after(Utc::now())
    }

    /// [`next_donation`](Self::next_donation) against an explicit `now`,
    /// for deterministic evaluation.
    pub fn next_donation_after(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>> {
        let Some(recurrence) = &self.recurrence else {
            return Ok(None);
        };
        if !recurrence.recurring {
            return Ok(None);
        }

        let period = recurrence
            .period
            .as_deref()
            .ok_or_else(|| AnError::MalformedRecurrence {
                period: String::new(),
                reason: "recurring donation has no period",
            })?;
        let interval = RecurrenceInterval::parse(period)?;

        interval.next_after(self.created_date, now).map(Some)
    }
}

impl Identified for Donation {
    fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl Resource for Donation {
    const RESOURCE: &'static str = "donations";
}

impl List for Donation {}
