//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Donation, Identified, Person, Tag};

/// Trait for human-readable key-value output.
///
/// Implemented by record types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Person {
    fn pretty_print(&self) -> String {
        let id = self
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|_| "<no identifiers>".to_string());
        let divider = "─".repeat(id.len().max(30));

        let mut lines = vec![format!("Person: {}", id), divider];

        let name = self.full_name();
        if !name.is_empty() {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(email) = self.primary_email() {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(address) = self.postal_addresses.first() {
            if let Some(ref locality) = address.locality {
                lines.push(format!(
                    "Location:       {}{}",
                    locality,
                    address
                        .region
                        .as_deref()
                        .map(|r| format!(", {r}"))
                        .unwrap_or_default()
                ));
            }
        }

        if let Some(ref created) = self.created_date {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Donation {
    fn pretty_print(&self) -> String {
        let id = self
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|_| "<no identifiers>".to_string());
        let divider = "─".repeat(id.len().max(30));

        let mut lines = vec![format!("Donation: {}", id), divider];

        if let Some(ref amount) = self.amount {
            lines.push(format!(
                "Amount:         {} {}",
                amount,
                self.currency.as_deref().unwrap_or("")
            ));
        }

        lines.push(format!(
            "Created:        {}",
            self.created_date.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        if self.recurring() {
            lines.push(format!(
                "Recurring:      yes ({})",
                self.period().unwrap_or("?")
            ));
            match self.next_donation() {
                Ok(Some(next)) => lines.push(format!(
                    "Next charge:    {}",
                    next.format("%Y-%m-%d %H:%M:%S UTC")
                )),
                Ok(None) => {}
                Err(e) => lines.push(format!("Next charge:    <{e}>")),
            }
        } else {
            lines.push("Recurring:      no".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Tag {
    fn pretty_print(&self) -> String {
        let id = self
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|_| "<no identifiers>".to_string());
        let divider = "─".repeat(id.len().max(30));

        let mut lines = vec![format!("Tag: {}", id), divider];

        if let Some(ref name) = self.name {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(ref created) = self.created_date {
            lines.push(format!(
                "Created:        {}",
                created.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        lines.join("\n")
    }
}
