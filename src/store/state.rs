use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Serialize;

use crate::catalog::{CatalogGroup, Product};

/// Session state read by the presentation layer.
///
/// Every transition replaces whole fields; nothing is merged in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    pub male_products: Vec<Product>,
    pub female_products: Vec<Product>,
    pub current_product: Option<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CatalogState {
    pub(crate) fn products_mut(&mut self, group: CatalogGroup) -> &mut Vec<Product> {
        match group {
            CatalogGroup::Male => &mut self.male_products,
            CatalogGroup::Female => &mut self.female_products,
        }
    }
}

/// The three store operations, tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Group(CatalogGroup),
    Product,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Group(g) => write!(f, "group:{g}"),
            Operation::Product => f.write_str("product"),
        }
    }
}

/// What to do with a completion when a newer call of the same operation has
/// been issued since.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Only the most recently issued call may apply its result.
    #[default]
    LatestIssued,
    /// Whichever completion lands last wins.
    LastApplied,
}

impl FromStr for StalePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "latest-issued" => Ok(StalePolicy::LatestIssued),
            "last-applied" => Ok(StalePolicy::LastApplied),
            other => Err(anyhow!(
                "unknown stale policy {other:?} (expected latest-issued|last-applied)"
            )),
        }
    }
}

/// Whether a completed load was written into the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer call of the same operation was issued; this result was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket {
    pub(crate) op: Operation,
    seq: u64,
}

/// Issued tickets and outstanding calls per operation.
#[derive(Debug, Default)]
pub(crate) struct OpTracker {
    issued: HashMap<Operation, u64>,
    in_flight: HashMap<Operation, usize>,
}

impl OpTracker {
    pub(crate) fn issue(&mut self, op: Operation) -> Ticket {
        let seq = self.issued.entry(op).or_insert(0);
        *seq += 1;
        *self.in_flight.entry(op).or_insert(0) += 1;
        Ticket { op, seq: *seq }
    }

    /// Mark the call finished. Returns true when it is the newest issued call
    /// of its operation.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        if let Some(n) = self.in_flight.get_mut(&ticket.op) {
            *n = n.saturating_sub(1);
        }
        self.issued.get(&ticket.op).copied() == Some(ticket.seq)
    }

    pub(crate) fn any_in_flight(&self) -> bool {
        self.in_flight.values().any(|n| *n > 0)
    }
}
