//! Synthetic transaction ledger for the example.
//!
//! Deterministic, no I/O, no randomness: the same fifty transactions on
//! every run, which keeps the example's output stable and diffable. In a
//! real console the same schema would sit in front of an API-backed
//! snapshot instead.

use backview::{Number, Record, Schema, Sort, Timestamp, Value};
use serde::Serialize;

/// One row of the transactions list page.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub reference: String,
    pub customer: String,
    pub activity: String,
    pub status: String,
    pub amount: f64,
    pub created_at: i64,
}

impl Record for Transaction {
    fn field(&self, name: &str) -> Value<'_> {
        match name {
            "reference" => Value::Text(&self.reference),
            "customer" => Value::Text(&self.customer),
            "activity" => Value::Text(&self.activity),
            "status" => Value::Text(&self.status),
            "amount" => Value::Number(Number::F64(self.amount)),
            "createdAt" => Value::Timestamp(Timestamp(self.created_at)),
            _ => Value::None,
        }
    }
}

/// The transactions page schema: what search scans, what sorts, and the
/// order the page opens with.
pub fn transaction_schema() -> backview::Result<Schema> {
    Schema::builder("transactions")
        .searchable(["reference", "customer", "activity"])
        .sortable(["amount", "createdAt", "customer", "status"])
        .date_field("createdAt")
        .default_sort(Sort::desc("createdAt"))
        .build()
}

const CUSTOMERS: [&str; 8] = [
    "Alice Duval",
    "Béatrice Nguyen",
    "Carol Smith",
    "Dan Alvarez",
    "Erik Johansson",
    "Fatima Haddad",
    "Grace Okafor",
    "Hugo Lindqvist",
];

const ACTIVITIES: [&str; 6] = [
    "Sunset Kayak Tour",
    "Old Town Food Walk",
    "Canyon Zipline",
    "Harbor Sailing Trip",
    "Street Art Bike Ride",
    "Volcano Day Hike",
];

const STATUSES: [&str; 3] = ["pending", "completed", "cancelled"];

/// Builds the ledger: `count` transactions, one per hour, with cycling
/// customers/activities/statuses and spread-out amounts.
pub fn ledger(count: usize) -> Vec<Transaction> {
    (0..count)
        .map(|i| Transaction {
            reference: format!("TX-{:04}", i + 1),
            customer: CUSTOMERS[i % CUSTOMERS.len()].to_string(),
            activity: ACTIVITIES[i % ACTIVITIES.len()].to_string(),
            status: STATUSES[i % STATUSES.len()].to_string(),
            amount: ((i * 37) % 400) as f64 + 19.5,
            created_at: 1_700_000_000_000 + (i as i64) * 3_600_000,
        })
        .collect()
}
