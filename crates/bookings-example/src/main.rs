//! The "transactions" list page of a booking back office, driven from
//! the command line.
//!
//! Run it a few times with different flags to watch the engine at work:
//!
//! ```text
//! bookings --status completed --sort amount --desc
//! bookings --search kayak --min-amount 100 --page 2
//! bookings --json --per-page 5
//! ```
//!
//! Set `RUST_LOG=backview=debug` to see the reconciler's decisions.

use anyhow::Result;
use clap::Parser;

mod records;

use backview::{FieldFilter, ListView, Paginated, Sort};
use records::{ledger, transaction_schema, Transaction};

#[derive(Debug, Parser)]
#[command(name = "bookings", about = "Browse a synthetic transaction ledger")]
struct Args {
    /// Free-text search over reference, customer, and activity.
    #[arg(long, default_value = "")]
    search: String,

    /// Keep only these statuses (repeatable).
    #[arg(long = "status")]
    statuses: Vec<String>,

    /// Keep only amounts >= this value.
    #[arg(long)]
    min_amount: Option<f64>,

    /// Keep only amounts <= this value.
    #[arg(long)]
    max_amount: Option<f64>,

    /// Field to sort by (falls back to the schema default if unknown).
    #[arg(long, default_value = "createdAt")]
    sort: String,

    /// Sort descending instead of ascending.
    #[arg(long)]
    desc: bool,

    /// Page to show (1-based).
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Records per page.
    #[arg(long, default_value_t = 10)]
    per_page: usize,

    /// Emit the page as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let schema = transaction_schema()?;
    let transactions = ledger(50);

    let sort = if args.desc {
        Sort::desc(args.sort.as_str())
    } else {
        Sort::asc(args.sort.as_str())
    };

    let mut filters = schema
        .initial_filters()
        .with_search(args.search.as_str())
        .with_field("status", FieldFilter::one_of(args.statuses.clone()))
        .with_sort(sort);
    filters = match (args.min_amount, args.max_amount) {
        (Some(min), Some(max)) => filters.with_field("amount", FieldFilter::between(min, max)),
        (Some(min), None) => filters.with_field("amount", FieldFilter::at_least(min)),
        (None, Some(max)) => filters.with_field("amount", FieldFilter::at_most(max)),
        (None, None) => filters,
    };

    let mut view = ListView::new(schema, args.per_page);
    view.apply(filters);
    view.set_page(args.page);

    let page = view.select(&transactions);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_table(&page);
    }
    Ok(())
}

fn print_table(page: &Paginated<&Transaction>) {
    if page.is_empty() {
        println!("no matching transactions");
        return;
    }

    println!(
        "{:<9} {:<18} {:<22} {:<10} {:>9}",
        "REF", "CUSTOMER", "ACTIVITY", "STATUS", "AMOUNT"
    );
    for tx in &page.items {
        println!(
            "{:<9} {:<18} {:<22} {:<10} {:>9.2}",
            tx.reference, tx.customer, tx.activity, tx.status, tx.amount
        );
    }
    println!(
        "page {}/{} - {} of {} transactions",
        page.page,
        page.page_count().max(1),
        page.len(),
        page.total
    );
}
