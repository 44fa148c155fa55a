//! Transaction view classification for the whiteboard grids.
//!
//! Each grid view shows the transactions whose flags match a fixed
//! predicate. [`passes_filter`] is the single source of truth for row
//! visibility; it is pure and takes the current time as an argument.

use serde::Serialize;

use crate::error::CoreError;
use crate::models::transaction::{Transaction, TransactionFlags};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Completed, unpaid repairs older than this many days go on the pickup list.
pub const PICKUP_AGE_DAYS: i64 = 183;

/// Beer-bike transactions older than this many days show in the beer-bike view.
pub const BEER_BIKE_AGE_DAYS: i64 = 364;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub const VIEW_MAIN: &str = "main";
pub const VIEW_RETROSPEC: &str = "retrospec";
pub const VIEW_PICKUP: &str = "pickup";
pub const VIEW_PAID: &str = "paid";
pub const VIEW_COMPLETED: &str = "completed";
pub const VIEW_EMPLOYEE: &str = "employee";
pub const VIEW_REFURB: &str = "refurb";
pub const VIEW_BEER_BIKE: &str = "beer bike";

/// All valid view names.
pub const VALID_VIEWS: &[&str] = &[
    VIEW_MAIN,
    VIEW_RETROSPEC,
    VIEW_PICKUP,
    VIEW_PAID,
    VIEW_COMPLETED,
    VIEW_EMPLOYEE,
    VIEW_REFURB,
    VIEW_BEER_BIKE,
];

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A named transaction grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionView {
    Main,
    Retrospec,
    Pickup,
    Paid,
    Completed,
    Employee,
    Refurb,
    BeerBike,
}

impl TransactionView {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            VIEW_MAIN => Ok(Self::Main),
            VIEW_RETROSPEC => Ok(Self::Retrospec),
            VIEW_PICKUP => Ok(Self::Pickup),
            VIEW_PAID => Ok(Self::Paid),
            VIEW_COMPLETED => Ok(Self::Completed),
            VIEW_EMPLOYEE => Ok(Self::Employee),
            VIEW_REFURB => Ok(Self::Refurb),
            VIEW_BEER_BIKE => Ok(Self::BeerBike),
            _ => Err(CoreError::Validation(format!(
                "Invalid view '{s}'. Must be one of: {}",
                VALID_VIEWS.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => VIEW_MAIN,
            Self::Retrospec => VIEW_RETROSPEC,
            Self::Pickup => VIEW_PICKUP,
            Self::Paid => VIEW_PAID,
            Self::Completed => VIEW_COMPLETED,
            Self::Employee => VIEW_EMPLOYEE,
            Self::Refurb => VIEW_REFURB,
            Self::BeerBike => VIEW_BEER_BIKE,
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Whether more than `days` whole days separate `date` from `now`.
///
/// The millisecond delta is floor-divided into days, and the comparison is
/// strict: exactly `days` days old does not qualify.
pub fn older_than(days: i64, date: Timestamp, now: Timestamp) -> bool {
    let delta_ms = (now - date).num_milliseconds();
    delta_ms.div_euclid(MS_PER_DAY) > days
}

fn matches_search(transaction: &Transaction, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    if transaction.transaction_num.to_string().contains(&needle) {
        return true;
    }
    let Some(customer) = &transaction.customer else {
        return false;
    };
    [
        customer.full_name(),
        customer.email.clone(),
        customer.phone.clone(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Membership of one transaction in a parsed view.
pub fn passes_view(
    transaction: &Transaction,
    view: TransactionView,
    search: &str,
    now: Timestamp,
) -> bool {
    let f = &transaction.flags;
    let retrospec = transaction.is_retrospec();
    let created = transaction.date_created;

    match view {
        TransactionView::Retrospec => retrospec && !f.is_paid,
        TransactionView::Pickup => {
            !f.is_paid
                && f.is_completed
                && !f.is_refurb
                && !retrospec
                && older_than(PICKUP_AGE_DAYS, created, now)
        }
        TransactionView::Paid => f.is_paid,
        TransactionView::Completed => {
            let search = search.trim();
            f.is_completed && (search.is_empty() || matches_search(transaction, search))
        }
        TransactionView::Main => {
            (!retrospec
                && !f.is_completed
                && !f.is_refurb
                && (!f.is_employee || (f.is_employee && f.is_beer_bike)))
                || (retrospec && f.is_refurb && !f.is_completed && !f.is_waiting_on_email)
        }
        TransactionView::Employee => {
            f.is_employee && !f.is_completed && !f.is_beer_bike && !retrospec && !f.is_refurb
        }
        TransactionView::Refurb => f.is_refurb && !f.is_paid && !f.is_completed && !retrospec,
        TransactionView::BeerBike => {
            f.is_beer_bike && older_than(BEER_BIKE_AGE_DAYS, created, now)
        }
    }
}

/// Membership of one transaction in the view named `view`.
///
/// Unknown view names exclude the row.
pub fn passes_filter(transaction: &Transaction, view: &str, search: &str, now: Timestamp) -> bool {
    match TransactionView::from_str_value(view) {
        Ok(view) => passes_view(transaction, view, search, now),
        Err(_) => false,
    }
}

/// The rows of `transactions` visible in `view`, in their original order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    view: TransactionView,
    search: &str,
    now: Timestamp,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| passes_view(t, view, search, now))
        .collect()
}

// ---------------------------------------------------------------------------
// Retrospec status
// ---------------------------------------------------------------------------

/// Where a retrospec bike is in its refurbish-and-sell lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RetrospecStatus {
    Arrived,
    Building,
    Completed,
    ForSale,
}

impl RetrospecStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Arrived => "Arrived",
            Self::Building => "Building",
            Self::Completed => "Completed",
            Self::ForSale => "For Sale",
        }
    }
}

/// Derive a retrospec's status: refurb wins over waiting-on-email, which
/// wins over completed.
pub fn check_status_of_retrospec(flags: &TransactionFlags) -> RetrospecStatus {
    if flags.is_refurb {
        RetrospecStatus::Building
    } else if flags.is_waiting_on_email {
        RetrospecStatus::Completed
    } else if flags.is_completed {
        RetrospecStatus::ForSale
    } else {
        RetrospecStatus::Arrived
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
