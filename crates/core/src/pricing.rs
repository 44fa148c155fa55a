//! Transaction cost computation.
//!
//! Amounts are plain `f64` dollars with no rounding; the shop has never
//! used integer cents and totals are displayed as computed.

use crate::models::detail::{ItemDetail, RepairDetail};
use crate::models::item::Item;
use crate::models::order_request::OrderRequest;
use crate::models::repair::Repair;
use crate::models::transaction::Transaction;

/// Markup applied to wholesale cost for staff part purchases.
pub const MECHANIC_PART_MULTIPLIER: f64 = 1.25;

/// Sales tax applied on top of the subtotal.
pub const SALES_TAX_MULTIPLIER: f64 = 1.0825;

// ---------------------------------------------------------------------------
// Priced lines
// ---------------------------------------------------------------------------

/// Anything billed at a flat price.
pub trait FlatPrice {
    fn flat_price(&self) -> f64;
}

impl FlatPrice for Repair {
    fn flat_price(&self) -> f64 {
        self.price
    }
}

impl FlatPrice for RepairDetail {
    fn flat_price(&self) -> f64 {
        self.repair.price
    }
}

/// A part with both a retail and a wholesale basis.
pub trait PartPrice {
    fn standard_price(&self) -> f64;
    fn wholesale_cost(&self) -> f64;
}

impl PartPrice for Item {
    fn standard_price(&self) -> f64 {
        self.standard_price
    }

    fn wholesale_cost(&self) -> f64 {
        self.wholesale_cost
    }
}

impl PartPrice for ItemDetail {
    fn standard_price(&self) -> f64 {
        self.item.standard_price
    }

    fn wholesale_cost(&self) -> f64 {
        self.item.wholesale_cost
    }
}

/// Order requests without an embedded item contribute nothing.
impl PartPrice for OrderRequest {
    fn standard_price(&self) -> f64 {
        self.item.as_ref().map_or(0.0, |i| i.standard_price)
    }

    fn wholesale_cost(&self) -> f64 {
        self.item.as_ref().map_or(0.0, |i| i.wholesale_cost)
    }
}

/// Price of one part under the staff/beer-bike rule.
///
/// Staff pay wholesale plus the mechanic markup, except on beer-bike
/// transactions, which always use the standard price.
pub fn part_price<P: PartPrice + ?Sized>(part: &P, is_employee: bool, is_beer_bike: bool) -> f64 {
    if is_employee && !is_beer_bike {
        part.wholesale_cost() * MECHANIC_PART_MULTIPLIER
    } else {
        part.standard_price()
    }
}

// ---------------------------------------------------------------------------
// Totals
// ---------------------------------------------------------------------------

/// Subtotal of repairs, attached parts and order-requested parts.
pub fn calculate_total_cost<R, P, O>(
    repairs: &[R],
    parts: &[P],
    order_requested_parts: &[O],
    is_employee: bool,
    is_beer_bike: bool,
) -> f64
where
    R: FlatPrice,
    P: PartPrice,
    O: PartPrice,
{
    let repair_total: f64 = repairs.iter().map(FlatPrice::flat_price).sum();
    let part_total: f64 = parts
        .iter()
        .map(|p| part_price(p, is_employee, is_beer_bike))
        .sum();
    let ordered_total: f64 = order_requested_parts
        .iter()
        .map(|p| part_price(p, is_employee, is_beer_bike))
        .sum();
    repair_total + part_total + ordered_total
}

/// Apply sales tax to a subtotal.
pub fn calculate_total_with_tax(subtotal: f64) -> f64 {
    subtotal * SALES_TAX_MULTIPLIER
}

/// Subtotal for a loaded transaction: its repair and item details plus the
/// order requests embedded on the transaction.
pub fn transaction_subtotal(
    transaction: &Transaction,
    repairs: &[RepairDetail],
    parts: &[ItemDetail],
) -> f64 {
    calculate_total_cost(
        repairs,
        parts,
        transaction.order_requests(),
        transaction.flags.is_employee,
        transaction.flags.is_beer_bike,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
