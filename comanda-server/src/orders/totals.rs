//! Money calculation for orders using rust_decimal
//!
//! All arithmetic runs on `Decimal` internally and converts to `f64`
//! for storage/serialization, rounded to 2 decimal places half-up.
//! The order total is always derived from the detail lines, never
//! taken from a client.

use rust_decimal::prelude::*;

use crate::db::models::OrderDetail;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Convert f64 to Decimal for calculation
///
/// Inputs are validated as finite at the API boundary. If NaN/Infinity
/// somehow reaches here, logs an error and returns ZERO instead of
/// corrupting a financial calculation.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // Values are bounded by MAX_PRICE × MAX_QUANTITY at the boundary,
        // far inside f64 range
        .unwrap_or(0.0)
}

/// Total of an order: Σ(quantity × price) over its detail lines.
///
/// Zero for an order with no lines; lines with quantity 0 or price 0
/// contribute 0.
pub fn order_total(details: &[OrderDetail]) -> f64 {
    let total: Decimal = details
        .iter()
        .map(|d| to_decimal(d.price) * Decimal::from(d.quantity))
        .sum();
    to_f64(total.max(Decimal::ZERO))
}

/// Change due at settlement: customer_paid - total, never negative
pub fn change_due(total: f64, customer_paid: f64) -> f64 {
    to_f64((to_decimal(customer_paid) - to_decimal(total)).max(Decimal::ZERO))
}

/// Check if payment covers the total (with 0.01 tolerance)
pub fn is_payment_sufficient(paid: f64, required: f64) -> bool {
    to_decimal(paid) >= to_decimal(required) - MONEY_TOLERANCE
}
