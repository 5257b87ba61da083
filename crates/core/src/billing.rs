//! Money handling: checkout amounts, invoice numbering and BRL display.

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// ISO currency code sent to the payment provider.
pub const CHECKOUT_CURRENCY: &str = "brl";

/// Prefix of every generated invoice number.
pub const INVOICE_PREFIX: &str = "INV";

/// Number of project-id characters embedded in an invoice number.
const INVOICE_PROJECT_CHARS: usize = 8;

/// Convert a currency amount into the smallest currency unit.
///
/// Rounding is half away from zero, applied to the amount's shortest
/// decimal representation rather than its binary value, so `10.005`
/// yields `1001` even though `10.005 * 100.0` is `1000.4999…` in `f64`.
pub fn amount_cents(total_value: f64) -> Result<i64, CoreError> {
    if !total_value.is_finite() {
        return Err(CoreError::Validation(format!(
            "Amount must be a finite number, got {total_value}"
        )));
    }
    if total_value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "Amount must be positive, got {total_value}"
        )));
    }

    // `Display` for f64 never uses exponent notation and prints the
    // shortest string that round-trips.
    let repr = total_value.to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|thousandths| thousandths >= 5);

    let overflow = || CoreError::Validation(format!("Amount {total_value} is too large"));
    let whole: i64 = whole.parse().map_err(|_| overflow())?;
    let cents = whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
        .ok_or_else(overflow)?;

    if cents == 0 {
        return Err(CoreError::Validation(format!(
            "Amount {total_value} is below the smallest currency unit"
        )));
    }
    Ok(cents)
}

/// Build the invoice number for a settled payment:
/// `INV-{unix millis}-{first 8 chars of the project id, uppercased}`.
///
/// Numbers are unique per project per millisecond only. Checkout refuses a
/// project that already has a completed payment, so a second settlement in
/// the same millisecond requires two sessions paid concurrently; the store's
/// `uq_invoices_invoice_number` guard then refuses the later one as a
/// duplicate and its payment stays pending until the next poll.
pub fn invoice_number(project_id: DbId, issued_at: Timestamp) -> String {
    let project = project_id.simple().to_string();
    let suffix: String = project
        .chars()
        .take(INVOICE_PROJECT_CHARS)
        .collect::<String>()
        .to_uppercase();
    format!(
        "{INVOICE_PREFIX}-{}-{suffix}",
        issued_at.timestamp_millis()
    )
}

/// Format an amount as Brazilian reais, e.g. `R$ 1.234,56`.
pub fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {grouped},{:02}", cents % 100)
}
