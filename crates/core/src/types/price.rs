//! Tax-inclusive pricing.
//!
//! Every product stores a base price and a GST percentage. The customer-facing
//! final price is always derived from those two values with [`final_price`];
//! it is never edited on its own.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Decimal places kept for stored base prices and GST percentages.
pub const PRICE_SCALE: u32 = 2;

/// Largest storable base price, `9999999999.99` (`NUMERIC(12, 2)`).
pub const MAX_BASE_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, PRICE_SCALE);

/// Largest storable GST percentage, `999.99` (`NUMERIC(5, 2)`).
pub const MAX_GST_PERCENTAGE: Decimal = Decimal::from_parts(99_999, 0, 0, false, PRICE_SCALE);

/// Why a base price or GST percentage cannot be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("base price must not be negative")]
    NegativeBasePrice,
    #[error("GST percentage must not be negative")]
    NegativeGst,
    #[error("base price must not exceed {MAX_BASE_PRICE}")]
    BasePriceOutOfRange,
    #[error("GST percentage must not exceed {MAX_GST_PERCENTAGE}")]
    GstOutOfRange,
}

/// Round a base price and GST percentage to the stored scale and check their
/// range.
///
/// Rounding is half away from zero, the same as a `NUMERIC` column, so the
/// final price derived from the returned pair is the one that matches the
/// stored row.
///
/// # Errors
///
/// Returns [`PriceError`] if either value is negative or above the storable
/// maximum.
pub fn normalize_prices(
    base_price: Decimal,
    gst_percentage: Decimal,
) -> Result<(Decimal, Decimal), PriceError> {
    if base_price < Decimal::ZERO {
        return Err(PriceError::NegativeBasePrice);
    }
    if gst_percentage < Decimal::ZERO {
        return Err(PriceError::NegativeGst);
    }

    let base_price = to_price_scale(base_price);
    let gst_percentage = to_price_scale(gst_percentage);
    if base_price > MAX_BASE_PRICE {
        return Err(PriceError::BasePriceOutOfRange);
    }
    if gst_percentage > MAX_GST_PERCENTAGE {
        return Err(PriceError::GstOutOfRange);
    }
    Ok((base_price, gst_percentage))
}

fn to_price_scale(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the tax-inclusive price: `base_price * (1 + gst_percentage / 100)`.
///
/// No rounding is applied; formatting for display is [`Price::display`]'s job.
/// Negative inputs are not rejected here, callers validate before persisting.
/// A result beyond the `Decimal` range saturates at [`Decimal::MAX`] (or
/// [`Decimal::MIN`]); inputs accepted by [`normalize_prices`] never get there.
///
/// # Example
///
/// ```
/// use larder_core::final_price;
/// use rust_decimal::Decimal;
///
/// assert_eq!(final_price(Decimal::from(100), Decimal::from(18)), Decimal::from(118));
/// assert_eq!(final_price(Decimal::from(50), Decimal::ZERO), Decimal::from(50));
/// ```
#[must_use]
pub fn final_price(base_price: Decimal, gst_percentage: Decimal) -> Decimal {
    checked_final_price(base_price, gst_percentage).unwrap_or_else(|| {
        let negative = base_price.is_sign_negative() != (gst_percentage < -Decimal::ONE_HUNDRED);
        if negative { Decimal::MIN } else { Decimal::MAX }
    })
}

/// [`final_price`], or `None` if the result does not fit in a `Decimal`.
#[must_use]
pub fn checked_final_price(base_price: Decimal, gst_percentage: Decimal) -> Option<Decimal> {
    base_price
        .checked_mul(gst_percentage)
        .and_then(|tax| tax.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|tax| base_price.checked_add(tax))
        .or_else(|| {
            let rate = gst_percentage.checked_div(Decimal::ONE_HUNDRED)?;
            base_price.checked_mul(Decimal::ONE.checked_add(rate)?)
        })
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the store's default currency.
    #[must_use]
    pub fn inr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::INR)
    }

    /// Format for display, rounded half-up to two decimals (e.g. `₹ 118.00`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{} {rounded:.2}", self.currency_code.symbol())
    }
}

/// ISO 4217 currency codes the catalog can be priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_final_price_with_gst() {
        assert_eq!(final_price(dec("100"), dec("18")), dec("118"));
    }

    #[test]
    fn test_final_price_zero_gst() {
        assert_eq!(final_price(dec("50"), Decimal::ZERO), dec("50"));
    }

    #[test]
    fn test_final_price_zero_base() {
        assert_eq!(final_price(Decimal::ZERO, dec("28")), Decimal::ZERO);
    }

    #[test]
    fn test_final_price_is_not_rounded() {
        // 33.33 * 1.05 = 34.9965
        assert_eq!(final_price(dec("33.33"), dec("5")), dec("34.9965"));
    }

    #[test]
    fn test_final_price_matches_additive_form_over_range() {
        let bases = ["0", "0.01", "1", "9.99", "100", "1234.56", "99999999.99"];
        let rates = ["0", "0.25", "2.5", "5", "12", "18", "28", "100"];

        for base in bases {
            for rate in rates {
                let (b, r) = (dec(base), dec(rate));
                let expected = b + b * r / dec("100");
                assert_eq!(final_price(b, r), expected, "base={base} gst={rate}");
                assert_eq!(
                    final_price(b, r),
                    b * (Decimal::ONE + r / dec("100")),
                    "base={base} gst={rate}"
                );
            }
        }
    }

    #[test]
    fn test_final_price_never_panics_on_huge_inputs() {
        let huge = Decimal::from_scientific("7e28").unwrap();
        assert_eq!(checked_final_price(huge, dec("18")), None);
        assert_eq!(final_price(huge, dec("18")), Decimal::MAX);
        assert_eq!(final_price(-huge, dec("18")), Decimal::MIN);
        assert_eq!(final_price(Decimal::MAX, Decimal::MAX), Decimal::MAX);
    }

    #[test]
    fn test_checked_final_price_survives_intermediate_overflow() {
        // base * gst overflows, base * 3 does not
        let base = Decimal::from_scientific("4e26").unwrap();
        assert_eq!(
            checked_final_price(base, dec("200")),
            Some(Decimal::from_scientific("1.2e27").unwrap())
        );
        let base = Decimal::from_scientific("1e28").unwrap();
        assert_eq!(
            checked_final_price(base, dec("18")),
            Some(Decimal::from_scientific("1.18e28").unwrap())
        );
    }

    #[test]
    fn test_storable_maximums() {
        assert_eq!(MAX_BASE_PRICE, dec("9999999999.99"));
        assert_eq!(MAX_GST_PERCENTAGE, dec("999.99"));
        let top = final_price(MAX_BASE_PRICE, MAX_GST_PERCENTAGE);
        assert_eq!(top, dec("109998999999.890001"));
        assert!(top.scale() <= 6);
    }

    #[test]
    fn test_normalize_prices_rounds_to_column_scale() {
        let (base, gst) = normalize_prices(dec("10.005"), dec("12.255")).unwrap();
        assert_eq!(base, dec("10.01"));
        assert_eq!(gst, dec("12.26"));
        assert_eq!(final_price(base, gst), dec("11.237226"));
    }

    #[test]
    fn test_normalize_prices_rejections() {
        assert_eq!(
            normalize_prices(dec("-0.01"), dec("5")),
            Err(PriceError::NegativeBasePrice)
        );
        assert_eq!(
            normalize_prices(dec("1"), dec("-5")),
            Err(PriceError::NegativeGst)
        );
        assert_eq!(
            normalize_prices(dec("10000000000"), dec("5")),
            Err(PriceError::BasePriceOutOfRange)
        );
        assert_eq!(
            normalize_prices(dec("9999999999.994"), dec("5")).map(|(b, _)| b),
            Ok(MAX_BASE_PRICE)
        );
        assert_eq!(
            normalize_prices(dec("1"), dec("1000")),
            Err(PriceError::GstOutOfRange)
        );
        assert_eq!(
            PriceError::BasePriceOutOfRange.to_string(),
            "base price must not exceed 9999999999.99"
        );
    }

    #[test]
    fn test_price_display_rounds_to_two_places() {
        assert_eq!(Price::inr(dec("34.9965")).display(), "₹ 35.00");
        assert_eq!(Price::inr(dec("118")).display(), "₹ 118.00");
        assert_eq!(
            Price::new(dec("2.345"), CurrencyCode::USD).display(),
            "$ 2.35"
        );
    }
}
