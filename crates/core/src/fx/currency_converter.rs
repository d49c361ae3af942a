//! Conversion of foreign amounts into the base currency.

use rust_decimal::Decimal;

use super::fx_model::{ConversionRequest, ConversionResult};
use crate::constants::{BASE_CURRENCY, DECIMAL_SCALE};
use crate::errors::{Error, Result};
use eurofx_market_data::RateRecord;

/// Divides `amount` by `rate` and rounds half-up to two fractional digits.
///
/// Rounding is applied once, to the exact quotient: the scaled quotient is
/// truncated and the remainder decides the last digit. A zero rate (or an
/// overflowing quotient) is an [`Error::Arithmetic`].
///
/// ```
/// use eurofx_core::fx::convert_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(convert_amount(dec!(100), dec!(0.92)).unwrap(), dec!(108.70));
/// ```
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    let overflow =
        || Error::Arithmetic(format!("cannot divide {} by exchange rate {}", amount, rate));

    if rate.is_zero() {
        return Err(overflow());
    }

    let negative = !amount.is_zero() && amount.is_sign_negative() != rate.is_sign_negative();
    let numerator = amount
        .abs()
        .checked_mul(Decimal::from(10u64.pow(DECIMAL_SCALE)))
        .ok_or_else(overflow)?;
    let divisor = rate.abs();

    // the division may round up to the next integer; the remainder corrects it
    let mut quotient = numerator.checked_div(divisor).ok_or_else(overflow)?.trunc();
    let mut remainder = numerator
        .checked_sub(quotient.checked_mul(divisor).ok_or_else(overflow)?)
        .ok_or_else(overflow)?;
    if remainder.is_sign_negative() && !remainder.is_zero() {
        quotient -= Decimal::ONE;
        remainder += divisor;
    } else if remainder >= divisor {
        quotient += Decimal::ONE;
        remainder -= divisor;
    }

    if remainder.checked_mul(Decimal::TWO).ok_or_else(overflow)? >= divisor {
        quotient += Decimal::ONE;
    }

    quotient.rescale(0);
    let mut converted = Decimal::try_from_i128_with_scale(quotient.mantissa(), DECIMAL_SCALE)
        .map_err(|_| overflow())?;
    if negative && !converted.is_zero() {
        converted.set_sign_negative(true);
    }
    Ok(converted)
}

/// Builds the conversion result for `request` using `rate`.
///
/// The target currency is always the base currency.
pub fn convert(request: &ConversionRequest, rate: &RateRecord) -> Result<ConversionResult> {
    let converted_amount = convert_amount(request.amount, rate.rate)?;

    Ok(ConversionResult {
        amount: request.amount,
        from_currency: request.from_currency.clone(),
        converted_amount,
        to_currency: BASE_CURRENCY.to_string(),
        exchange_rate: rate.rate,
        date: request.date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 9).unwrap()
    }

    #[test]
    fn test_convert_amount_rounds_half_up() {
        assert_eq!(convert_amount(dec!(100), dec!(0.92)).unwrap(), dec!(108.70));
        assert_eq!(
            convert_amount(dec!(10000), dec!(0.006164)).unwrap(),
            dec!(1622323.17)
        );
        // exact midpoint
        assert_eq!(convert_amount(dec!(0.125), dec!(1)).unwrap(), dec!(0.13));
        assert_eq!(convert_amount(dec!(0.124), dec!(1)).unwrap(), dec!(0.12));
        assert_eq!(convert_amount(dec!(1), dec!(8)).unwrap(), dec!(0.13));
        assert_eq!(convert_amount(dec!(-1), dec!(8)).unwrap(), dec!(-0.13));
    }

    #[test]
    fn test_rounds_the_exact_quotient_once() {
        // exact quotient is 0.00499..., just below the midpoint
        let amount = Decimal::from_str("0.0149999999999999999999999999").unwrap();
        assert_eq!(convert_amount(amount, dec!(3)).unwrap(), dec!(0.00));

        let amount = Decimal::from_str("0.015").unwrap();
        assert_eq!(convert_amount(amount, dec!(3)).unwrap(), dec!(0.01));
    }

    #[test]
    fn test_quotient_just_below_integer() {
        // 2 / 3 = 0.666..., rounds to 0.67
        assert_eq!(convert_amount(dec!(2), dec!(3)).unwrap(), dec!(0.67));
        assert_eq!(convert_amount(dec!(1), dec!(3)).unwrap(), dec!(0.33));
    }

    #[test]
    fn test_converted_amount_has_two_digits() {
        let converted = convert_amount(dec!(50), dec!(1)).unwrap();
        assert_eq!(converted.scale(), 2);
        assert_eq!(converted.to_string(), "50.00");
    }

    #[test]
    fn test_zero_rate_is_arithmetic_failure() {
        let err = convert_amount(dec!(100), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, Error::Arithmetic(_)));
    }

    #[test]
    fn test_convert_builds_result() {
        let request = ConversionRequest::new(dec!(100), "USD", day());
        let rate = RateRecord::new("USD", "US Dollar", day(), dec!(0.92));

        let result = convert(&request, &rate).unwrap();
        assert_eq!(result.amount, dec!(100));
        assert_eq!(result.from_currency, "USD");
        assert_eq!(result.converted_amount, dec!(108.70));
        assert_eq!(result.to_currency, "EUR");
        assert_eq!(result.exchange_rate, dec!(0.92));
        assert_eq!(result.date, day());
    }

    #[test]
    fn test_target_is_always_base() {
        let request = ConversionRequest::new(dec!(1), "GBP", day());
        let rate = RateRecord::new("GBP", "British Pound", day(), dec!(0.85));
        assert_eq!(convert(&request, &rate).unwrap().to_currency, "EUR");
    }
}
