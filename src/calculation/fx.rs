//! Currency conversion into the settlement currency.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{MissingRatePolicy, PayrollConfig};
use crate::error::{EngineError, EngineResult};

use super::round2;

/// Converts an amount into the policy's settlement currency.
///
/// A missing source currency, or one equal to the settlement currency,
/// returns the amount rounded to 2 decimals unchanged. Otherwise the
/// most recent exchange rate on or before `as_of` (the period end) is
/// applied. When no rate row exists, the behavior follows the policy's
/// [`MissingRatePolicy`]: convert 1:1, or fail with
/// `ExchangeRateNotFound`.
///
/// # Arguments
///
/// * `amount` - The amount in the source currency
/// * `source` - The source currency code, if it differs from settlement
/// * `config` - Reference data carrying rates and the policy
/// * `as_of` - Latest rate date considered, normally the period end
pub fn to_settlement_currency(
    amount: Decimal,
    source: Option<&str>,
    config: &PayrollConfig,
    as_of: NaiveDate,
) -> EngineResult<Decimal> {
    if amount.is_zero() {
        return Ok(round2(Decimal::ZERO));
    }

    let settlement = config.settlement_currency();
    let Some(source) = source else {
        return Ok(round2(amount));
    };
    if source == settlement {
        return Ok(round2(amount));
    }

    match config.exchange_rate(source, settlement, as_of) {
        Some(rate) => Ok(round2(amount * rate)),
        None => match config.policy().missing_rate_policy {
            MissingRatePolicy::FallbackIdentity => Ok(round2(amount)),
            MissingRatePolicy::Fail => Err(EngineError::ExchangeRateNotFound {
                base: source.to_string(),
                quote: settlement.to_string(),
                date: as_of,
            }),
        },
    }
}
