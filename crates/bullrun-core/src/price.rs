//! Daily price model.
//!
//! `close = max(0.01, round2(open * (1 + noise + effect)))` where
//! `noise = uniform(-1, 1) * volatility`. When the asset carries a scripted
//! effect today the noise is scaled by `effect_noise_damping` so the story
//! dominates. The intraday candle extends the high above `max(open, close)`
//! and the low below `min(open, close)` by up to `open * volatility *
//! wick_factor` each.
//!
//! Draw order per asset is fixed: noise, high wick, low wick.

use bullrun_types::Candle;
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, RoundingStrategy};
use rust_decimal::Decimal;

use crate::config::PriceConfig;

/// Lowest price any asset can close at.
pub const PRICE_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places prices are kept at.
const PRICE_SCALE: u32 = 2;

/// One asset's new close and candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceUpdate {
    /// New closing price.
    pub close: Decimal,
    /// Intraday candle (open is the previous close).
    pub candle: Candle,
}

/// Round to cents, half away from zero.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents and apply the price floor.
pub fn clamp_price(value: Decimal) -> Decimal {
    round_price(value).max(PRICE_FLOOR)
}

/// Out-of-range values saturate toward their sign; NaN maps to zero.
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        if value.is_nan() {
            Decimal::ZERO
        } else if value.is_sign_positive() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Compute one asset's next close and candle.
///
/// `effect` is the merged scripted effect for the day (0 for none).
pub fn update_price<R: Rng + ?Sized>(
    rng: &mut R,
    open: Decimal,
    volatility: f64,
    effect: f64,
    config: &PriceConfig,
) -> PriceUpdate {
    let volatility = if volatility.is_finite() {
        volatility.max(0.0)
    } else {
        0.0
    };
    let effect = if effect.is_finite() { effect } else { 0.0 };

    let mut noise = rng.random_range(-1.0..=1.0) * volatility;
    if effect.abs() > f64::EPSILON {
        noise *= config.effect_noise_damping;
    }

    let factor = to_decimal(1.0 + noise + effect);
    let close = clamp_price(open.saturating_mul(factor));

    let wick = open.saturating_mul(to_decimal(volatility * config.wick_factor));
    let high_extension = wick.saturating_mul(to_decimal(rng.random::<f64>()));
    let low_extension = wick.saturating_mul(to_decimal(rng.random::<f64>()));

    let high = round_price(open.max(close).saturating_add(high_extension));
    let low = clamp_price(open.min(close).saturating_sub(low_extension));

    PriceUpdate {
        close,
        candle: Candle {
            open,
            high,
            low,
            close,
        },
    }
}
