//! OHLC bar types and feature derivation.
//!
//! A [`RawBar`] is the price record supplied by the data collaborator. A
//! [`DerivedBar`] extends it with the geometric features and boolean pattern
//! flags that recognizers read. Derivation happens once, when a bar enters
//! the working set; recognizers never recompute geometry at evaluation time.
//!
//! Price arithmetic and threshold comparisons stay in [`Decimal`]; only the
//! two shadow ratios are computed in `f64`.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ============================================================
// CLASSIFICATION THRESHOLDS
// ============================================================

/// Body at or below this fraction of the range reads as a doji (non-strict
/// bound); the neutral flag uses the same bound strictly.
pub const SMALL_BODY_FACTOR: Decimal = dec!(0.05);
/// Body-to-range ratio at or above which a bar is a marubozu.
pub const MARUBOZU_BODY_RATIO: Decimal = dec!(0.95);
/// Minimum lower-shadow ratio for a dragonfly doji.
pub const DRAGONFLY_LOWER_MIN: f64 = 0.98;
/// Upper-shadow ratio ceiling for a dragonfly doji.
pub const DRAGONFLY_UPPER_MAX: f64 = 0.02;
/// Top tail beyond this fraction of the range turns a doji into a gravestone.
pub const GRAVESTONE_TAIL_FACTOR: Decimal = dec!(0.70);
/// Dominant-tail floor for the hammer family.
pub const LONG_TAIL_FACTOR: Decimal = dec!(0.6);
/// Opposite-tail ceiling for the hammer family.
pub const SHORT_TAIL_FACTOR: Decimal = dec!(0.1);

// ============================================================
// RAW BAR
// ============================================================

/// Bar aggregation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Day,
    Week,
    Month,
}

impl Interval {
    /// Human label for display controls.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Day => "Daily",
            Self::Week => "Weekly",
            Self::Month => "Monthly",
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A single OHLC price bar for one ticker and interval.
///
/// Invariants: `high >= max(open, close)` and `low <= min(open, close)`
/// (together implying `high >= low`). [`DerivedBar::derive`] rejects bars
/// that violate them. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub interval: Interval,
    pub ticker: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
}

impl RawBar {
    fn validate(&self) -> Result<()> {
        if self.high < self.low {
            return Err(Error::MalformedBar {
                reason: "high < low",
            });
        }
        if self.high < self.open.max(self.close) {
            return Err(Error::MalformedBar {
                reason: "high < max(open, close)",
            });
        }
        if self.low > self.open.min(self.close) {
            return Err(Error::MalformedBar {
                reason: "low > min(open, close)",
            });
        }
        Ok(())
    }
}

// ============================================================
// DERIVED BAR
// ============================================================

/// A bar with every geometric feature and pattern flag computed up front.
///
/// Pure value object: created once per [`RawBar`] by [`DerivedBar::derive`]
/// and never mutated. Recognizers only read these fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedBar {
    bar: RawBar,
    /// `high - low`, always >= 0.
    pub range: Decimal,
    /// `|close - open|`.
    pub body_range: Decimal,
    /// `max(open, close)`.
    pub top_price: Decimal,
    /// `min(open, close)`.
    pub bottom_price: Decimal,
    /// `high - top_price`, always >= 0.
    pub top_tail: Decimal,
    /// `bottom_price - low`, always >= 0.
    pub bottom_tail: Decimal,
    /// `(close - low) / (high - low)`; `None` for a zero-range bar.
    pub lower_shadow_ratio: Option<f64>,
    /// `(high - close) / (high - low)`; `None` for a zero-range bar.
    pub upper_shadow_ratio: Option<f64>,
    pub is_bullish: bool,
    pub is_bearish: bool,
    pub is_neutral: bool,
    pub is_doji: bool,
    pub is_marubozu: bool,
    pub is_dragonfly_doji: bool,
    pub is_gravestone_doji: bool,
    pub is_hammer: bool,
    pub is_inverted_hammer: bool,
}

impl DerivedBar {
    /// Derive the feature record for one bar.
    ///
    /// Total for every bar satisfying the [`RawBar`] invariants. A bar with
    /// `range == 0` has no tail or shadow structure, so every ratio-derived
    /// flag is false and both shadow ratios are `None` rather than a division
    /// error. The doji flag uses a non-strict bound where the neutral flag is
    /// strict; the two disagree when the body is exactly 5% of the range, and
    /// that asymmetry is intentional.
    pub fn derive(bar: RawBar) -> Result<Self> {
        bar.validate()?;

        let range = bar.high - bar.low;
        let body_range = (bar.close - bar.open).abs();
        let top_price = bar.open.max(bar.close);
        let bottom_price = bar.open.min(bar.close);
        let top_tail = bar.high - top_price;
        let bottom_tail = bottom_price - bar.low;

        let is_bullish = bar.close > bar.open;
        let is_bearish = bar.open > bar.close;

        let zero_range = range.is_zero();
        let (lower_shadow_ratio, upper_shadow_ratio) = if zero_range {
            (None, None)
        } else {
            (
                shadow_ratio(bar.close - bar.low, range),
                shadow_ratio(bar.high - bar.close, range),
            )
        };

        let is_neutral = !zero_range && body_range < SMALL_BODY_FACTOR * range;
        let is_doji = !zero_range && body_range <= SMALL_BODY_FACTOR * range;
        let is_marubozu = !zero_range && body_range / range >= MARUBOZU_BODY_RATIO;
        let is_dragonfly_doji = matches!(
            (lower_shadow_ratio, upper_shadow_ratio),
            (Some(lower), Some(upper)) if lower >= DRAGONFLY_LOWER_MIN && upper < DRAGONFLY_UPPER_MAX
        );
        let is_gravestone_doji = is_doji && top_tail > GRAVESTONE_TAIL_FACTOR * range;
        let is_hammer = !zero_range
            && bottom_tail > LONG_TAIL_FACTOR * range
            && top_tail < SHORT_TAIL_FACTOR * range;
        let is_inverted_hammer = !zero_range
            && top_tail > LONG_TAIL_FACTOR * range
            && bottom_tail < SHORT_TAIL_FACTOR * range;

        Ok(Self {
            bar,
            range,
            body_range,
            top_price,
            bottom_price,
            top_tail,
            bottom_tail,
            lower_shadow_ratio,
            upper_shadow_ratio,
            is_bullish,
            is_bearish,
            is_neutral,
            is_doji,
            is_marubozu,
            is_dragonfly_doji,
            is_gravestone_doji,
            is_hammer,
            is_inverted_hammer,
        })
    }

    /// The underlying raw bar.
    #[inline]
    pub fn raw(&self) -> &RawBar {
        &self.bar
    }

    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    #[inline]
    pub fn interval(&self) -> Interval {
        self.bar.interval
    }

    #[inline]
    pub fn ticker(&self) -> &str {
        &self.bar.ticker
    }

    #[inline]
    pub fn open(&self) -> Decimal {
        self.bar.open
    }

    #[inline]
    pub fn high(&self) -> Decimal {
        self.bar.high
    }

    #[inline]
    pub fn low(&self) -> Decimal {
        self.bar.low
    }

    #[inline]
    pub fn close(&self) -> Decimal {
        self.bar.close
    }
}

/// Shadow ratios drop to `f64`; price comparisons elsewhere stay in Decimal.
fn shadow_ratio(numerator: Decimal, denominator: Decimal) -> Option<f64> {
    let num = numerator.to_f64()?;
    let den = denominator.to_f64()?;
    (den != 0.0).then(|| num / den)
}

// ============================================================
// SERIES DERIVATION
// ============================================================

/// Result of deriving a whole series: the derived bars plus a report of any
/// input bars that were skipped as malformed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DerivedSeries {
    pub bars: Vec<DerivedBar>,
    pub skipped: Vec<SkippedBar>,
}

/// A bar dropped during series derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkippedBar {
    /// Position of the bar in the input sequence.
    pub index: usize,
    pub reason: &'static str,
}

/// Derive features for a chronologically ordered series.
///
/// A malformed bar is skipped and reported without aborting the rest of the
/// series; whether any skip is fatal is the caller's decision.
pub fn derive_series(bars: impl IntoIterator<Item = RawBar>) -> DerivedSeries {
    let mut series = DerivedSeries::default();
    for (index, bar) in bars.into_iter().enumerate() {
        match DerivedBar::derive(bar) {
            Ok(derived) => series.bars.push(derived),
            Err(Error::MalformedBar { reason }) => {
                series.skipped.push(SkippedBar { index, reason });
            }
        }
    }
    series
}

// ============================================================
// SLICE HELPERS FOR THE DISPLAY COLLABORATOR
// ============================================================

/// Inclusive `[begin, end]` date filter over a chronologically ordered slice.
///
/// An inverted range, or one containing no bars, yields an empty slice rather
/// than an error; how to present that is the collaborator's decision.
pub fn slice_by_date(bars: &[DerivedBar], begin: NaiveDate, end: NaiveDate) -> &[DerivedBar] {
    if begin > end {
        return &[];
    }
    let start = bars.partition_point(|bar| bar.date() < begin);
    let stop = bars.partition_point(|bar| bar.date() <= end);
    &bars[start..stop]
}

/// Close-to-close change across a slice (`last - first`); `None` when empty.
pub fn price_change(bars: &[DerivedBar]) -> Option<Decimal> {
    let first = bars.first()?;
    let last = bars.last()?;
    Some(last.close() - first.close())
}

/// `(lowest low, highest high)` over a slice, for chart axis limits.
pub fn price_bounds(bars: &[DerivedBar]) -> Option<(Decimal, Decimal)> {
    bars.iter().fold(None, |bounds, bar| match bounds {
        None => Some((bar.low(), bar.high())),
        Some((low, high)) => Some((low.min(bar.low()), high.max(bar.high()))),
    })
}

// ============================================================
// TESTS
// ============================================================
