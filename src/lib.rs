//! # Candlemark
//!
//! Candlestick pattern classification for OHLC price bars.
//!
//! Two pieces: feature derivation ([`bar::DerivedBar`]) computes each bar's
//! geometric features and boolean pattern flags once, at ingestion; a
//! [`Registry`] of named [`Recognizer`]s then tags the bars (or fixed-size
//! windows of bars) that match a pattern. The display collaborator feeds in
//! an ordered series and a date range, and consumes the resulting matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use candlemark::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let raw = RawBar {
//!     date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     interval: Interval::Day,
//!     ticker: "ACME".into(),
//!     open: dec!(10.0),
//!     high: dec!(10.5),
//!     low: dec!(9.8),
//!     close: dec!(10.0),
//! };
//!
//! let series = derive_series([raw]);
//! assert!(series.skipped.is_empty());
//!
//! let registry = Registry::standard();
//! let doji = registry.get("Doji").unwrap();
//! let matches = doji.recognize(&series.bars);
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].direction, Direction::Neutral);
//! ```

pub mod bar;
pub mod recognizers;

pub mod prelude {
    pub use crate::{
        bar::{
            derive_series, price_bounds, price_change, slice_by_date, DerivedBar, DerivedSeries,
            Interval, RawBar, SkippedBar,
        },
        recognizers::{Detection, Recognizer},
        scan_parallel, Direction, Error, PatternMatch, RecognizerMatches, Registry, Result,
        ScanResult,
    };
}

use bar::DerivedBar;
use recognizers::Recognizer;
use serde::{Deserialize, Serialize};

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from feature derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Bar geometry violates the OHLC invariants
    /// (`high >= max(open, close)`, `low <= min(open, close)`).
    #[error("malformed bar: {reason}")]
    MalformedBar { reason: &'static str },
}

// ============================================================
// MATCH RESULTS
// ============================================================

/// Candle color / directional verdict attached to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Neutral,
    Bearish,
}

impl Direction {
    #[inline]
    pub fn is_bullish(self) -> bool {
        matches!(self, Self::Bullish)
    }

    #[inline]
    pub fn is_bearish(self) -> bool {
        matches!(self, Self::Bearish)
    }

    /// Candle color of a single bar.
    pub fn of_bar(bar: &DerivedBar) -> Self {
        if bar.is_bullish {
            Self::Bullish
        } else if bar.is_bearish {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }
}

/// One recognizer hit: the span of bars it refers to plus the verdict the
/// display layer needs for rendering.
///
/// Single-bar matches have `len == 1` and carry the matched bar's candle
/// color. A window match records the window's start index and length and
/// carries [`Direction::Neutral`]; a consumer annotating a chart marks every
/// bar in the span ([`PatternMatch::bars`] hands it exactly that slice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    /// Index of the first matched bar in the scanned series.
    pub start: usize,
    /// Number of consecutive bars covered (the recognizer's window size).
    pub len: usize,
    pub direction: Direction,
}

impl PatternMatch {
    /// Index of the last covered bar (inclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len - 1
    }

    /// The matched bars out of the series that was scanned.
    pub fn bars<'a>(&self, series: &'a [DerivedBar]) -> &'a [DerivedBar] {
        &series[self.start..self.start + self.len]
    }
}

/// All matches from one recognizer over one series.
#[derive(Debug, Clone, Serialize)]
pub struct RecognizerMatches {
    pub name: &'static str,
    pub matches: Vec<PatternMatch>,
}

// ============================================================
// REGISTRY
// ============================================================

/// Ordered, immutable set of recognizers.
///
/// Order is display/selection order. Names are expected to be unique but not
/// enforced; [`Registry::get`] returns the first recognizer with the name.
#[derive(Debug, Clone)]
pub struct Registry {
    recognizers: Vec<Recognizer>,
}

impl Registry {
    /// The standard catalog ([`recognizers::STANDARD`]) in its fixed display
    /// order.
    pub fn standard() -> Self {
        Self {
            recognizers: recognizers::STANDARD.to_vec(),
        }
    }

    /// A registry over a custom recognizer list.
    pub fn new(recognizers: Vec<Recognizer>) -> Self {
        Self { recognizers }
    }

    /// Ordered `(name, window size)` pairs for populating a selection
    /// control. This is the only catalog surface the display collaborator
    /// needs beyond feed/consume.
    pub fn catalog(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.recognizers
            .iter()
            .map(|recognizer| (recognizer.name(), recognizer.window_size()))
    }

    pub fn get(&self, name: &str) -> Option<&Recognizer> {
        self.recognizers
            .iter()
            .find(|recognizer| recognizer.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recognizer> {
        self.recognizers.iter()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    /// Run every recognizer against the series, in registry order.
    ///
    /// Recognizers are independent: each one's matches never depend on what
    /// else is in the registry.
    pub fn scan(&self, bars: &[DerivedBar]) -> Vec<RecognizerMatches> {
        self.recognizers
            .iter()
            .map(|recognizer| RecognizerMatches {
                name: recognizer.name(),
                matches: recognizer.recognize(bars),
            })
            .collect()
    }
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Full-registry matches for one instrument.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub ticker: String,
    pub matches: Vec<RecognizerMatches>,
}

/// Scan several instruments' series in parallel.
///
/// Every evaluation reads only its own bars and mutates nothing, so this is
/// purely a throughput lever; results are identical to sequential
/// [`Registry::scan`] calls, in input order.
pub fn scan_parallel<'a, I>(registry: &Registry, instruments: I) -> Vec<ScanResult>
where
    I: IntoParallelIterator<Item = (&'a str, &'a [DerivedBar])>,
{
    instruments
        .into_par_iter()
        .map(|(ticker, bars)| ScanResult {
            ticker: ticker.to_string(),
            matches: registry.scan(bars),
        })
        .collect()
}

// ============================================================
// TESTS
// ============================================================
