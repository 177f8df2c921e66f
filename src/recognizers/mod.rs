//! Pattern recognizers and the standard catalog.
//!
//! A [`Recognizer`] pairs a display name with one of two predicate shapes:
//! a single-bar flag reader or a fixed-size window predicate. Dispatch is a
//! tagged variant, so every recognizer carries a real predicate and there is
//! no placeholder default. The catalog is a declarative `const` table;
//! nothing is assembled or mutated at runtime.

mod multi_bar;
mod single_bar;

use crate::bar::DerivedBar;
use crate::{Direction, PatternMatch};

/// The two evaluation shapes a recognizer can take.
#[derive(Debug, Clone, Copy)]
pub enum Detection {
    /// Reads one precomputed flag off a single bar.
    Single(fn(&DerivedBar) -> bool),
    /// Evaluates a contiguous window of exactly `size` bars.
    Window {
        size: usize,
        predicate: fn(&[DerivedBar]) -> bool,
    },
}

/// A named pattern detector. Stateless, constructed once, immutable.
#[derive(Debug, Clone, Copy)]
pub struct Recognizer {
    name: &'static str,
    detection: Detection,
}

impl Recognizer {
    /// A single-bar recognizer (window size 1).
    pub const fn single(name: &'static str, predicate: fn(&DerivedBar) -> bool) -> Self {
        Self {
            name,
            detection: Detection::Single(predicate),
        }
    }

    /// A window recognizer over `size` consecutive bars.
    pub const fn window(
        name: &'static str,
        size: usize,
        predicate: fn(&[DerivedBar]) -> bool,
    ) -> Self {
        Self {
            name,
            detection: Detection::Window { size, predicate },
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of consecutive bars one evaluation consumes (1 for single-bar).
    #[inline]
    pub fn window_size(&self) -> usize {
        match self.detection {
            Detection::Single(_) => 1,
            Detection::Window { size, .. } => size,
        }
    }

    #[inline]
    pub fn detection(&self) -> Detection {
        self.detection
    }

    /// Scan a chronologically ordered series and collect every match, in
    /// series order.
    ///
    /// Single-bar recognizers take one pass over the bars. Window recognizers
    /// slide a stride-1 window of `size` bars across the series; a hit
    /// records the window's start index and length. A series shorter than the
    /// window (or empty) yields no matches; that is not an error.
    pub fn recognize(&self, bars: &[DerivedBar]) -> Vec<PatternMatch> {
        match self.detection {
            Detection::Single(predicate) => bars
                .iter()
                .enumerate()
                .filter(|&(_, bar)| predicate(bar))
                .map(|(index, bar)| PatternMatch {
                    start: index,
                    len: 1,
                    direction: Direction::of_bar(bar),
                })
                .collect(),
            Detection::Window { size, predicate } => {
                if size == 0 || bars.len() < size {
                    return Vec::new();
                }
                bars.windows(size)
                    .enumerate()
                    .filter(|&(_, window)| predicate(window))
                    .map(|(start, _)| PatternMatch {
                        start,
                        len: size,
                        direction: Direction::Neutral,
                    })
                    .collect()
            }
        }
    }
}

// ============================================================
// STANDARD CATALOG
// ============================================================

/// The standard recognizer catalog, in display/selection order.
pub const STANDARD: &[Recognizer] = &[
    Recognizer::single("Bullish", single_bar::bullish),
    Recognizer::single("Bearish", single_bar::bearish),
    Recognizer::single("Neutral", single_bar::neutral),
    Recognizer::single("Marubozu", single_bar::marubozu),
    Recognizer::single("Doji", single_bar::doji),
    Recognizer::single("DragonFly Doji", single_bar::dragonfly_doji),
    Recognizer::single("Gravestone Doji", single_bar::gravestone_doji),
    Recognizer::single("Hammer", single_bar::hammer),
    Recognizer::single("Inverted Hammer", single_bar::inverted_hammer),
    Recognizer::window("Peak", 3, multi_bar::peak),
];
