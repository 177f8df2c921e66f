//! Single-bar recognizer predicates.
//!
//! Pure readers of the flags computed during derivation; no geometry is
//! recomputed at evaluation time.

use crate::bar::DerivedBar;

pub(crate) fn bullish(bar: &DerivedBar) -> bool {
    bar.is_bullish
}

pub(crate) fn bearish(bar: &DerivedBar) -> bool {
    bar.is_bearish
}

pub(crate) fn neutral(bar: &DerivedBar) -> bool {
    bar.is_neutral
}

pub(crate) fn marubozu(bar: &DerivedBar) -> bool {
    bar.is_marubozu
}

pub(crate) fn doji(bar: &DerivedBar) -> bool {
    bar.is_doji
}

pub(crate) fn dragonfly_doji(bar: &DerivedBar) -> bool {
    bar.is_dragonfly_doji
}

pub(crate) fn gravestone_doji(bar: &DerivedBar) -> bool {
    bar.is_gravestone_doji
}

pub(crate) fn hammer(bar: &DerivedBar) -> bool {
    bar.is_hammer
}

pub(crate) fn inverted_hammer(bar: &DerivedBar) -> bool {
    bar.is_inverted_hammer
}
