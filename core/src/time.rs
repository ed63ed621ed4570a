// Copyright (c) 2023 Mike Tsao. All rights reserved.

use float_cmp::approx_eq;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt::Display,
    ops::{Add, Mul, Sub},
};

/// Durations and offsets are measured in quarter lengths: a quarter note is
/// 1.0, a whole note 4.0.
pub type QuarterLength = f64;

/// A position within a piece, in [QuarterLength]s from the start of the piece.
///
/// f64 doesn't implement [Ord], and we need offsets as keys of sorted sets, so
/// [Offset] orders with [f64::total_cmp], after folding -0.0 into 0.0.
/// Constructors that accept user data (see [Offset::checked]) reject negative
/// and non-finite values, which keeps the total order identical to the
/// numeric one for every offset that reaches the engine.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Offset(pub QuarterLength);

impl Offset {
    pub const ZERO: Offset = Offset(0.0);

    /// Returns the offset if it's usable as a position in a piece. -0.0 comes
    /// back as 0.0.
    pub fn checked(value: QuarterLength) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Self(value + 0.0))
        } else {
            None
        }
    }

    pub fn value(&self) -> QuarterLength {
        self.0
    }

    /// True if the two offsets are the same point in time, allowing for the
    /// rounding that creeps in when grid points are computed as multiples of
    /// a step (0.1 * 3.0 != 0.3).
    pub fn coincides_with(&self, other: &Self) -> bool {
        approx_eq!(f64, self.0, other.0, epsilon = 1e-12, ulps = 4)
    }

    /// True if something at this offset has already happened by `other`.
    pub fn is_at_or_before(&self, other: &Self) -> bool {
        self.0 <= other.0 || self.coincides_with(other)
    }
}

impl Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
impl From<f64> for Offset {
    fn from(value: f64) -> Self {
        Offset(value)
    }
}
impl From<f32> for Offset {
    fn from(value: f32) -> Self {
        Offset(value as f64)
    }
}
impl From<usize> for Offset {
    fn from(value: usize) -> Self {
        Offset(value as f64)
    }
}
impl Add for Offset {
    type Output = Offset;
    fn add(self, rhs: Self) -> Self::Output {
        Offset(self.0 + rhs.0)
    }
}
impl Add<QuarterLength> for Offset {
    type Output = Offset;
    fn add(self, rhs: QuarterLength) -> Self::Output {
        Offset(self.0 + rhs)
    }
}
impl Sub for Offset {
    type Output = QuarterLength;
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}
impl Mul<QuarterLength> for Offset {
    type Output = Offset;
    fn mul(self, rhs: QuarterLength) -> Self::Output {
        Offset(self.0 * rhs)
    }
}
impl PartialEq for Offset {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Offset {}
impl PartialOrd for Offset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Offset {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.0 + 0.0).total_cmp(&(other.0 + 0.0))
    }
}
