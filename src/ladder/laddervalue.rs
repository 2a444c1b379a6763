use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

use rust_decimal::Decimal;

/// Numeric type a ladder can be built from.
///
/// Implemented for `f64` and for `Decimal`. Decimal ladders keep exact
/// arithmetic when the multiplier is divided by the base, so halfway points
/// of currency ladders are exact.
pub trait LadderValue:
    Copy
    + PartialOrd
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;

    fn one() -> Self;

    fn two() -> Self;

    fn ten() -> Self;

    fn abs(self) -> Self;

    fn is_finite(self) -> bool;

    /// `None` when the product overflows or a non-zero product underflows to zero.
    fn checked_mul(self, rhs: Self) -> Option<Self>;

    /// `None` when the quotient overflows or a non-zero quotient underflows to zero.
    fn checked_div(self, rhs: Self) -> Option<Self>;
}

fn representable<T: LadderValue>(lhs: T, result: T) -> Option<T> {
    if !result.is_finite() || (result == T::zero() && lhs != T::zero()) {
        None
    } else {
        Some(result)
    }
}

impl LadderValue for f64 {
    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn two() -> Self {
        2.0
    }

    fn ten() -> Self {
        10.0
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn checked_mul(self, rhs: Self) -> Option<Self> {
        representable(self, self * rhs)
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        representable(self, self / rhs)
    }
}

impl LadderValue for Decimal {
    fn zero() -> Self {
        Decimal::ZERO
    }

    fn one() -> Self {
        Decimal::ONE
    }

    fn two() -> Self {
        Decimal::TWO
    }

    fn ten() -> Self {
        Decimal::TEN
    }

    fn abs(self) -> Self {
        Decimal::abs(&self)
    }

    // Decimal 沒有 NaN / inf
    fn is_finite(self) -> bool {
        true
    }

    // 超出 scale 28 的結果會被捨入成 0
    fn checked_mul(self, rhs: Self) -> Option<Self> {
        Decimal::checked_mul(self, rhs).and_then(|result| representable(self, result))
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        Decimal::checked_div(self, rhs).and_then(|result| representable(self, result))
    }
}
