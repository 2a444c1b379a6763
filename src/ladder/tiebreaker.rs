use std::fmt;

use serde::{
    Serialize,
    Deserialize
};

use super::laddervalue::LadderValue;

// ─────────────────────────────────────────────────────────────────────────────
// tie-break 函式
// ─────────────────────────────────────────────────────────────────────────────
//
// 所有函式簽名一致：(amount, step_below, step_above, index) -> step
// step_below <= amount <= step_above，index 為 step_above 在整條 ladder 上的位置。

/// Always rounds towards minus infinity.
pub fn floor<T: LadderValue>(amount: T, step_below: T, step_above: T, _index: i64) -> T {
    if amount == step_above {
        step_above
    } else {
        step_below
    }
}

/// Always rounds towards plus infinity.
pub fn ceil<T: LadderValue>(amount: T, step_below: T, step_above: T, _index: i64) -> T {
    if amount == step_below {
        step_below
    } else {
        step_above
    }
}

/// Nearest step, ties go to `step_above`.
pub fn half_up<T: LadderValue>(amount: T, step_below: T, step_above: T, _index: i64) -> T {
    if (amount - step_below).abs() < (amount - step_above).abs() {
        step_below
    } else {
        step_above
    }
}

/// Nearest step. An amount exactly halfway goes down when the global index of
/// `step_above` is even and up when it is odd, so the bias alternates across
/// the whole ladder and not only inside one segment.
pub fn bankers_rounding<T: LadderValue>(amount: T, step_below: T, step_above: T, index: i64) -> T {
    let halfway = (step_below + step_above) / T::two();
    if amount < halfway {
        step_below
    } else if amount > halfway {
        step_above
    } else if index.rem_euclid(2) == 0 {
        step_below
    } else {
        step_above
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum TieBreakConvention {
    Floor,
    Ceil,
    HalfUp,
    #[default]
    BankersRounding,
    #[serde(skip)]
    Custom
}

pub type TieBreakFn<T> = fn(T, T, T, i64) -> T;

#[derive(Clone, Copy)]
pub struct TieBreaker<T> {
    convention: TieBreakConvention,
    breaker: TieBreakFn<T>
}

impl<T: LadderValue> TieBreaker<T> {
    /// `Custom` has no built-in function: it is rejected with a warning and
    /// replaced by `BankersRounding`. Bind an arbitrary function with
    /// [`TieBreaker::custom`].
    pub fn new(convention: TieBreakConvention) -> TieBreaker<T> {
        let breaker: TieBreakFn<T> = match convention {
            TieBreakConvention::Floor => floor,
            TieBreakConvention::Ceil => ceil,
            TieBreakConvention::HalfUp => half_up,
            TieBreakConvention::BankersRounding => bankers_rounding,
            TieBreakConvention::Custom => {
                tracing::warn!("Custom convention has no built-in tie breaker, using BankersRounding");
                bankers_rounding
            }
        };
        let convention = match convention {
            TieBreakConvention::Custom => TieBreakConvention::BankersRounding,
            other => other
        };
        TieBreaker { convention, breaker }
    }

    pub fn custom(breaker: TieBreakFn<T>) -> TieBreaker<T> {
        TieBreaker { convention: TieBreakConvention::Custom, breaker }
    }

    pub fn convention(&self) -> TieBreakConvention {
        self.convention
    }

    pub fn apply(&self, amount: T, step_below: T, step_above: T, index: i64) -> T {
        (self.breaker)(amount, step_below, step_above, index)
    }
}

impl<T: LadderValue> Default for TieBreaker<T> {
    fn default() -> Self {
        TieBreaker::new(TieBreakConvention::BankersRounding)
    }
}

impl<T> fmt::Debug for TieBreaker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieBreaker")
            .field("convention", &self.convention)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_keeps_exact_upper_step() {
        assert_eq!(floor(20.0, 17.0, 20.0, 5), 20.0);
        assert_eq!(floor(19.9, 17.0, 20.0, 5), 17.0);
    }

    #[test]
    fn test_ceil_keeps_exact_lower_step() {
        assert_eq!(ceil(17.0, 17.0, 20.0, 5), 17.0);
        assert_eq!(ceil(17.1, 17.0, 20.0, 5), 20.0);
    }

    #[test]
    fn test_half_up_tie_goes_up() {
        assert_eq!(half_up(15.0, 10.0, 20.0, 2), 20.0);
        assert_eq!(half_up(14.0, 10.0, 20.0, 2), 10.0);
        assert_eq!(half_up(16.0, 10.0, 20.0, 2), 20.0);
    }

    #[test]
    fn test_bankers_rounding_uses_index_parity() {
        assert_eq!(bankers_rounding(15.0, 10.0, 20.0, 2), 10.0);
        assert_eq!(bankers_rounding(15.0, 10.0, 20.0, 3), 20.0);
        assert_eq!(bankers_rounding(15.0, 10.0, 20.0, -2), 10.0);
        assert_eq!(bankers_rounding(15.0, 10.0, 20.0, -3), 20.0);
        assert_eq!(bankers_rounding(14.0, 10.0, 20.0, 3), 10.0);
        assert_eq!(bankers_rounding(16.0, 10.0, 20.0, 2), 20.0);
    }

    #[test]
    fn test_tie_breaker_from_convention() {
        let breaker: TieBreaker<f64> = TieBreaker::new(TieBreakConvention::HalfUp);
        assert_eq!(breaker.convention(), TieBreakConvention::HalfUp);
        assert_eq!(breaker.apply(15.0, 10.0, 20.0, 2), 20.0);
    }

    #[test]
    fn test_custom_tie_breaker() {
        fn always_below(_amount: f64, step_below: f64, _step_above: f64, _index: i64) -> f64 {
            step_below
        }
        let breaker = TieBreaker::custom(always_below);
        assert_eq!(breaker.convention(), TieBreakConvention::Custom);
        assert_eq!(breaker.apply(19.0, 10.0, 20.0, 1), 10.0);
    }

    #[test]
    fn test_custom_convention_without_function_falls_back() {
        let breaker: TieBreaker<f64> = TieBreaker::new(TieBreakConvention::Custom);
        assert_eq!(breaker.convention(), TieBreakConvention::BankersRounding);
        assert_eq!(breaker.apply(15.0, 10.0, 20.0, 2), 10.0);
        assert_eq!(breaker.apply(15.0, 10.0, 20.0, 3), 20.0);
    }

    #[test]
    fn test_convention_deserialize() {
        let convention: TieBreakConvention = serde_json::from_str("\"HalfUp\"").unwrap();
        assert_eq!(convention, TieBreakConvention::HalfUp);
        assert!(serde_json::from_str::<TieBreakConvention>("\"Custom\"").is_err());
    }
}
