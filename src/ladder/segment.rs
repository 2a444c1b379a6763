use super::laddervalue::LadderValue;

/// One scaled copy of the decade: `decade[i] * multiplier`, with
/// `multiplier == base ^ index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<T> {
    multiplier: T,
    index: i64
}

impl<T: LadderValue> Segment<T> {
    pub fn multiplier(&self) -> T {
        self.multiplier
    }

    pub fn index(&self) -> i64 {
        self.index
    }

    /// Finds the segment with
    /// `decade[0] * multiplier <= amount < decade[0] * multiplier * base`.
    ///
    /// The search stops at the last segment whose bounds are representable
    /// in `T`: an amount past the top stays in the topmost segment, an amount
    /// below the bottom ends in the lowest segment, under its first step.
    /// `amount` must be positive, `first_step` positive and `base > 1`.
    pub fn locate(amount: T, first_step: T, base: T) -> Segment<T> {
        let mut multiplier = T::one();
        let mut index: i64 = 0;

        while first_step.checked_mul(multiplier).is_some_and(|lower| amount < lower) {
            match multiplier.checked_div(base) {
                Some(next) if first_step.checked_mul(next).is_some() => {
                    multiplier = next;
                    index -= 1;
                }
                _ => break
            }
        }

        // 與 bracket 的 sentinel 同樣以 (first_step * multiplier) * base 計算
        while let Some(upper) = upper_bound(first_step, multiplier, base) {
            if amount < upper {
                break;
            }
            match multiplier.checked_mul(base) {
                Some(next) => {
                    multiplier = next;
                    index += 1;
                }
                None => break
            }
        }

        tracing::trace!(%amount, %multiplier, index, "segment located");
        Segment { multiplier, index }
    }
}

fn upper_bound<T: LadderValue>(first_step: T, multiplier: T, base: T) -> Option<T> {
    first_step.checked_mul(multiplier).and_then(|lower| lower.checked_mul(base))
}

/// Pair of adjacent ladder steps around an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<T> {
    step_below: T,
    step_above: T,
    index: i64
}

impl<T: LadderValue> Bracket<T> {
    pub fn step_below(&self) -> T {
        self.step_below
    }

    pub fn step_above(&self) -> T {
        self.step_above
    }

    /// Global step index of `step_above`.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Scans the segment, closed by the first step of the next segment, for
    /// the first step `>= amount`. `amount` must lie inside `segment`, or
    /// below it when `segment` is the lowest representable one.
    ///
    /// Edge cases at the limits of `T`:
    /// - below the lowest segment the bracket is `(0, first step)`;
    /// - when the step above is not representable the bracket collapses onto
    ///   `step_below`, so every rounding saturates at the largest step.
    pub fn search(amount: T, decade: &[T], base: T, segment: &Segment<T>) -> Bracket<T> {
        let multiplier = segment.multiplier();
        let offset = segment.index() * decade.len() as i64;
        let scaled = |i: usize| -> Option<T> {
            if i < decade.len() {
                decade[i].checked_mul(multiplier)
            } else {
                upper_bound(decade[0], multiplier, base)
            }
        };

        let first = match scaled(0) {
            Some(first) if amount >= first => first,
            Some(first) => {
                return Bracket { step_below: T::zero(), step_above: first, index: offset };
            }
            None => {
                return Bracket { step_below: T::zero(), step_above: T::zero(), index: offset };
            }
        };

        let mut step_below = first;
        let mut i = 1;
        loop {
            match scaled(i) {
                Some(step) if i < decade.len() && amount > step => {
                    step_below = step;
                    i += 1;
                }
                Some(step) => {
                    return Bracket { step_below, step_above: step, index: offset + i as i64 };
                }
                None => {
                    return Bracket { step_below, step_above: step_below, index: offset + i as i64 - 1 };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;

    const DECADE: [f64; 4] = [10.0, 20.0, 40.0, 60.0];

    #[test]
    fn test_locate_base_segment() {
        let segment = Segment::locate(35.0, 10.0, 10.0);
        assert_eq!(segment.index(), 0);
        assert_eq!(segment.multiplier(), 1.0);
    }

    #[test]
    fn test_locate_lower_bound_is_closed() {
        let segment = Segment::locate(10.0, 10.0, 10.0);
        assert_eq!(segment.index(), 0);
        let segment = Segment::locate(100.0, 10.0, 10.0);
        assert_eq!(segment.index(), 1);
        assert_eq!(segment.multiplier(), 10.0);
    }

    #[test]
    fn test_locate_descends_below_base_segment() {
        let segment = Segment::locate(dec!(8), dec!(10), dec!(10));
        assert_eq!(segment.index(), -1);
        assert_eq!(segment.multiplier(), dec!(0.1));

        let segment = Segment::locate(dec!(0.05), dec!(10), dec!(10));
        assert_eq!(segment.index(), -3);
        assert_eq!(segment.multiplier(), dec!(0.001));
    }

    #[test]
    fn test_locate_ascends_far() {
        let segment = Segment::locate(dec!(1234567), dec!(10), dec!(10));
        assert_eq!(segment.index(), 5);
        assert_eq!(segment.multiplier(), dec!(100000));
    }

    #[test]
    fn test_bracket_inside_segment() {
        let segment = Segment::locate(30.0, 10.0, 10.0);
        let bracket = Bracket::search(30.0, &DECADE, 10.0, &segment);
        assert_eq!(bracket.step_below(), 20.0);
        assert_eq!(bracket.step_above(), 40.0);
        assert_eq!(bracket.index(), 2);
    }

    #[test]
    fn test_bracket_uses_next_segment_sentinel() {
        let segment = Segment::locate(80.0, 10.0, 10.0);
        let bracket = Bracket::search(80.0, &DECADE, 10.0, &segment);
        assert_eq!(bracket.step_below(), 60.0);
        assert_eq!(bracket.step_above(), 100.0);
        assert_eq!(bracket.index(), 4);
    }

    #[test]
    fn test_bracket_on_first_step() {
        let segment = Segment::locate(10.0, 10.0, 10.0);
        let bracket = Bracket::search(10.0, &DECADE, 10.0, &segment);
        assert_eq!(bracket.step_below(), 10.0);
        assert_eq!(bracket.step_above(), 20.0);
        assert_eq!(bracket.index(), 1);
    }

    #[test]
    fn test_bracket_global_index_below_base_segment() {
        let decade: Vec<Decimal> = DECADE.iter().map(|s| Decimal::try_from(*s).unwrap()).collect();
        let segment = Segment::locate(dec!(8), dec!(10), dec!(10));
        let bracket = Bracket::search(dec!(8), &decade, dec!(10), &segment);
        assert_eq!(bracket.step_below(), dec!(6));
        assert_eq!(bracket.step_above(), dec!(10));
        assert_eq!(bracket.index(), 0);
    }

    #[test]
    fn test_single_step_decade() {
        let segment = Segment::locate(dec!(150), dec!(10), dec!(10));
        let bracket = Bracket::search(dec!(150), &[dec!(10)], dec!(10), &segment);
        assert_eq!(bracket.step_below(), dec!(100));
        assert_eq!(bracket.step_above(), dec!(1000));
        assert_eq!(bracket.index(), 2);
    }

    #[test]
    fn test_locate_stops_at_top_decimal_segment() {
        let amount = dec!(50000000000000000000000000000);
        let segment = Segment::locate(amount, dec!(10), dec!(10));
        assert_eq!(segment.index(), 27);

        let bracket = Bracket::search(amount, &[dec!(10), dec!(20), dec!(50)], dec!(10), &segment);
        assert_eq!(bracket.step_below(), dec!(20000000000000000000000000000));
        assert_eq!(bracket.step_above(), amount);
        assert_eq!(bracket.index(), 83);
    }

    #[test]
    fn test_unrepresentable_step_above_collapses_bracket() {
        let segment = Segment::locate(Decimal::MAX, dec!(10), dec!(10));
        let bracket = Bracket::search(Decimal::MAX, &[dec!(10), dec!(20), dec!(50)], dec!(10), &segment);
        assert_eq!(bracket.step_below(), dec!(50000000000000000000000000000));
        assert_eq!(bracket.step_above(), bracket.step_below());
        assert_eq!(bracket.index(), 83);
    }

    #[test]
    fn test_locate_stops_at_lowest_decimal_segment() {
        let amount = Decimal::new(1, 28);
        let segment = Segment::locate(amount, dec!(10), dec!(10));
        assert_eq!(segment.index(), -28);
        assert_eq!(segment.multiplier(), Decimal::new(1, 28));

        let bracket = Bracket::search(amount, &[dec!(10), dec!(20), dec!(50)], dec!(10), &segment);
        assert_eq!(bracket.step_below(), Decimal::ZERO);
        assert_eq!(bracket.step_above(), Decimal::new(1, 27));
        assert_eq!(bracket.index(), -84);
    }

    #[test]
    fn test_locate_terminates_for_f64_extremes() {
        let segment = Segment::locate(f64::MAX, 10.0, 10.0);
        assert!(segment.multiplier().is_finite());
        assert!(10.0 * segment.multiplier() <= f64::MAX);

        let amount = 5e-324_f64;
        let segment = Segment::locate(amount, 10.0, 10.0);
        assert!(segment.multiplier() > 0.0);
        let bracket = Bracket::search(amount, &[10.0, 20.0, 50.0], 10.0, &segment);
        assert!(bracket.step_below() <= amount && amount <= bracket.step_above());
    }
}
