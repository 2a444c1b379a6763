use std::sync::Arc;

use super::laddererror::LadderError;
use super::laddervalue::LadderValue;
use super::segment::{
    Bracket,
    Segment
};
use super::tiebreaker::{
    self,
    TieBreakConvention,
    TieBreakFn,
    TieBreaker
};

/// Rounds non-negative numbers to the nearest step of a logarithmic ladder.
///
/// The ladder is one `decade` of ascending steps, repeated indefinitely in
/// both directions, each copy scaled by a further power of `base`.
/// A `Ladder` is immutable once built and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Ladder<T> {
    decade: Arc<[T]>,
    base: T,
    tie_breaker: TieBreaker<T>
}

impl<T: LadderValue> Ladder<T> {
    pub fn new(decade: Vec<T>, base: T, convention: TieBreakConvention) -> Result<Ladder<T>, LadderError> {
        Ladder::with_tie_breaker(decade, base, TieBreaker::new(convention))
    }

    /// Base 10 and banker's rounding.
    pub fn from_decade(decade: Vec<T>) -> Result<Ladder<T>, LadderError> {
        Ladder::new(decade, T::ten(), TieBreakConvention::BankersRounding)
    }

    pub fn with_tie_breaker(decade: Vec<T>, base: T, tie_breaker: TieBreaker<T>) -> Result<Ladder<T>, LadderError> {
        validate(&decade, base)?;
        tracing::debug!(
            steps = decade.len(),
            %base,
            convention = ?tie_breaker.convention(),
            "ladder constructed"
        );
        Ok(Ladder { decade: decade.into(), base, tie_breaker })
    }

    pub fn decade(&self) -> &[T] {
        &self.decade
    }

    pub fn base(&self) -> T {
        self.base
    }

    pub fn tie_breaker(&self) -> &TieBreaker<T> {
        &self.tie_breaker
    }

    /// Rounds to the nearest step, ties resolved by the bound tie breaker.
    pub fn round(&self, amount: T) -> T {
        self.search(amount, |amount, bracket| {
            self.tie_breaker.apply(amount, bracket.step_below(), bracket.step_above(), bracket.index())
        })
    }

    /// Largest step smaller than or equal to `amount`, zero below the lowest
    /// representable segment.
    pub fn floor(&self, amount: T) -> T {
        self.search_with(amount, tiebreaker::floor)
    }

    /// Smallest step larger than or equal to `amount`. Saturates at the
    /// largest representable step when no larger step fits in `T`.
    pub fn ceil(&self, amount: T) -> T {
        self.search_with(amount, tiebreaker::ceil)
    }

    /// The two adjacent steps around `amount`, `None` for zero and for
    /// amounts outside the ladder's domain.
    pub fn bracket(&self, amount: T) -> Option<Bracket<T>> {
        if amount == T::zero() || !in_domain(amount) {
            return None;
        }
        let segment = Segment::locate(amount, self.decade[0], self.base);
        Some(Bracket::search(amount, &self.decade, self.base, &segment))
    }

    /// The step at global position `index`: `decade[i]` of segment `k` sits
    /// at `k * decade.len() + i`, so `step(0)` is `decade[0]`.
    /// `None` when the step is not representable in `T`.
    pub fn step(&self, index: i64) -> Option<T> {
        let len = self.decade.len() as i64;
        // 首個 step 以上一個 segment 的 sentinel 方式計算，與 bracket 結果一致
        let (segment_index, local) = match index.rem_euclid(len) {
            0 => (index.div_euclid(len) - 1, self.decade.len()),
            local => (index.div_euclid(len), local as usize)
        };
        let multiplier = self.multiplier(segment_index)?;
        if local < self.decade.len() {
            self.decade[local].checked_mul(multiplier)
        } else {
            self.decade[0].checked_mul(multiplier)?.checked_mul(self.base)
        }
    }

    fn multiplier(&self, segment_index: i64) -> Option<T> {
        let mut multiplier = T::one();
        for _ in segment_index..0 {
            multiplier = multiplier.checked_div(self.base)?;
        }
        for _ in 0..segment_index {
            multiplier = multiplier.checked_mul(self.base)?;
        }
        Some(multiplier)
    }

    fn search_with(&self, amount: T, breaker: TieBreakFn<T>) -> T {
        self.search(amount, |amount, bracket| {
            breaker(amount, bracket.step_below(), bracket.step_above(), bracket.index())
        })
    }

    fn search<F>(&self, amount: T, pick: F) -> T
    where
        F: Fn(T, &Bracket<T>) -> T,
    {
        if amount == T::zero() {
            return T::zero();
        }
        if !in_domain(amount) {
            tracing::warn!(%amount, "amount outside the ladder domain, returning it unchanged");
            return amount;
        }
        let segment = Segment::locate(amount, self.decade[0], self.base);
        let bracket = Bracket::search(amount, &self.decade, self.base, &segment);
        pick(amount, &bracket)
    }
}

fn in_domain<T: LadderValue>(amount: T) -> bool {
    amount.is_finite() && amount > T::zero()
}

fn validate<T: LadderValue>(decade: &[T], base: T) -> Result<(), LadderError> {
    let (first, last) = match (decade.first(), decade.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(LadderError::EmptyDecade)
    };
    if !base.is_finite() || decade.iter().any(|step| !step.is_finite()) {
        return Err(LadderError::NonFinite);
    }
    if base <= T::zero() {
        return Err(LadderError::NonPositiveBase);
    }
    if let Some(index) = decade.iter().position(|step| *step <= T::zero()) {
        return Err(LadderError::NonPositiveStep { index });
    }
    if let Some(index) = (1..decade.len()).find(|&i| decade[i] <= decade[i - 1]) {
        return Err(LadderError::NotAscending { index });
    }
    // 否則相鄰兩個 segment 會重疊
    if last >= first * base {
        return Err(LadderError::SegmentOverlap);
    }
    Ok(())
}
