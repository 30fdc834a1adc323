//! Unmaterialized stepped integer ranges.
//!
//! [`IntRange`] is the one representation that cannot hold arbitrary
//! elements: it only describes `start`, `stop` and `step`. Any transformation
//! of a range-backed sequence has to materialize it into the configured
//! coercion target first.
//!
//! # Examples
//!
//! ```rust
//! use seqwise::IntRange;
//!
//! let range = IntRange::new(10, 0, -3).unwrap();
//! assert_eq!(range.iter().collect::<Vec<_>>(), vec![10, 7, 4, 1]);
//! assert_eq!(range.len(), 4);
//! assert!(range.contains(7));
//! assert_eq!(range.index_of(4), Some(2));
//!
//! // Equality is by produced elements.
//! assert_eq!(IntRange::new(0, 0, 1).unwrap(), IntRange::new(5, 2, 1).unwrap());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use crate::error::{Result, SeqError};

/// A half-open, stepped range of integers.
#[derive(Debug, Clone, Copy)]
pub struct IntRange {
    start: i64,
    stop: i64,
    step: i64,
}

impl IntRange {
    /// Creates a range from `start` (inclusive) to `stop` (exclusive).
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidConstructorArgument`] when `step` is zero.
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(SeqError::InvalidConstructorArgument(
                "range step must not be zero".to_owned(),
            ));
        }
        Ok(Self { start, stop, step })
    }

    /// The first element bound.
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// The exclusive end bound.
    pub const fn stop(&self) -> i64 {
        self.stop
    }

    /// The distance between consecutive elements.
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Number of elements the range produces.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        let (start, stop, step) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
        );
        let count = if step > 0 && start < stop {
            (stop - start - 1) / step + 1
        } else if step < 0 && start > stop {
            (start - stop - 1) / (-step) + 1
        } else {
            0
        };
        count as usize
    }

    /// Returns `true` if the range produces no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<i64> {
        (index < self.len()).then(|| self.value_at(index))
    }

    /// `start + position * step`, saturated to the `i64` bound in the
    /// step's direction. Every produced element lies strictly inside the
    /// bounds, so a saturated stop excludes nothing.
    fn value_at(&self, position: usize) -> i64 {
        let exact = i128::from(self.start) + position as i128 * i128::from(self.step);
        i64::try_from(exact).unwrap_or(if self.step > 0 { i64::MAX } else { i64::MIN })
    }

    /// Returns `true` if `value` is one of the produced elements.
    pub fn contains(&self, value: i64) -> bool {
        self.index_of(value).is_some()
    }

    /// Returns the position of `value` within the range.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn index_of(&self, value: i64) -> Option<usize> {
        let (start, stop, step, value) = (
            i128::from(self.start),
            i128::from(self.stop),
            i128::from(self.step),
            i128::from(value),
        );
        let within = if step > 0 {
            start <= value && value < stop
        } else {
            stop < value && value <= start
        };
        let offset = value - start;
        (within && offset % step == 0).then(|| (offset / step) as usize)
    }

    /// Returns the sub-range covering positions `from..to`, clamped to the
    /// range's length.
    pub fn slice(&self, from: usize, to: usize) -> Self {
        let length = self.len();
        let to = to.min(length);
        let from = from.min(to);
        Self {
            start: self.value_at(from),
            stop: self.value_at(to),
            step: self.step,
        }
    }

    /// Iterates over the produced elements.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            range: *self,
            front: 0,
            back: self.len(),
        }
    }
}

impl From<std::ops::Range<i64>> for IntRange {
    fn from(range: std::ops::Range<i64>) -> Self {
        Self {
            start: range.start,
            stop: range.end,
            step: 1,
        }
    }
}

impl PartialEq for IntRange {
    fn eq(&self, other: &Self) -> bool {
        let length = self.len();
        length == other.len()
            && (length == 0
                || (self.start == other.start && (length == 1 || self.step == other.step)))
    }
}

impl Eq for IntRange {}

impl Hash for IntRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let length = self.len();
        length.hash(state);
        if length > 0 {
            self.start.hash(state);
        }
        if length > 1 {
            self.step.hash(state);
        }
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(formatter, "range({}, {})", self.start, self.stop)
        } else {
            write!(formatter, "range({}, {}, {})", self.start, self.stop, self.step)
        }
    }
}

impl IntoIterator for IntRange {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Double-ended iterator over an [`IntRange`].
#[derive(Debug, Clone)]
pub struct RangeIter {
    range: IntRange,
    front: usize,
    back: usize,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let value = self.range.get(self.front);
        self.front += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for RangeIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.range.get(self.back)
    }
}

impl ExactSizeIterator for RangeIter {}

impl FusedIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 5, 1, 5)]
    #[case(1, 6, 1, 5)]
    #[case(0, 10, 3, 4)]
    #[case(5, 0, 1, 0)]
    #[case(5, 0, -1, 5)]
    #[case(0, 0, 1, 0)]
    fn test_len(#[case] start: i64, #[case] stop: i64, #[case] step: i64, #[case] expected: usize) {
        assert_eq!(IntRange::new(start, stop, step).unwrap().len(), expected);
    }

    #[test]
    fn test_zero_step_is_rejected() {
        assert!(matches!(
            IntRange::new(0, 5, 0),
            Err(SeqError::InvalidConstructorArgument(_))
        ));
    }

    #[test]
    fn test_reverse_iteration() {
        let range = IntRange::from(0..5);
        assert_eq!(range.iter().rev().collect::<Vec<_>>(), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_slice_stays_a_range() {
        let range = IntRange::new(0, 20, 2).unwrap();
        let slice = range.slice(1, 4);
        assert_eq!(slice.iter().collect::<Vec<_>>(), vec![2, 4, 6]);
        assert_eq!(range.slice(8, 100).iter().collect::<Vec<_>>(), vec![16, 18]);
        assert!(range.slice(5, 2).is_empty());
    }

    #[rstest]
    #[case(IntRange::new(i64::MAX - 1, i64::MAX, 2).unwrap(), vec![i64::MAX - 1])]
    #[case(IntRange::new(i64::MAX - 5, i64::MAX, 3).unwrap(), vec![i64::MAX - 5, i64::MAX - 2])]
    #[case(IntRange::new(i64::MIN + 1, i64::MIN, -2).unwrap(), vec![i64::MIN + 1])]
    fn test_slice_near_bounds_keeps_elements(#[case] range: IntRange, #[case] expected: Vec<i64>) {
        let whole = range.slice(0, usize::MAX);
        assert_eq!(whole.len(), expected.len());
        assert_eq!(whole.iter().collect::<Vec<_>>(), expected);
        assert_eq!(range.slice(0, 1).len(), 1);
    }

    #[test]
    fn test_get_near_bounds() {
        let range = IntRange::new(i64::MAX - 5, i64::MAX, 3).unwrap();
        assert_eq!(range.get(1), Some(i64::MAX - 2));
        assert_eq!(range.get(2), None);
    }

    #[test]
    fn test_index_of_respects_step() {
        let range = IntRange::new(1, 10, 2).unwrap();
        assert_eq!(range.index_of(5), Some(2));
        assert_eq!(range.index_of(4), None);
        assert_eq!(range.index_of(11), None);
    }

    #[test]
    fn test_equality_by_elements() {
        assert_eq!(IntRange::new(0, 1, 1).unwrap(), IntRange::new(0, 1, 7).unwrap());
        assert_ne!(IntRange::from(0..3), IntRange::from(1..4));
    }

    #[test]
    fn test_display() {
        assert_eq!(IntRange::from(0..5).to_string(), "range(0, 5)");
        assert_eq!(IntRange::new(5, 0, -2).unwrap().to_string(), "range(5, 0, -2)");
    }
}
