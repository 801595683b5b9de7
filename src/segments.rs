//
// Copyright 2025 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

use std::fmt;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::result::{IntensityError, IntensityResult};

/// `IntensitySegments` stores a piecewise-constant intensity function over the integer line.
///
/// The function is kept as a sorted list of breakpoints `(position, value)`. A breakpoint means
/// "from this position up to the next breakpoint the intensity is `value`". Left of the first
/// breakpoint the intensity is 0. Adjacent breakpoints never carry the same value, so the
/// representation stays minimal no matter how ranges overlap.
///
/// # Examples
///
/// ```rust
/// use intensity_segments::IntensitySegments;
///
/// let mut segments = IntensitySegments::new();
///
/// segments.add(10..30, 1).unwrap();
/// segments.add(20..40, 1).unwrap();
/// assert_eq!(segments.to_string(), "[[10,1],[20,2],[30,1],[40,0]]");
///
/// segments.set(15..35, 5).unwrap();
/// assert_eq!(segments.to_string(), "[[10,1],[15,5],[35,1],[40,0]]");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct IntensitySegments {
    points: Vec<(i64, i64)>,
}

impl IntensitySegments {
    /// Creates an empty `IntensitySegments`. Its intensity is 0 everywhere.
    ///
    /// # Examples
    /// ```rust
    /// use intensity_segments::IntensitySegments;
    ///
    /// let segments = IntensitySegments::new();
    /// assert_eq!(segments.to_string(), "[]");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        IntensitySegments { points: Vec::new() }
    }

    /// Adds `amount` to the intensity of every position in `range`.
    ///
    /// Positions outside the half-open range keep their intensity. Breakpoints that become
    /// redundant are merged away. Adding zero leaves the segments untouched.
    ///
    /// # Arguments
    ///
    /// * `range` - A half-open interval `[from, to)` to adjust.
    /// * `amount` - The signed delta applied to each position.
    ///
    /// # Errors
    ///
    /// * `IntensityError::InvalidRange` if `range.start >= range.end`.
    /// * `IntensityError::Overflow` if any affected intensity would leave the `i64` domain.
    ///
    /// Either way the segments are left exactly as they were.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intensity_segments::IntensitySegments;
    ///
    /// let mut segments = IntensitySegments::new();
    /// segments.add(10..30, 1).unwrap();
    /// segments.add(10..40, -2).unwrap();
    /// assert_eq!(segments.to_string(), "[[10,-1],[30,-2],[40,0]]");
    /// assert!(segments.add(30..10, 1).is_err());
    /// ```
    pub fn add(&mut self, range: Range<i64>, amount: i64) -> IntensityResult<()> {
        Self::check_range(&range)?;
        if amount == 0 {
            return Ok(());
        }
        let Range { start: from, end: to } = range;

        let from_value = self.value_at(from);
        let to_value = self.value_at(to);
        let lo = self.lower_bound(from);
        let hi = self.lower_bound(to);

        // All sums are validated up front so an overflow never leaves a partial update behind.
        let new_from_value = from_value
            .checked_add(amount)
            .ok_or(IntensityError::Overflow { position: from })?;
        if let Some(&(position, _)) = self.points[lo..hi]
            .iter()
            .find(|&&(_, value)| value.checked_add(amount).is_none())
        {
            return Err(IntensityError::Overflow { position });
        }

        let mut to_idx = self.ensure_breakpoint(hi, to, to_value);
        if self.key_at(lo) == Some(from) {
            self.points[lo].1 = new_from_value;
        } else {
            self.points.insert(lo, (from, new_from_value));
            to_idx += 1;
        }

        for point in &mut self.points[lo + 1..to_idx] {
            point.1 += amount;
        }

        self.merge(lo.saturating_sub(1)..=to_idx + 1);
        trace!(from, to, amount, breakpoints = self.points.len(), "add applied");
        Ok(())
    }

    /// Sets the intensity of every position in `range` to exactly `amount`.
    ///
    /// Positions outside the half-open range keep their intensity. Setting the same range to
    /// the same amount twice in a row changes nothing the second time.
    ///
    /// # Errors
    ///
    /// * `IntensityError::InvalidRange` if `range.start >= range.end`. The segments are left
    ///   untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intensity_segments::IntensitySegments;
    ///
    /// let mut segments = IntensitySegments::new();
    /// segments.add(10..40, 1).unwrap();
    /// segments.set(20..30, 4).unwrap();
    /// assert_eq!(segments.to_string(), "[[10,1],[20,4],[30,1],[40,0]]");
    /// ```
    pub fn set(&mut self, range: Range<i64>, amount: i64) -> IntensityResult<()> {
        Self::check_range(&range)?;
        let Range { start: from, end: to } = range;

        let to_value = self.value_at(to);
        let lo = self.lower_bound(from);
        let hi = self.lower_bound(to);

        let mut to_idx = self.ensure_breakpoint(hi, to, to_value);
        if self.key_at(lo) == Some(from) {
            self.points[lo].1 = amount;
        } else {
            self.points.insert(lo, (from, amount));
            to_idx += 1;
        }

        // Everything strictly inside the range is now covered by the breakpoint at `from`.
        self.points.drain(lo + 1..to_idx);

        self.merge(lo.saturating_sub(1)..=lo + 2);
        trace!(from, to, amount, breakpoints = self.points.len(), "set applied");
        Ok(())
    }

    /// Returns the intensity at `position`.
    ///
    /// This is the value of the closest breakpoint at or left of `position`, or 0 when there
    /// is none.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intensity_segments::IntensitySegments;
    ///
    /// let mut segments = IntensitySegments::new();
    /// segments.add(10..30, 3).unwrap();
    ///
    /// assert_eq!(segments.value_at(9), 0);
    /// assert_eq!(segments.value_at(10), 3);
    /// assert_eq!(segments.value_at(29), 3);
    /// assert_eq!(segments.value_at(30), 0);
    /// ```
    #[must_use]
    pub fn value_at(&self, position: i64) -> i64 {
        let idx = self.points.partition_point(|&(key, _)| key <= position);
        if idx == 0 { 0 } else { self.points[idx - 1].1 }
    }

    /// Returns the number of stored breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no breakpoints are stored, i.e. the intensity is 0 everywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the stored breakpoints in increasing position order.
    #[must_use]
    pub fn breakpoints(&self) -> &[(i64, i64)] {
        &self.points
    }

    /// Returns an iterator over the `(position, value)` breakpoints in increasing position
    /// order.
    pub fn iter(&self) -> Breakpoints<'_> {
        Breakpoints {
            inner: self.points.iter(),
        }
    }

    fn check_range(range: &Range<i64>) -> IntensityResult<()> {
        if range.start >= range.end {
            debug!(from = range.start, to = range.end, "rejected empty or reversed range");
            return Err(IntensityError::InvalidRange {
                from: range.start,
                to: range.end,
            });
        }
        Ok(())
    }

    /// Index of the first breakpoint whose position is `>= position`.
    fn lower_bound(&self, position: i64) -> usize {
        self.points.partition_point(|&(key, _)| key < position)
    }

    fn key_at(&self, idx: usize) -> Option<i64> {
        self.points.get(idx).map(|&(key, _)| key)
    }

    /// Makes sure a breakpoint for `position` exists at `idx`, inserting one with `value` when
    /// absent. Returns its index.
    fn ensure_breakpoint(&mut self, idx: usize, position: i64, value: i64) -> usize {
        if self.key_at(idx) != Some(position) {
            self.points.insert(idx, (position, value));
        }
        idx
    }

    /// Removes breakpoints within `window` that repeat their left neighbour's value.
    ///
    /// Scans from the high end so removals never shift an index still to be visited. The
    /// window is clamped to the stored breakpoints.
    fn merge(&mut self, window: RangeInclusive<usize>) {
        let Some(last) = self.points.len().checked_sub(1) else {
            return;
        };
        let start = *window.start();
        let end = (*window.end()).min(last);
        let mut idx = end;
        while idx > start {
            if self.points[idx].1 == self.points[idx - 1].1 {
                self.points.remove(idx);
            }
            idx -= 1;
        }
    }
}

impl fmt::Display for IntensitySegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, (position, value)) in self.points.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "[{position},{value}]")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for IntensitySegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.points.iter().map(|(position, value)| (position, value)))
            .finish()
    }
}

impl TryFrom<Vec<(i64, i64)>> for IntensitySegments {
    type Error = IntensityError;

    /// Builds segments from an explicit breakpoint list.
    ///
    /// The list must already be minimal: positions strictly increasing and no two adjacent
    /// breakpoints with the same value.
    fn try_from(points: Vec<(i64, i64)>) -> IntensityResult<Self> {
        for pair in points.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if left.0 >= right.0 {
                return Err(IntensityError::malformed(format!(
                    "positions {} and {} are not strictly increasing",
                    left.0, right.0
                )));
            }
            if left.1 == right.1 {
                return Err(IntensityError::malformed(format!(
                    "adjacent breakpoints at {} and {} share value {}",
                    left.0, right.0, left.1
                )));
            }
        }
        Ok(IntensitySegments { points })
    }
}

impl From<IntensitySegments> for Vec<(i64, i64)> {
    fn from(segments: IntensitySegments) -> Self {
        segments.points
    }
}

impl FromStr for IntensitySegments {
    type Err = IntensityError;

    /// Parses the snapshot format produced by `Display`, e.g. `[[10,1],[30,0]]`.
    fn from_str(s: &str) -> IntensityResult<Self> {
        let points: Vec<(i64, i64)> =
            serde_json::from_str(s).map_err(|err| IntensityError::malformed(err.to_string()))?;
        Self::try_from(points)
    }
}

impl Serialize for IntensitySegments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.points)
    }
}

impl<'de> Deserialize<'de> for IntensitySegments {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<(i64, i64)>::deserialize(deserializer)?;
        Self::try_from(points).map_err(D::Error::custom)
    }
}

impl<'a> IntoIterator for &'a IntensitySegments {
    type Item = (i64, i64);
    type IntoIter = Breakpoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the stored breakpoints.
pub struct Breakpoints<'a> {
    inner: std::slice::Iter<'a, (i64, i64)>,
}

impl Iterator for Breakpoints<'_> {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Breakpoints<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Breakpoints<'_> {}
