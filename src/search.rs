//! Search strategies over a dictionary's backing store.
//!
//! Every strategy receives the store, an inclusive index range and a target
//! key, and reports where the key was found together with the number of key
//! comparisons it took. The comparison count is the cost metric the harness
//! aggregates, so each strategy counts exactly one operation per probe:
//!
//! - [`BinarySearch`]: one per halving step, even though a step may test the
//!   probe against the key twice.
//! - [`LinearSearch`]: one per scanned element.
//! - [`SelfOrganizingSearch`]: as linear, then a single swap toward the front
//!   of the range on a hit.
//!
//! An empty range is a caller bug and panics; [`crate::Dictionary::search`]
//! never builds one.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::Result;
use crate::Key;

/// Result of a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Index of the key in the store, `None` if it is not in the range.
    pub position: Option<usize>,
    /// Key comparisons performed. Never zero for a non-empty range.
    pub ops: usize,
}

impl SearchOutcome {
    #[inline]
    fn found(position: usize, ops: usize) -> Self {
        Self {
            position: Some(position),
            ops,
        }
    }

    #[inline]
    fn missing(ops: usize) -> Self {
        Self { position: None, ops }
    }

    /// Whether the key was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        self.position.is_some()
    }
}

/// A lookup algorithm over `table[range]`.
///
/// Implementations may reorder the elements inside `range` and must document
/// how. None may touch elements outside it.
pub trait SearchStrategy {
    /// Short identifier used in logs and benchmark ids.
    fn name(&self) -> &'static str;

    /// Look up `key` in `table[range]`.
    ///
    /// # Panics
    /// If `range` is empty or reaches past the end of `table`.
    fn search(&self, table: &mut [Key], range: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome>;
}

#[inline]
fn check_range(table: &[Key], range: &RangeInclusive<usize>) -> (usize, usize) {
    let (first, last) = (*range.start(), *range.end());
    assert!(first <= last, "empty search range {first}..={last}");
    assert!(last < table.len(), "search range {first}..={last} out of bounds ({})", table.len());
    (first, last)
}

// =============================================================================
// Binary search
// =============================================================================

/// Halving search. The range must already be sorted ascending; on an unsorted
/// range the answer is meaningless but the call is still memory safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl SearchStrategy for BinarySearch {
    fn name(&self) -> &'static str {
        "bin"
    }

    fn search(&self, table: &mut [Key], range: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome> {
        let (first, last) = check_range(table, &range);

        // Half-open [lo, hi) so that narrowing below index 0 cannot underflow.
        // The probe sequence is identical to mid = F + (L - F) / 2 with L = hi - 1.
        let mut lo = first;
        let mut hi = last + 1;
        let mut ops = 0;
        while lo < hi {
            ops += 1;
            let mid = lo + (hi - 1 - lo) / 2;
            let probe = table[mid];
            if probe == key {
                return Ok(SearchOutcome::found(mid, ops));
            } else if probe < key {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Ok(SearchOutcome::missing(ops))
    }
}

// =============================================================================
// Linear search
// =============================================================================

/// Left-to-right scan, stopping at the first match.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSearch;

#[inline]
fn scan(table: &[Key], first: usize, last: usize, key: Key) -> SearchOutcome {
    let mut ops = 0;
    for (i, &k) in table[first..=last].iter().enumerate() {
        ops += 1;
        if k == key {
            return SearchOutcome::found(first + i, ops);
        }
    }
    SearchOutcome::missing(ops)
}

impl SearchStrategy for LinearSearch {
    fn name(&self) -> &'static str {
        "lin"
    }

    fn search(&self, table: &mut [Key], range: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome> {
        let (first, last) = check_range(table, &range);
        Ok(scan(table, first, last, key))
    }
}

// =============================================================================
// Self-organizing linear search
// =============================================================================

/// Linear scan that moves every hit one slot toward the front of the range.
///
/// On a hit at index `i > first`, `table[i]` and `table[i - 1]` are swapped
/// and `i - 1` is reported. A hit at `first` leaves the table untouched. Keys
/// that are requested often drift to the front over repeated lookups, which
/// lowers the comparison count on skewed workloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfOrganizingSearch;

impl SearchStrategy for SelfOrganizingSearch {
    fn name(&self) -> &'static str {
        "lin-auto"
    }

    fn search(&self, table: &mut [Key], range: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome> {
        let (first, last) = check_range(table, &range);
        let mut outcome = scan(table, first, last, key);
        if let Some(i) = outcome.position {
            if i > first {
                table.swap(i - 1, i);
                outcome.position = Some(i - 1);
            }
        }
        Ok(outcome)
    }
}

// =============================================================================
// Selector
// =============================================================================

/// Runtime choice of search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// [`BinarySearch`]
    Binary,
    /// [`LinearSearch`]
    Linear,
    /// [`SelfOrganizingSearch`]
    SelfOrganizing,
}

impl Method {
    /// All strategies, in benchmark order.
    pub const ALL: [Method; 3] = [Method::Binary, Method::Linear, Method::SelfOrganizing];

    /// Whether the strategy gives correct answers only on a sorted store.
    pub fn requires_sorted(self) -> bool {
        matches!(self, Method::Binary)
    }
}

impl SearchStrategy for Method {
    fn name(&self) -> &'static str {
        match self {
            Method::Binary => BinarySearch.name(),
            Method::Linear => LinearSearch.name(),
            Method::SelfOrganizing => SelfOrganizingSearch.name(),
        }
    }

    #[inline]
    fn search(&self, table: &mut [Key], range: RangeInclusive<usize>, key: Key) -> Result<SearchOutcome> {
        match self {
            Method::Binary => BinarySearch.search(table, range, key),
            Method::Linear => LinearSearch.search(table, range, key),
            Method::SelfOrganizing => SelfOrganizingSearch.search(table, range, key),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bin" | "binary" => Ok(Method::Binary),
            "lin" | "linear" => Ok(Method::Linear),
            "lin-auto" | "self-organizing" => Ok(Method::SelfOrganizing),
            other => Err(format!("unknown search method `{other}` (expected bin, lin or lin-auto)")),
        }
    }
}
