//! Pivot tables for rebasing day offsets between the hybrid and the proleptic
//! Gregorian calendar.
//!
//! Each table maps brackets of source-calendar day offsets to the number of days
//! to add. The Julian calendar gains a day on the Gregorian one at every century
//! year not divisible by 400, which is why the diffs step roughly once per
//! hundred years.
//! <https://en.wikipedia.org/wiki/Proleptic_Gregorian_calendar#Difference_between_Julian_and_proleptic_Gregorian_calendar_dates>

use crate::{RebaseError, RebaseResult};

const HYBRID_TO_PROLEPTIC_SWITCH_DAYS: [i32; 14] = [
    -719_164, -682_945, -646_420, -609_895, -536_845, -500_320, -463_795, -390_745, -354_220,
    -317_695, -244_645, -208_120, -171_595, -141_427,
];
const HYBRID_TO_PROLEPTIC_DIFFS: [i32; 14] = [2, 1, 0, -1, -2, -3, -4, -5, -6, -7, -8, -9, -10, 0];

// Ten extra brackets before 1582-10-15 collapse the proleptic days of the
// hybrid gap (1582-10-05..=1582-10-14) onto the hybrid day of 1582-10-15.
const PROLEPTIC_TO_HYBRID_SWITCH_DAYS: [i32; 23] = [
    -719_162, -682_944, -646_420, -609_896, -536_847, -500_323, -463_799, -390_750, -354_226,
    -317_702, -244_653, -208_129, -171_605, -141_436, -141_435, -141_434, -141_433, -141_432,
    -141_431, -141_430, -141_429, -141_428, -141_427,
];
const PROLEPTIC_TO_HYBRID_DIFFS: [i32; 23] = [
    -2, -1, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// Hybrid day offsets to proleptic Gregorian day offsets.
pub static HYBRID_TO_PROLEPTIC: RebaseTable<'static> =
    RebaseTable::checked(&HYBRID_TO_PROLEPTIC_SWITCH_DAYS, &HYBRID_TO_PROLEPTIC_DIFFS);

/// Proleptic Gregorian day offsets to hybrid day offsets.
pub static PROLEPTIC_TO_HYBRID: RebaseTable<'static> =
    RebaseTable::checked(&PROLEPTIC_TO_HYBRID_SWITCH_DAYS, &PROLEPTIC_TO_HYBRID_DIFFS);

/// Error type for malformed rebase tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table has no brackets.
    #[error("Rebase table is empty")]
    Empty,

    /// Switch days and diffs differ in length.
    #[error("Rebase table has {switch_days} switch days but {diffs} diffs")]
    LengthMismatch { switch_days: usize, diffs: usize },

    /// `switch_days[index]` is not greater than its predecessor.
    #[error("Rebase table switch days are not strictly ascending at index {index}")]
    NotAscending { index: usize },
}

/// Ordered brackets of source-calendar day offsets and the diff applied in each.
///
/// The first switch day is the source calendar's offset of `0001-01-01`, the
/// last one the offset of `1582-10-15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebaseTable<'a> {
    switch_days: &'a [i32],
    diffs: &'a [i32],
}

impl<'a> RebaseTable<'a> {
    /// Creates a table, validating its shape.
    ///
    /// # Errors
    /// Returns `TableError` if the table is empty, the slices differ in length
    /// or the switch days are not strictly ascending.
    pub const fn try_new(switch_days: &'a [i32], diffs: &'a [i32]) -> Result<Self, TableError> {
        match Self::validate(switch_days, diffs) {
            Ok(()) => Ok(Self { switch_days, diffs }),
            Err(err) => Err(err),
        }
    }

    /// Creates a table that is known to be valid. In a `static` initializer an
    /// invalid table fails compilation.
    const fn checked(switch_days: &'a [i32], diffs: &'a [i32]) -> Self {
        match Self::validate(switch_days, diffs) {
            Ok(()) => Self { switch_days, diffs },
            Err(TableError::Empty) => panic!("rebase table is empty"),
            Err(TableError::LengthMismatch { .. }) => panic!("rebase table lengths differ"),
            Err(TableError::NotAscending { .. }) => panic!("rebase table is not ascending"),
        }
    }

    const fn validate(switch_days: &[i32], diffs: &[i32]) -> Result<(), TableError> {
        if switch_days.is_empty() {
            return Err(TableError::Empty);
        }
        if switch_days.len() != diffs.len() {
            return Err(TableError::LengthMismatch {
                switch_days: switch_days.len(),
                diffs: diffs.len(),
            });
        }
        let mut index = 1;
        while index < switch_days.len() {
            if switch_days[index] <= switch_days[index - 1] {
                return Err(TableError::NotAscending { index });
            }
            index += 1;
        }
        Ok(())
    }

    /// Source-calendar offset of `0001-01-01`
    pub const fn common_era_start(&self) -> i32 {
        self.switch_days[0]
    }

    /// Source-calendar offset of `1582-10-15`
    pub const fn last_switch_day(&self) -> i32 {
        self.switch_days[self.switch_days.len() - 1]
    }

    pub const fn switch_days(&self) -> &'a [i32] {
        self.switch_days
    }

    pub const fn diffs(&self) -> &'a [i32] {
        self.diffs
    }

    /// Number of brackets
    pub const fn len(&self) -> usize {
        self.switch_days.len()
    }

    /// Always false: empty tables are rejected on construction.
    pub const fn is_empty(&self) -> bool {
        self.switch_days.is_empty()
    }

    /// Adds the diff of the bracket `days` falls in.
    ///
    /// Scans from the last bracket backwards, since most stored dates are
    /// recent. Days before the first switch day use the first bracket.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the sum overflows `i32`.
    pub fn rebase(&self, days: i32) -> RebaseResult<i32> {
        let mut index = self.switch_days.len() - 1;
        while index > 0 && days < self.switch_days[index] {
            index -= 1;
        }
        days.checked_add(self.diffs[index])
            .ok_or(RebaseError::OutOfRange {
                value: i64::from(days) + i64::from(self.diffs[index]),
            })
    }
}
