//! In-place rebasing of decoded or to-be-encoded day offset batches.

use crate::calendar::CalendarKind;
use crate::column::WriterIdentification;
use crate::prelude::*;
use crate::rebase::{to_hybrid, to_proleptic_gregorian};
use crate::{RebaseError, RebaseResult};

/// Which conversion a batch goes through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum RebaseDirection {
    /// Values are passed through untouched
    #[default]
    #[display(fmt = "identity")]
    Identity,
    /// Hybrid offsets are rewritten as proleptic Gregorian offsets
    #[display(fmt = "hybrid to proleptic Gregorian")]
    ToProlepticGregorian,
    /// Proleptic Gregorian offsets are rewritten as hybrid offsets
    #[display(fmt = "proleptic Gregorian to hybrid")]
    ToHybrid,
}

impl RebaseDirection {
    /// Conversion applied when reading a column stored in `calendar`.
    pub const fn reading(calendar: CalendarKind) -> Self {
        match calendar {
            CalendarKind::Hybrid => Self::ToProlepticGregorian,
            CalendarKind::ProlepticGregorian => Self::Identity,
        }
    }

    /// Conversion applied before encoding for a writer identified as `writer`.
    pub const fn writing(writer: WriterIdentification) -> Self {
        match writer {
            WriterIdentification::LegacyCompatible => Self::ToHybrid,
            WriterIdentification::Modern => Self::Identity,
        }
    }

    pub const fn is_identity(self) -> bool {
        matches!(self, Self::Identity)
    }

    /// Converts a single day offset.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the result does not fit in `i32`.
    #[inline]
    pub fn apply(self, days: i32) -> RebaseResult<i32> {
        match self {
            Self::Identity => Ok(days),
            Self::ToProlepticGregorian => to_proleptic_gregorian(days),
            Self::ToHybrid => to_hybrid(days),
        }
    }
}

/// An integer slot that carries a day offset.
///
/// Implemented for `i32` (DATE columns stored as 32-bit values) and `i64`
/// (long vectors shared with other integer columns).
pub trait DayValue: Copy {
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the value is not a valid `i32` offset.
    fn to_days(self) -> RebaseResult<i32>;

    fn from_days(days: i32) -> Self;
}

impl DayValue for i32 {
    #[inline]
    fn to_days(self) -> RebaseResult<i32> {
        Ok(self)
    }

    #[inline]
    fn from_days(days: i32) -> Self {
        days
    }
}

impl DayValue for i64 {
    #[inline]
    fn to_days(self) -> RebaseResult<i32> {
        i32::try_from(self).map_err(|_| RebaseError::OutOfRange { value: self })
    }

    #[inline]
    fn from_days(days: i32) -> Self {
        Self::from(days)
    }
}

/// Rebases `values[offset..offset + length]` in place.
///
/// The range is checked for every direction; `RebaseDirection::Identity` then
/// returns without touching the buffer. Elements outside the range are never
/// read or written.
///
/// # Errors
/// Returns `RebaseError::RangeOutOfBounds` (buffer unchanged) if the range does
/// not fit in `values`, and `RebaseError::InvalidValue` for the first element
/// that cannot be converted. Elements before it have already been rewritten,
/// so the batch must be discarded.
pub fn transform<T: DayValue>(
    values: &mut [T],
    offset: usize,
    length: usize,
    direction: RebaseDirection,
) -> RebaseResult<()> {
    let len = values.len();
    let range = offset
        .checked_add(length)
        .filter(|&end| end <= len)
        .map(|end| offset..end)
        .ok_or(RebaseError::RangeOutOfBounds {
            offset,
            length,
            len,
        })?;

    if direction.is_identity() {
        return Ok(());
    }

    for (index, value) in values[range].iter_mut().enumerate() {
        let converted = value
            .to_days()
            .and_then(|days| direction.apply(days))
            .map_err(|source| {
                log::warn!(
                    "Rebasing {direction} failed at index {}: {source}",
                    offset + index
                );
                RebaseError::InvalidValue {
                    index: offset + index,
                    source: Box::new(source),
                }
            })?;
        *value = T::from_days(converted);
    }
    Ok(())
}

/// Rebases every element of `values` in place.
///
/// # Errors
/// See [`transform`].
pub fn transform_all<T: DayValue>(values: &mut [T], direction: RebaseDirection) -> RebaseResult<()> {
    let len = values.len();
    transform(values, 0, len, direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LAST_SWITCH_DAY;

    fn hybrid_days(date: &str) -> i32 {
        CalendarKind::Hybrid.days_from_str(date).unwrap()
    }

    fn proleptic_days(date: &str) -> i32 {
        CalendarKind::ProlepticGregorian.days_from_str(date).unwrap()
    }

    #[test]
    fn test_direction_selection() {
        assert_eq!(
            RebaseDirection::reading(CalendarKind::Hybrid),
            RebaseDirection::ToProlepticGregorian
        );
        assert_eq!(
            RebaseDirection::reading(CalendarKind::ProlepticGregorian),
            RebaseDirection::Identity
        );
        assert_eq!(
            RebaseDirection::writing(WriterIdentification::LegacyCompatible),
            RebaseDirection::ToHybrid
        );
        assert_eq!(
            RebaseDirection::writing(WriterIdentification::Modern),
            RebaseDirection::Identity
        );
        assert!(RebaseDirection::default().is_identity());
    }

    #[test]
    fn test_identity_leaves_buffer_unchanged() {
        let original = vec![i32::MIN, -719_165, -500_000, LAST_SWITCH_DAY - 1, 0, i32::MAX];
        let mut values = original.clone();
        let len = values.len();
        transform(&mut values, 0, len, RebaseDirection::Identity).unwrap();
        assert_eq!(values, original);
    }

    #[test]
    fn test_identity_rejects_out_of_bounds_range() {
        let mut values = vec![1, 2];
        assert_eq!(
            transform(&mut values, 5, 5, RebaseDirection::Identity),
            Err(RebaseError::RangeOutOfBounds {
                offset: 5,
                length: 5,
                len: 2
            })
        );
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_transform_sub_range_only() {
        let sentinel = hybrid_days("1000-01-01");
        let mut values = vec![sentinel; 5];
        transform(&mut values, 1, 3, RebaseDirection::ToProlepticGregorian).unwrap();

        let converted = proleptic_days("1000-01-01");
        assert_eq!(values, vec![sentinel, converted, converted, converted, sentinel]);
    }

    #[test]
    fn test_transform_both_directions() {
        let dates = ["0001-01-01", "0500-02-28", "1582-10-04", "1582-10-15", "2024-03-30"];
        let hybrid: Vec<i32> = dates.iter().map(|d| hybrid_days(d)).collect();
        let proleptic: Vec<i32> = dates.iter().map(|d| proleptic_days(d)).collect();

        let mut values = hybrid.clone();
        transform_all(&mut values, RebaseDirection::ToProlepticGregorian).unwrap();
        assert_eq!(values, proleptic);

        transform_all(&mut values, RebaseDirection::ToHybrid).unwrap();
        assert_eq!(values, hybrid);
    }

    #[test]
    fn test_transform_i64_values() {
        let mut values = vec![i64::from(hybrid_days("1200-06-01")), 0];
        transform_all(&mut values, RebaseDirection::ToProlepticGregorian).unwrap();
        assert_eq!(values, vec![i64::from(proleptic_days("1200-06-01")), 0]);
    }

    #[test]
    fn test_transform_i64_rejects_values_outside_i32() {
        let mut values = vec![0_i64, i64::from(i32::MAX) + 1];
        let err = transform_all(&mut values, RebaseDirection::ToHybrid).unwrap_err();
        assert_eq!(
            err,
            RebaseError::InvalidValue {
                index: 1,
                source: Box::new(RebaseError::OutOfRange {
                    value: i64::from(i32::MAX) + 1
                }),
            }
        );
    }

    #[test]
    fn test_transform_extreme_values() {
        let mut values = vec![i32::MIN, i32::MAX];
        transform_all(&mut values, RebaseDirection::ToProlepticGregorian).unwrap();
        assert!(values[0] > i32::MIN);
        assert_eq!(values[1], i32::MAX);

        let mut values = vec![i32::MAX, i32::MIN];
        let err = transform_all(&mut values, RebaseDirection::ToHybrid).unwrap_err();
        assert!(matches!(err, RebaseError::InvalidValue { index: 1, .. }));
    }

    #[test]
    fn test_transform_rejects_out_of_bounds_range() {
        let original = vec![hybrid_days("1000-01-01"); 4];
        let mut values = original.clone();

        let err = transform(&mut values, 2, 3, RebaseDirection::ToProlepticGregorian).unwrap_err();
        assert_eq!(
            err,
            RebaseError::RangeOutOfBounds {
                offset: 2,
                length: 3,
                len: 4
            }
        );
        assert_eq!(values, original);

        let err =
            transform(&mut values, usize::MAX, 2, RebaseDirection::ToProlepticGregorian).unwrap_err();
        assert!(matches!(err, RebaseError::RangeOutOfBounds { .. }));
        assert_eq!(values, original);
    }

    #[test]
    fn test_transform_empty_range() {
        let mut values = vec![hybrid_days("1000-01-01")];
        let original = values.clone();
        transform(&mut values, 1, 0, RebaseDirection::ToProlepticGregorian).unwrap();
        assert_eq!(values, original);
    }

    #[test]
    fn test_apply_single_value() {
        assert_eq!(
            RebaseDirection::ToProlepticGregorian
                .apply(hybrid_days("1700-02-29"))
                .unwrap(),
            proleptic_days("1700-03-01")
        );
        assert_eq!(RebaseDirection::Identity.apply(42).unwrap(), 42);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(RebaseDirection::Identity.to_string(), "identity");
        assert_eq!(
            RebaseDirection::ToHybrid.to_string(),
            "proleptic Gregorian to hybrid"
        );
    }
}
