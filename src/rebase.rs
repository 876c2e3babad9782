//! Conversion of single day offsets between the hybrid and the proleptic
//! Gregorian calendar.
//!
//! Dates on or after 1582-10-15 have the same offset in both calendars. Dates
//! from `0001-01-01` up to the switch go through the pivot tables, anything
//! older is recomputed from its civil date.

use crate::calendar::{CalendarKind, GREGORIAN_START_DATE, JULIAN_END_DATE};
use crate::tables::{HYBRID_TO_PROLEPTIC, PROLEPTIC_TO_HYBRID};
use crate::RebaseResult;

/// Converts a hybrid-calendar day offset to the proleptic Gregorian offset of
/// the same calendar date.
///
/// # Errors
/// Returns `RebaseError::OutOfRange` if the result does not fit in `i32`, which
/// only happens for offsets millions of years before the common era.
pub fn to_proleptic_gregorian(hybrid_days: i32) -> RebaseResult<i32> {
    if hybrid_days < HYBRID_TO_PROLEPTIC.common_era_start() {
        hybrid_days_to_proleptic_days(hybrid_days)
    } else if hybrid_days < HYBRID_TO_PROLEPTIC.last_switch_day() {
        HYBRID_TO_PROLEPTIC.rebase(hybrid_days)
    } else {
        Ok(hybrid_days)
    }
}

/// Converts a proleptic Gregorian day offset to the hybrid-calendar offset of
/// the same calendar date.
///
/// Days between 1582-10-04 and 1582-10-15 do not exist in the hybrid calendar
/// and map to 1582-10-15.
///
/// # Errors
/// Returns `RebaseError::OutOfRange` if the result does not fit in `i32`.
pub fn to_hybrid(proleptic_days: i32) -> RebaseResult<i32> {
    if proleptic_days < PROLEPTIC_TO_HYBRID.common_era_start() {
        proleptic_days_to_hybrid_days(proleptic_days)
    } else if proleptic_days < PROLEPTIC_TO_HYBRID.last_switch_day() {
        PROLEPTIC_TO_HYBRID.rebase(proleptic_days)
    } else {
        Ok(proleptic_days)
    }
}

pub(crate) fn hybrid_days_to_proleptic_days(hybrid_days: i32) -> RebaseResult<i32> {
    let date = CalendarKind::Hybrid.date_from_days(hybrid_days)?;
    if !CalendarKind::ProlepticGregorian.is_valid_date(&date) {
        log::trace!("{date} does not exist in the proleptic Gregorian calendar, rolling forward");
    }
    CalendarKind::ProlepticGregorian.days_from_date(&date)
}

pub(crate) fn proleptic_days_to_hybrid_days(proleptic_days: i32) -> RebaseResult<i32> {
    let mut date = CalendarKind::ProlepticGregorian.date_from_days(proleptic_days)?;
    if JULIAN_END_DATE < date && date < GREGORIAN_START_DATE {
        date = GREGORIAN_START_DATE;
    }
    CalendarKind::Hybrid.days_from_date(&date)
}
