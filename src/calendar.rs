//! Civil date arithmetic for the Julian, proleptic Gregorian and hybrid calendars.
//!
//! Day offsets count days since 1970-01-01. The conversions are closed-form
//! (era/day-of-era decomposition on a March-based year) so they hold no state
//! and are safe to call from any thread.

use crate::consts::{
    DAYS_PER_GREGORIAN_ERA, DAYS_PER_JULIAN_ERA, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_MARCH_ZERO_TO_EPOCH, GREGORIAN_START_DAY_OF_MONTH, JULIAN_END_DAY_OF_MONTH,
    JULIAN_MARCH_ZERO_TO_EPOCH, LAST_SWITCH_DAY, OCTOBER, SWITCH_YEAR,
};
use crate::prelude::*;
use crate::types::{is_gregorian_leap_year, is_julian_leap_year, CivilDate};
use crate::{RebaseError, RebaseResult};
use serde::{Deserialize, Serialize};

/// 1582-10-04, the last day the hybrid calendar counts with Julian rules.
pub const JULIAN_END_DATE: CivilDate =
    CivilDate::from_parts(SWITCH_YEAR, OCTOBER, JULIAN_END_DAY_OF_MONTH);

/// 1582-10-15, the first day the hybrid calendar counts with Gregorian rules.
pub const GREGORIAN_START_DATE: CivilDate =
    CivilDate::from_parts(SWITCH_YEAR, OCTOBER, GREGORIAN_START_DAY_OF_MONTH);

/// The calendar system a column's stored day offsets are counted in.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarKind {
    /// Julian rules before 1582-10-15, Gregorian rules from then on
    #[display(fmt = "hybrid")]
    Hybrid,
    /// Gregorian rules extended backwards indefinitely (ISO 8601)
    #[default]
    #[display(fmt = "proleptic-gregorian")]
    ProlepticGregorian,
}

impl CalendarKind {
    /// Day offset of `date` in this calendar.
    ///
    /// Dates that do not exist in this calendar resolve leniently: Julian
    /// `0100-02-29` read as proleptic Gregorian lands on `0100-03-01`, and the
    /// hybrid gap 1582-10-05..=1582-10-14 is counted with Julian rules.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the offset does not fit in `i32`.
    pub fn days_from_date(self, date: &CivilDate) -> RebaseResult<i32> {
        let days = self.rules_for_date(date).days_from_civil(date);
        i32::try_from(days).map_err(|_| RebaseError::OutOfRange { value: days })
    }

    /// Civil date of `days` in this calendar.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the year does not fit in `i32`
    /// (unreachable for `i32` offsets, kept so no component is truncated).
    pub fn date_from_days(self, days: i32) -> RebaseResult<CivilDate> {
        self.rules_for_days(days).civil_from_days(i64::from(days))
    }

    /// Parses `YYYY-MM-DD` and returns its day offset in this calendar.
    ///
    /// # Errors
    /// Returns `RebaseError::Parse` for malformed input and
    /// `RebaseError::OutOfRange` if the offset does not fit in `i32`.
    pub fn days_from_str(self, date: &str) -> RebaseResult<i32> {
        let date: CivilDate = date.parse()?;
        self.days_from_date(&date)
    }

    /// Formats `days` as `YYYY-MM-DD` in this calendar.
    ///
    /// # Errors
    /// See [`CalendarKind::date_from_days`].
    pub fn format_days(self, days: i32) -> RebaseResult<String> {
        Ok(self.date_from_days(days)?.to_string())
    }

    /// Whether `date` names a day that exists in this calendar.
    pub fn is_valid_date(self, date: &CivilDate) -> bool {
        if self == Self::Hybrid && JULIAN_END_DATE < *date && *date < GREGORIAN_START_DATE {
            return false;
        }
        if date.month() != FEBRUARY || date.day() != FEBRUARY_DAYS_LEAP {
            return true;
        }
        match self.rules_for_date(date) {
            CivilRules::Julian => is_julian_leap_year(date.year()),
            CivilRules::Gregorian => is_gregorian_leap_year(date.year()),
        }
    }

    const fn rules_for_days(self, days: i32) -> CivilRules {
        match self {
            Self::Hybrid if days < LAST_SWITCH_DAY => CivilRules::Julian,
            Self::Hybrid | Self::ProlepticGregorian => CivilRules::Gregorian,
        }
    }

    fn rules_for_date(self, date: &CivilDate) -> CivilRules {
        match self {
            Self::Hybrid if *date < GREGORIAN_START_DATE => CivilRules::Julian,
            Self::Hybrid | Self::ProlepticGregorian => CivilRules::Gregorian,
        }
    }
}

/// Leap-year rule used to count a single date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CivilRules {
    Julian,
    Gregorian,
}

impl CivilRules {
    /// Days in one era and the offset of era 0's March 1st from the epoch
    const fn era(self) -> (i64, i64) {
        match self {
            Self::Julian => (DAYS_PER_JULIAN_ERA, JULIAN_MARCH_ZERO_TO_EPOCH),
            Self::Gregorian => (DAYS_PER_GREGORIAN_ERA, GREGORIAN_MARCH_ZERO_TO_EPOCH),
        }
    }

    const fn years_per_era(self) -> i64 {
        match self {
            Self::Julian => 4,
            Self::Gregorian => 400,
        }
    }

    /// Days before `year_of_era` within an era (years start on March 1st)
    const fn days_before_year(self, year_of_era: i64) -> i64 {
        match self {
            Self::Julian => year_of_era * 365 + year_of_era / 4,
            Self::Gregorian => year_of_era * 365 + year_of_era / 4 - year_of_era / 100,
        }
    }

    fn days_from_civil(self, date: &CivilDate) -> i64 {
        let (era_days, epoch_shift) = self.era();
        let month = i64::from(date.month());
        let day = i64::from(date.day());

        let year = i64::from(date.year()) - i64::from(month <= 2);
        let era = year.div_euclid(self.years_per_era());
        let year_of_era = year.rem_euclid(self.years_per_era());
        let month_from_march = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * month_from_march + 2) / 5 + day - 1;
        let day_of_era = self.days_before_year(year_of_era) + day_of_year;

        era * era_days + day_of_era - epoch_shift
    }

    fn civil_from_days(self, days: i64) -> RebaseResult<CivilDate> {
        let (era_days, epoch_shift) = self.era();
        let shifted = days + epoch_shift;

        let era = shifted.div_euclid(era_days);
        let day_of_era = shifted.rem_euclid(era_days);
        let year_of_era = match self {
            Self::Julian => (day_of_era - day_of_era / 1460) / 365,
            Self::Gregorian => {
                (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365
            }
        };
        let day_of_year = day_of_era - self.days_before_year(year_of_era);
        let month_from_march = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * month_from_march + 2) / 5 + 1;
        let month = if month_from_march < 10 {
            month_from_march + 3
        } else {
            month_from_march - 9
        };
        let year = year_of_era + era * self.years_per_era() + i64::from(month <= 2);

        let out_of_range = |_| RebaseError::OutOfRange { value: days };
        let year = i32::try_from(year).map_err(out_of_range)?;
        let month = u8::try_from(month).map_err(out_of_range)?;
        let day = u8::try_from(day).map_err(out_of_range)?;
        Ok(CivilDate::from_ymd(year, month, day)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CivilDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_epoch_is_day_zero() {
        assert_eq!(CalendarKind::ProlepticGregorian.days_from_str("1970-01-01").unwrap(), 0);
        assert_eq!(CalendarKind::Hybrid.days_from_str("1970-01-01").unwrap(), 0);
        assert_eq!(
            CalendarKind::ProlepticGregorian.days_from_str("1969-12-31").unwrap(),
            -1
        );
    }

    #[test]
    fn test_common_era_start() {
        assert_eq!(
            CalendarKind::ProlepticGregorian.days_from_str("0001-01-01").unwrap(),
            -719_162
        );
        assert_eq!(CalendarKind::Hybrid.days_from_str("0001-01-01").unwrap(), -719_164);
    }

    #[test]
    fn test_switch_days() {
        let hybrid = CalendarKind::Hybrid;
        let proleptic = CalendarKind::ProlepticGregorian;

        assert_eq!(hybrid.days_from_date(&GREGORIAN_START_DATE).unwrap(), LAST_SWITCH_DAY);
        assert_eq!(proleptic.days_from_date(&GREGORIAN_START_DATE).unwrap(), LAST_SWITCH_DAY);
        // 1582-10-04 is the day right before the switch in the hybrid calendar
        assert_eq!(hybrid.days_from_date(&JULIAN_END_DATE).unwrap(), LAST_SWITCH_DAY - 1);
        assert_eq!(proleptic.days_from_date(&JULIAN_END_DATE).unwrap(), LAST_SWITCH_DAY - 11);
    }

    #[test]
    fn test_known_gregorian_offsets() {
        let proleptic = CalendarKind::ProlepticGregorian;
        assert_eq!(proleptic.days_from_str("2000-01-01").unwrap(), 10_957);
        assert_eq!(proleptic.days_from_str("2024-03-30").unwrap(), 19_812);
        assert_eq!(proleptic.days_from_str("0000-03-01").unwrap(), -719_468);
    }

    #[test]
    fn test_format_days() {
        let hybrid = CalendarKind::Hybrid;
        let proleptic = CalendarKind::ProlepticGregorian;

        assert_eq!(proleptic.format_days(0).unwrap(), "1970-01-01");
        assert_eq!(hybrid.format_days(LAST_SWITCH_DAY).unwrap(), "1582-10-15");
        assert_eq!(hybrid.format_days(LAST_SWITCH_DAY - 1).unwrap(), "1582-10-04");
        assert_eq!(proleptic.format_days(LAST_SWITCH_DAY - 1).unwrap(), "1582-10-14");
        assert_eq!(hybrid.format_days(-719_164).unwrap(), "0001-01-01");
        assert_eq!(hybrid.format_days(-719_165).unwrap(), "0000-12-31");
        assert_eq!(proleptic.format_days(-719_163).unwrap(), "0000-12-31");
    }

    #[test]
    fn test_date_round_trip_across_calendars() {
        for kind in [CalendarKind::Hybrid, CalendarKind::ProlepticGregorian] {
            for days in (-1_000_000..200_000).step_by(997) {
                let civil = kind.date_from_days(days).unwrap();
                assert_eq!(kind.days_from_date(&civil).unwrap(), days, "{kind} {civil}");
            }
        }
    }

    #[test]
    fn test_consecutive_days_are_consecutive_dates() {
        let hybrid = CalendarKind::Hybrid;
        let mut previous = hybrid.date_from_days(-800_000).unwrap();
        for days in -799_999..-100_000 {
            let current = hybrid.date_from_days(days).unwrap();
            assert!(previous < current, "{previous} !< {current}");
            previous = current;
        }
    }

    #[test]
    fn test_julian_leap_day_rolls_forward_in_gregorian() {
        let proleptic = CalendarKind::ProlepticGregorian;
        assert_eq!(
            proleptic.days_from_date(&date("0100-02-29")).unwrap(),
            proleptic.days_from_date(&date("0100-03-01")).unwrap()
        );
        assert_eq!(
            proleptic.days_from_date(&date("-0100-02-29")).unwrap(),
            proleptic.days_from_date(&date("-0100-03-01")).unwrap()
        );
    }

    #[test]
    fn test_is_valid_date() {
        let hybrid = CalendarKind::Hybrid;
        let proleptic = CalendarKind::ProlepticGregorian;

        assert!(hybrid.is_valid_date(&date("1500-02-29")));
        assert!(!proleptic.is_valid_date(&date("1500-02-29")));
        assert!(!hybrid.is_valid_date(&date("1700-02-29")));
        assert!(hybrid.is_valid_date(&date("1600-02-29")));

        assert!(proleptic.is_valid_date(&date("1582-10-10")));
        assert!(!hybrid.is_valid_date(&date("1582-10-05")));
        assert!(!hybrid.is_valid_date(&date("1582-10-14")));
        assert!(hybrid.is_valid_date(&JULIAN_END_DATE));
        assert!(hybrid.is_valid_date(&GREGORIAN_START_DATE));
    }

    #[test]
    fn test_extreme_offsets_do_not_panic() {
        for kind in [CalendarKind::Hybrid, CalendarKind::ProlepticGregorian] {
            let min = kind.date_from_days(i32::MIN).unwrap();
            let max = kind.date_from_days(i32::MAX).unwrap();
            assert_eq!(kind.days_from_date(&min).unwrap(), i32::MIN);
            assert_eq!(kind.days_from_date(&max).unwrap(), i32::MAX);
        }
    }

    #[test]
    fn test_days_from_str_parse_error() {
        assert!(matches!(
            CalendarKind::Hybrid.days_from_str("1582/10/15"),
            Err(RebaseError::Parse(_))
        ));
    }

    #[test]
    fn test_calendar_kind_display_and_serde() {
        assert_eq!(CalendarKind::Hybrid.to_string(), "hybrid");
        assert_eq!(CalendarKind::ProlepticGregorian.to_string(), "proleptic-gregorian");

        let json = serde_json::to_string(&CalendarKind::Hybrid).unwrap();
        assert_eq!(json, "\"hybrid\"");
        let parsed: CalendarKind = serde_json::from_str("\"proleptic-gregorian\"").unwrap();
        assert_eq!(parsed, CalendarKind::ProlepticGregorian);
        assert_eq!(CalendarKind::default(), CalendarKind::ProlepticGregorian);
    }
}
