/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for October
pub const OCTOBER: u8 = 10;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap; leap years follow the Julian or Gregorian rule)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in one full 400 year Gregorian cycle
pub(crate) const DAYS_PER_GREGORIAN_ERA: i64 = 146_097;
/// Days in one full 4 year Julian cycle
pub(crate) const DAYS_PER_JULIAN_ERA: i64 = 1_461;

/// Days from proleptic Gregorian 0000-03-01 to 1970-01-01
pub(crate) const GREGORIAN_MARCH_ZERO_TO_EPOCH: i64 = 719_468;
/// Days from Julian 0000-03-01 to 1970-01-01
pub(crate) const JULIAN_MARCH_ZERO_TO_EPOCH: i64 = 719_470;

/// Year of the Gregorian reform
pub const SWITCH_YEAR: i32 = 1582;
/// Last Julian date of the hybrid calendar: 1582-10-04
pub const JULIAN_END_DAY_OF_MONTH: u8 = 4;
/// First Gregorian date of the hybrid calendar: 1582-10-15
pub const GREGORIAN_START_DAY_OF_MONTH: u8 = 15;

/// Day offset of 1582-10-15. Identical in both calendars.
pub const LAST_SWITCH_DAY: i32 = -141_427;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
