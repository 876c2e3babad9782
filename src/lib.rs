//! Rebasing of DATE day offsets between the hybrid Julian/Gregorian calendar
//! and the proleptic Gregorian calendar.
//!
//! Older engines store DATE values as days since 1970-01-01 counted in the
//! hybrid calendar (Julian rules before 1582-10-15); current engines count in
//! the proleptic Gregorian calendar. The two agree from 1582-10-15 on and drift
//! apart by up to ten days before that.
//!
//! ```
//! use calendar_rebase::{to_hybrid, to_proleptic_gregorian, CalendarKind};
//!
//! let hybrid = CalendarKind::Hybrid.days_from_str("1000-01-01")?;
//! let proleptic = CalendarKind::ProlepticGregorian.days_from_str("1000-01-01")?;
//!
//! assert_eq!(to_proleptic_gregorian(hybrid)?, proleptic);
//! assert_eq!(to_hybrid(proleptic)?, hybrid);
//! # Ok::<(), calendar_rebase::RebaseError>(())
//! ```

mod batch;
mod block;
mod calendar;
mod column;
mod consts;
mod decoder;
mod prelude;
mod rebase;
mod tables;
mod types;

pub use batch::{transform, transform_all, DayValue, RebaseDirection};
pub use block::{create_value_adjuster, ColumnType, DateValueAdjuster, IntBlock, IntBlockBuilder};
pub use calendar::{CalendarKind, GREGORIAN_START_DATE, JULIAN_END_DATE};
pub use column::{
    DateColumnReader, DateColumnWriter, ReaderOptions, WriterIdentification, WriterOptions,
};
pub use consts::*;
pub use decoder::{date_decoder, DateDecoder, HybridCalendarDecoder, ValueDecoder};
pub use rebase::{to_hybrid, to_proleptic_gregorian};
pub use tables::{RebaseTable, TableError, HYBRID_TO_PROLEPTIC, PROLEPTIC_TO_HYBRID};
pub use types::{is_gregorian_leap_year, is_julian_leap_year, CivilDate, Day, Month};

use crate::prelude::*;

/// Result alias used throughout the crate.
pub type RebaseResult<T> = Result<T, RebaseError>;

/// Errors from parsing a `YYYY-MM-DD` date.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidDay { month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Error type for rebasing operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RebaseError {
    /// A day offset that does not fit in, or did not come from, an `i32`.
    #[error("Day offset {value} is outside the supported range")]
    OutOfRange { value: i64 },

    /// The requested batch range does not fit in the buffer.
    #[error("Range of {length} values at offset {offset} exceeds buffer of {len} values")]
    RangeOutOfBounds {
        offset: usize,
        length: usize,
        len: usize,
    },

    /// A batch element failed to convert.
    #[error("Cannot rebase value at index {index}")]
    InvalidValue {
        index: usize,
        #[source]
        source: Box<RebaseError>,
    },

    /// A date string could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
