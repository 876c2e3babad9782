//! Reader and writer glue for DATE columns.
//!
//! A file format decodes its DATE column into a buffer of day offsets and hands
//! it to [`DateColumnReader::on_batch_decoded`] before the batch reaches the
//! consumer; on the write side [`DateColumnWriter::on_before_encode`] runs right
//! before the encoder. Both decide from their configuration whether anything
//! needs to happen at all.

use crate::batch::{transform, DayValue, RebaseDirection};
use crate::calendar::CalendarKind;
use crate::prelude::*;
use crate::RebaseResult;
use serde::{Deserialize, Serialize};

/// Which engine generation a writer emulates.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WriterIdentification {
    /// Proleptic Gregorian day offsets, as current readers expect
    #[default]
    #[display(fmt = "modern")]
    Modern,
    /// Hybrid calendar day offsets, readable by legacy engines
    #[display(fmt = "legacy-compatible")]
    LegacyCompatible,
}

/// Read-side options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReaderOptions {
    use_hybrid_calendar: bool,
}

impl ReaderOptions {
    pub const fn new() -> Self {
        Self {
            use_hybrid_calendar: false,
        }
    }

    /// Treat stored DATE values as hybrid calendar offsets.
    #[must_use]
    pub const fn with_use_hybrid_calendar(mut self, use_hybrid_calendar: bool) -> Self {
        self.use_hybrid_calendar = use_hybrid_calendar;
        self
    }

    pub const fn use_hybrid_calendar(&self) -> bool {
        self.use_hybrid_calendar
    }

    pub const fn calendar_kind(&self) -> CalendarKind {
        if self.use_hybrid_calendar {
            CalendarKind::Hybrid
        } else {
            CalendarKind::ProlepticGregorian
        }
    }
}

/// Write-side options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WriterOptions {
    writer_identification: WriterIdentification,
}

impl WriterOptions {
    pub const fn new() -> Self {
        Self {
            writer_identification: WriterIdentification::Modern,
        }
    }

    #[must_use]
    pub const fn with_writer_identification(
        mut self,
        writer_identification: WriterIdentification,
    ) -> Self {
        self.writer_identification = writer_identification;
        self
    }

    pub const fn writer_identification(&self) -> WriterIdentification {
        self.writer_identification
    }
}

/// Post-decode hook for a DATE column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateColumnReader {
    calendar: CalendarKind,
    direction: RebaseDirection,
}

impl DateColumnReader {
    pub fn new(calendar: CalendarKind) -> Self {
        let direction = RebaseDirection::reading(calendar);
        log::debug!("DATE column reader for {calendar} values: {direction}");
        Self {
            calendar,
            direction,
        }
    }

    pub fn from_options(options: &ReaderOptions) -> Self {
        Self::new(options.calendar_kind())
    }

    pub const fn calendar(&self) -> CalendarKind {
        self.calendar
    }

    pub const fn direction(&self) -> RebaseDirection {
        self.direction
    }

    /// Rebases `buffer[offset..offset + length]` to proleptic Gregorian
    /// offsets if the column is stored in the hybrid calendar.
    ///
    /// # Errors
    /// See [`transform`].
    pub fn on_batch_decoded<T: DayValue>(
        &self,
        buffer: &mut [T],
        offset: usize,
        length: usize,
    ) -> RebaseResult<()> {
        transform(buffer, offset, length, self.direction)
    }
}

/// Pre-encode hook for a DATE column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateColumnWriter {
    writer_identification: WriterIdentification,
    direction: RebaseDirection,
}

impl DateColumnWriter {
    pub fn new(writer_identification: WriterIdentification) -> Self {
        let direction = RebaseDirection::writing(writer_identification);
        log::debug!("DATE column writer for {writer_identification} output: {direction}");
        Self {
            writer_identification,
            direction,
        }
    }

    pub fn from_options(options: &WriterOptions) -> Self {
        Self::new(options.writer_identification())
    }

    pub const fn writer_identification(&self) -> WriterIdentification {
        self.writer_identification
    }

    pub const fn direction(&self) -> RebaseDirection {
        self.direction
    }

    /// Converts one value the way `on_before_encode` would.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` if the value is not a valid offset or
    /// the converted offset does not fit in `i32`.
    pub fn transform_value<T: DayValue>(&self, value: T) -> RebaseResult<T> {
        if self.direction.is_identity() {
            return Ok(value);
        }
        Ok(T::from_days(self.direction.apply(value.to_days()?)?))
    }

    /// Rebases `buffer[offset..offset + length]` to hybrid offsets if the
    /// writer must stay readable by legacy engines.
    ///
    /// # Errors
    /// See [`transform`].
    pub fn on_before_encode<T: DayValue>(
        &self,
        buffer: &mut [T],
        offset: usize,
        length: usize,
    ) -> RebaseResult<()> {
        transform(buffer, offset, length, self.direction)
    }
}
