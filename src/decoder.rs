//! Streaming value decoders and the hybrid calendar decorator.

use crate::batch::{transform, RebaseDirection};
use crate::RebaseError;

/// A decoder that fills caller-owned buffers from an encoded page.
pub trait ValueDecoder<T> {
    /// Encoded representation the decoder reads from
    type Input;
    type Error;

    /// Resets the decoder onto a new page.
    fn init(&mut self, input: Self::Input);

    /// Decodes the next `length` values into `values[offset..offset + length]`.
    ///
    /// # Errors
    /// Implementation defined, e.g. the page ran out of values.
    fn read(&mut self, values: &mut [T], offset: usize, length: usize) -> Result<(), Self::Error>;

    /// Discards the next `n` values.
    ///
    /// # Errors
    /// Implementation defined.
    fn skip(&mut self, n: usize) -> Result<(), Self::Error>;
}

/// Wraps a decoder of hybrid calendar DATE values so that it yields proleptic
/// Gregorian day offsets.
///
/// `init` and `skip` go straight to the wrapped decoder; `read` rebases exactly
/// the range the wrapped decoder filled.
#[derive(Debug, Clone)]
pub struct HybridCalendarDecoder<D> {
    delegate: D,
}

impl<D> HybridCalendarDecoder<D>
where
    D: ValueDecoder<i32>,
    D::Error: From<RebaseError>,
{
    pub const fn new(delegate: D) -> Self {
        Self { delegate }
    }
}

impl<D> HybridCalendarDecoder<D> {
    pub const fn get_ref(&self) -> &D {
        &self.delegate
    }

    pub fn into_inner(self) -> D {
        self.delegate
    }
}

impl<D> ValueDecoder<i32> for HybridCalendarDecoder<D>
where
    D: ValueDecoder<i32>,
    D::Error: From<RebaseError>,
{
    type Input = D::Input;
    type Error = D::Error;

    fn init(&mut self, input: Self::Input) {
        self.delegate.init(input);
    }

    fn read(&mut self, values: &mut [i32], offset: usize, length: usize) -> Result<(), Self::Error> {
        self.delegate.read(values, offset, length)?;
        transform(values, offset, length, RebaseDirection::ToProlepticGregorian)?;
        Ok(())
    }

    fn skip(&mut self, n: usize) -> Result<(), Self::Error> {
        self.delegate.skip(n)
    }
}

/// Wraps `delegate` when the column is stored in the hybrid calendar, so callers
/// can hold either decoder behind the same type.
pub fn date_decoder<D>(delegate: D, use_hybrid_calendar: bool) -> DateDecoder<D>
where
    D: ValueDecoder<i32>,
    D::Error: From<RebaseError>,
{
    if use_hybrid_calendar {
        DateDecoder::Hybrid(HybridCalendarDecoder::new(delegate))
    } else {
        DateDecoder::Plain(delegate)
    }
}

/// A DATE decoder with or without hybrid calendar rebasing.
#[derive(Debug, Clone)]
pub enum DateDecoder<D> {
    Plain(D),
    Hybrid(HybridCalendarDecoder<D>),
}

impl<D> ValueDecoder<i32> for DateDecoder<D>
where
    D: ValueDecoder<i32>,
    D::Error: From<RebaseError>,
{
    type Input = D::Input;
    type Error = D::Error;

    fn init(&mut self, input: Self::Input) {
        match self {
            Self::Plain(decoder) => decoder.init(input),
            Self::Hybrid(decoder) => decoder.init(input),
        }
    }

    fn read(&mut self, values: &mut [i32], offset: usize, length: usize) -> Result<(), Self::Error> {
        match self {
            Self::Plain(decoder) => decoder.read(values, offset, length),
            Self::Hybrid(decoder) => decoder.read(values, offset, length),
        }
    }

    fn skip(&mut self, n: usize) -> Result<(), Self::Error> {
        match self {
            Self::Plain(decoder) => decoder.skip(n),
            Self::Hybrid(decoder) => decoder.skip(n),
        }
    }
}
