//! Whole-block adjustment for readers that materialize columns as blocks of
//! nullable integers instead of streaming them through a decoder.

use crate::rebase::to_proleptic_gregorian;
use crate::RebaseResult;
use serde::{Deserialize, Serialize};

/// Logical type of a column, as far as value adjustment is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    Boolean,
    Integer,
    BigInt,
    Date,
    Varchar,
}

/// A block of nullable 32-bit integers.
///
/// Null positions keep a placeholder value so positions stay aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntBlock {
    values: Vec<i32>,
    nulls: Vec<bool>,
}

impl IntBlock {
    pub fn builder(expected_positions: usize) -> IntBlockBuilder {
        IntBlockBuilder {
            values: Vec::with_capacity(expected_positions),
            nulls: Vec::with_capacity(expected_positions),
        }
    }

    pub fn position_count(&self) -> usize {
        self.values.len()
    }

    /// Whether `position` holds a null. Out of bounds positions are not null.
    pub fn is_null(&self, position: usize) -> bool {
        self.nulls.get(position).copied().unwrap_or(false)
    }

    /// Value at `position`, `None` for nulls and out of bounds positions.
    pub fn get(&self, position: usize) -> Option<i32> {
        match self.nulls.get(position) {
            Some(false) => self.values.get(position).copied(),
            Some(true) | None => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<i32>> + '_ {
        self.values
            .iter()
            .zip(&self.nulls)
            .map(|(&value, &null)| (!null).then_some(value))
    }

    pub fn may_have_null(&self) -> bool {
        self.nulls.contains(&true)
    }
}

impl FromIterator<Option<i32>> for IntBlock {
    fn from_iter<I: IntoIterator<Item = Option<i32>>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = Self::builder(iter.size_hint().0);
        for value in iter {
            match value {
                Some(value) => builder.append(value),
                None => builder.append_null(),
            };
        }
        builder.build()
    }
}

/// Appends positions one at a time.
#[derive(Debug, Clone, Default)]
pub struct IntBlockBuilder {
    values: Vec<i32>,
    nulls: Vec<bool>,
}

impl IntBlockBuilder {
    pub fn append(&mut self, value: i32) -> &mut Self {
        self.values.push(value);
        self.nulls.push(false);
        self
    }

    pub fn append_null(&mut self) -> &mut Self {
        self.values.push(0);
        self.nulls.push(true);
        self
    }

    pub fn build(self) -> IntBlock {
        IntBlock {
            values: self.values,
            nulls: self.nulls,
        }
    }
}

/// Rewrites hybrid calendar DATE blocks as proleptic Gregorian blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateValueAdjuster;

impl DateValueAdjuster {
    pub const fn column_type(&self) -> ColumnType {
        ColumnType::Date
    }

    /// Builds a new block with every non-null value rebased to the proleptic
    /// Gregorian calendar. Nulls stay null.
    ///
    /// # Errors
    /// Returns `RebaseError::OutOfRange` for a value that cannot be rebased.
    pub fn apply(&self, block: &IntBlock) -> RebaseResult<IntBlock> {
        let mut builder = IntBlock::builder(block.position_count());
        for value in block.iter() {
            match value {
                Some(days) => builder.append(to_proleptic_gregorian(days)?),
                None => builder.append_null(),
            };
        }
        Ok(builder.build())
    }
}

/// Adjuster for blocks of `column_type` read from a hybrid calendar file.
/// Only DATE columns need one.
pub const fn create_value_adjuster(column_type: ColumnType) -> Option<DateValueAdjuster> {
    match column_type {
        ColumnType::Date => Some(DateValueAdjuster),
        ColumnType::Boolean | ColumnType::Integer | ColumnType::BigInt | ColumnType::Varchar => {
            None
        }
    }
}
