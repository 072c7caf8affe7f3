// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Assembles decoded rows into Arrow record batches.
//!
//! # Example
//!
//! ```ignore
//! let schema = Arc::new(result_schema(&columns, UnknownTypePolicy::Error)?);
//! let mut builder = RowBatchBuilder::new(schema)?;
//! for row in converter.convert_rows(&columns, &page.rows)? {
//!     builder.append_row(&row)?;
//! }
//! let batch = builder.finish()?;
//! ```

use crate::error::{Error, Result};
use crate::types::value::{Row, Value};
use arrow_array::builder::{
    BooleanBuilder, Date32Builder, Float32Builder, Float64Builder, Int16Builder, Int32Builder,
    Int64Builder, StringBuilder, TimestampMicrosecondBuilder,
};
use arrow_array::{ArrayRef, RecordBatch, RecordBatchOptions};
use arrow_schema::{DataType, SchemaRef, TimeUnit};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Builds a `RecordBatch` from [`Row`]s matching a schema produced by
/// [`result_schema`](crate::metadata::type_mapping::result_schema).
pub struct RowBatchBuilder {
    schema: SchemaRef,
    columns: Vec<ColumnBuilder>,
    num_rows: usize,
}

impl RowBatchBuilder {
    /// Creates a builder for `schema`.
    ///
    /// Fails if a field has an Arrow type that decoded values never take.
    pub fn new(schema: SchemaRef) -> Result<Self> {
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnBuilder::for_type(field.data_type()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema,
            columns,
            num_rows: 0,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Number of rows appended since the last `finish`.
    pub fn len(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Appends one row. The row is checked in full before any column is
    /// written, so a rejected row leaves the builder unchanged.
    pub fn append_row(&mut self, row: &Row) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::ColumnCountMismatch {
                columns: self.columns.len(),
                cells: row.len(),
            });
        }
        for (index, (column, value)) in self.columns.iter().zip(row).enumerate() {
            if !column.accepts(value) {
                return Err(Error::InvalidState(format!(
                    "Column '{}' of type {} cannot hold a {} value",
                    self.schema.field(index).name(),
                    self.schema.field(index).data_type(),
                    value.type_label()
                )));
            }
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.append(value);
        }
        self.num_rows += 1;
        Ok(())
    }

    /// Produces a batch from the rows appended so far and resets the builder.
    pub fn finish(&mut self) -> Result<RecordBatch> {
        let arrays: Vec<ArrayRef> = self.columns.iter_mut().map(ColumnBuilder::finish).collect();
        let options = RecordBatchOptions::new().with_row_count(Some(self.num_rows));
        let batch = RecordBatch::try_new_with_options(self.schema.clone(), arrays, &options)?;
        tracing::debug!(
            "Built record batch: {} rows, {} columns",
            batch.num_rows(),
            batch.num_columns()
        );
        self.num_rows = 0;
        Ok(batch)
    }
}

enum ColumnBuilder {
    Boolean(BooleanBuilder),
    Int16(Int16Builder),
    Int32(Int32Builder),
    Int64(Int64Builder),
    Float32(Float32Builder),
    Float64(Float64Builder),
    Utf8(StringBuilder),
    /// Naive wall-clock timestamps; the column has no time zone.
    Timestamp(TimestampMicrosecondBuilder),
    /// UTC instants of zoned timestamps.
    ZonedTimestamp(TimestampMicrosecondBuilder),
    Date32(Date32Builder),
}

impl ColumnBuilder {
    fn for_type(data_type: &DataType) -> Result<Self> {
        Ok(match data_type {
            DataType::Boolean => ColumnBuilder::Boolean(BooleanBuilder::new()),
            DataType::Int16 => ColumnBuilder::Int16(Int16Builder::new()),
            DataType::Int32 => ColumnBuilder::Int32(Int32Builder::new()),
            DataType::Int64 => ColumnBuilder::Int64(Int64Builder::new()),
            DataType::Float32 => ColumnBuilder::Float32(Float32Builder::new()),
            DataType::Float64 => ColumnBuilder::Float64(Float64Builder::new()),
            DataType::Utf8 => ColumnBuilder::Utf8(StringBuilder::new()),
            DataType::Timestamp(TimeUnit::Microsecond, None) => {
                ColumnBuilder::Timestamp(TimestampMicrosecondBuilder::new())
            }
            DataType::Timestamp(TimeUnit::Microsecond, Some(tz)) => {
                ColumnBuilder::ZonedTimestamp(
                    TimestampMicrosecondBuilder::new().with_timezone(tz.clone()),
                )
            }
            DataType::Date32 => ColumnBuilder::Date32(Date32Builder::new()),
            dt => {
                return Err(Error::InvalidState(format!(
                    "Unsupported column type for decoded rows: {:?}",
                    dt
                )))
            }
        })
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (_, Value::Null)
                | (ColumnBuilder::Boolean(_), Value::Boolean(_))
                | (ColumnBuilder::Int16(_), Value::SmallInt(_))
                | (ColumnBuilder::Int32(_), Value::Integer(_))
                | (ColumnBuilder::Int64(_), Value::BigInt(_))
                | (ColumnBuilder::Float32(_), Value::Float(_))
                | (ColumnBuilder::Float64(_), Value::Double(_))
                | (ColumnBuilder::Utf8(_), Value::Text(_))
                | (ColumnBuilder::Timestamp(_), Value::Timestamp(_))
                | (ColumnBuilder::ZonedTimestamp(_), Value::TimestampWithZone(_))
                | (ColumnBuilder::Date32(_), Value::Date(_))
        )
    }

    /// Appends a value already checked with `accepts`.
    fn append(&mut self, value: &Value) {
        match (self, value) {
            (ColumnBuilder::Boolean(b), Value::Boolean(v)) => b.append_value(*v),
            (ColumnBuilder::Int16(b), Value::SmallInt(v)) => b.append_value(*v),
            (ColumnBuilder::Int32(b), Value::Integer(v)) => b.append_value(*v),
            (ColumnBuilder::Int64(b), Value::BigInt(v)) => b.append_value(*v),
            (ColumnBuilder::Float32(b), Value::Float(v)) => b.append_value(*v),
            (ColumnBuilder::Float64(b), Value::Double(v)) => b.append_value(*v),
            (ColumnBuilder::Utf8(b), Value::Text(v)) => b.append_value(v),
            (ColumnBuilder::Timestamp(b), Value::Timestamp(v)) => {
                b.append_value(v.and_utc().timestamp_micros())
            }
            (ColumnBuilder::ZonedTimestamp(b), Value::TimestampWithZone(v)) => {
                b.append_value(v.instant.timestamp_micros())
            }
            (ColumnBuilder::Date32(b), Value::Date(v)) => b.append_value(days_since_epoch(v)),
            (column, _) => column.append_null(),
        }
    }

    fn append_null(&mut self) {
        match self {
            ColumnBuilder::Boolean(b) => b.append_null(),
            ColumnBuilder::Int16(b) => b.append_null(),
            ColumnBuilder::Int32(b) => b.append_null(),
            ColumnBuilder::Int64(b) => b.append_null(),
            ColumnBuilder::Float32(b) => b.append_null(),
            ColumnBuilder::Float64(b) => b.append_null(),
            ColumnBuilder::Utf8(b) => b.append_null(),
            ColumnBuilder::Timestamp(b) | ColumnBuilder::ZonedTimestamp(b) => b.append_null(),
            ColumnBuilder::Date32(b) => b.append_null(),
        }
    }

    fn finish(&mut self) -> ArrayRef {
        match self {
            ColumnBuilder::Boolean(b) => Arc::new(b.finish()),
            ColumnBuilder::Int16(b) => Arc::new(b.finish()),
            ColumnBuilder::Int32(b) => Arc::new(b.finish()),
            ColumnBuilder::Int64(b) => Arc::new(b.finish()),
            ColumnBuilder::Float32(b) => Arc::new(b.finish()),
            ColumnBuilder::Float64(b) => Arc::new(b.finish()),
            ColumnBuilder::Utf8(b) => Arc::new(b.finish()),
            ColumnBuilder::Timestamp(b) | ColumnBuilder::ZonedTimestamp(b) => Arc::new(b.finish()),
            ColumnBuilder::Date32(b) => Arc::new(b.finish()),
        }
    }
}

/// Days from 0001-01-01 (CE) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn days_since_epoch(date: &NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnknownTypePolicy;
    use crate::conversion::row::convert_row;
    use crate::conversion::temporal::{parse_timestamp, parse_timestamp_with_zone};
    use crate::metadata::type_mapping::result_schema;
    use crate::types::athena::{ColumnInfo, ColumnNullable, Datum};
    use arrow_array::cast::AsArray;
    use arrow_array::types::{
        Date32Type, Float64Type, Int32Type, Int64Type, TimestampMicrosecondType,
    };
    use arrow_array::Array;

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("id", "bigint"),
            ColumnInfo::new("name", "varchar"),
            ColumnInfo::new("price", "decimal(10,2)"),
            ColumnInfo::new("created", "timestamp"),
            ColumnInfo::new("day", "date"),
        ]
    }

    fn builder() -> RowBatchBuilder {
        let schema = result_schema(&columns(), UnknownTypePolicy::Error).unwrap();
        RowBatchBuilder::new(Arc::new(schema)).unwrap()
    }

    #[test]
    fn test_build_batch_from_rows() {
        let mut builder = builder();
        let rows = [
            vec!["1", "apple", "1.25", "1970-01-01 00:00:01.000", "1970-01-02"],
            vec!["2", "pear", "2.50", "2000-01-01 00:00:00.000", "2000-01-01"],
        ];
        for raw in &rows {
            let datums: Vec<Datum> = raw.iter().map(|v| Datum::value(*v)).collect();
            builder.append_row(&convert_row(&columns(), &datums).unwrap()).unwrap();
        }
        assert_eq!(builder.len(), 2);

        let batch = builder.finish().unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 5);
        assert_eq!(batch.column(0).as_primitive::<Int64Type>().value(1), 2);
        assert_eq!(batch.column(1).as_string::<i32>().value(0), "apple");
        assert_eq!(batch.column(2).as_primitive::<Float64Type>().value(1), 2.5);
        assert_eq!(
            batch.column(3).as_primitive::<TimestampMicrosecondType>().value(0),
            1_000_000
        );
        assert_eq!(batch.column(4).as_primitive::<Date32Type>().value(0), 1);
        assert_eq!(batch.column(4).as_primitive::<Date32Type>().value(1), 10957);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_nulls() {
        let mut builder = builder();
        builder.append_row(&vec![Value::Null; 5]).unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(batch.num_rows(), 1);
        for column in batch.columns() {
            assert!(column.is_null(0));
        }
    }

    #[test]
    fn test_rejected_row_leaves_builder_unchanged() {
        let mut builder = builder();
        let row = vec![
            Value::BigInt(1),
            Value::Text("x".into()),
            Value::Integer(3),
            Value::Null,
            Value::Null,
        ];
        let err = builder.append_row(&row).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(builder.is_empty());

        let err = builder.append_row(&vec![Value::Null]).unwrap_err();
        assert!(matches!(err, Error::ColumnCountMismatch { .. }));

        let batch = builder.finish().unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.column(0).len(), 0);
    }

    #[test]
    fn test_timestamp_with_zone_stored_as_utc() {
        let columns = vec![ColumnInfo::new("ts", "timestamp with time zone")];
        let schema = result_schema(&columns, UnknownTypePolicy::Error).unwrap();
        let mut builder = RowBatchBuilder::new(Arc::new(schema)).unwrap();
        let row = convert_row(&columns, &[Datum::value("1970-01-01 01:00:00.000 GMT+1")]).unwrap();
        builder.append_row(&row).unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(
            batch.column(0).as_primitive::<TimestampMicrosecondType>().value(0),
            0
        );
    }

    #[test]
    fn test_timestamp_columns_reject_the_other_flavour() {
        let columns = vec![
            ColumnInfo::new("local", "timestamp"),
            ColumnInfo::new("zoned", "timestamp with time zone"),
        ];
        let schema = result_schema(&columns, UnknownTypePolicy::Error).unwrap();
        let mut builder = RowBatchBuilder::new(Arc::new(schema)).unwrap();

        let local = parse_timestamp("2021-03-04 05:06:07").unwrap();
        let zoned = parse_timestamp_with_zone("2021-03-04 05:06:07 UTC").unwrap();

        let swapped = vec![Value::TimestampWithZone(zoned.clone()), Value::Timestamp(local)];
        let err = builder.append_row(&swapped).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(builder.is_empty());

        let row = vec![Value::Timestamp(local), Value::TimestampWithZone(zoned)];
        builder.append_row(&row).unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(
            batch.column(0).as_primitive::<TimestampMicrosecondType>().value(0),
            batch.column(1).as_primitive::<TimestampMicrosecondType>().value(0)
        );
        assert_eq!(
            batch.schema().field(0).data_type(),
            &DataType::Timestamp(TimeUnit::Microsecond, None)
        );
    }

    #[test]
    fn test_not_null_column_rejects_null_at_finish() {
        let mut id = ColumnInfo::new("id", "integer");
        id.nullable = Some(ColumnNullable::NotNull);
        let schema = result_schema(&[id], UnknownTypePolicy::Error).unwrap();
        let mut builder = RowBatchBuilder::new(Arc::new(schema)).unwrap();
        builder.append_row(&vec![Value::Integer(1)]).unwrap();
        let batch = builder.finish().unwrap();
        assert_eq!(batch.column(0).as_primitive::<Int32Type>().value(0), 1);

        builder.append_row(&vec![Value::Null]).unwrap();
        assert!(matches!(builder.finish(), Err(Error::Arrow(_))));
    }

    #[test]
    fn test_unsupported_schema_type() {
        let schema = arrow_schema::Schema::new(vec![arrow_schema::Field::new(
            "d",
            DataType::Decimal128(10, 2),
            true,
        )]);
        assert!(RowBatchBuilder::new(Arc::new(schema)).is_err());
    }
}
