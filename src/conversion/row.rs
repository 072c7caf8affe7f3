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

//! Row adapters.
//!
//! Athena rows reach the driver in three shapes:
//!
//! - query result pages (`Datum`, NULL is a missing `VarCharValue`)
//! - table listings (plain strings, NULL is the `\N` sentinel)
//! - downloaded CSV result files (`DownloadField`, NULL is an explicit flag)
//!
//! Each shape maps its NULL convention onto `Option<&str>` through
//! [`RawCell`]; everything after that is shared.

use crate::config::{ConverterConfig, UnknownTypePolicy};
use crate::conversion::decode::decode_value_with;
use crate::error::{Error, Result};
use crate::logging::init_logging;
use crate::types::athena::{
    Column, ColumnInfo, ColumnType, Datum, DownloadField, RawCell, ResultRow,
};
use crate::types::value::Row;

/// Converts raw Athena rows into typed [`Row`]s.
///
/// Holds no per-row state, so one converter can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct RowConverter {
    config: ConverterConfig,
}

impl RowConverter {
    /// Creates a converter and initializes logging from `config.log`.
    ///
    /// Fails with [`Error::LogFile`] when the configured log file cannot be
    /// opened.
    pub fn new(config: ConverterConfig) -> Result<Self> {
        init_logging(&config.log)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn unknown_type_policy(&self) -> UnknownTypePolicy {
        self.config.unknown_type_policy
    }

    /// Decodes `cells` against `columns` position by position.
    ///
    /// The first failing cell aborts the row; no partial row is returned.
    pub fn convert_cells<C, R>(&self, columns: &[C], cells: &[R]) -> Result<Row>
    where
        C: ColumnType,
        R: RawCell,
    {
        if columns.len() != cells.len() {
            return Err(Error::ColumnCountMismatch {
                columns: columns.len(),
                cells: cells.len(),
            });
        }

        let policy = self.config.unknown_type_policy;
        let mut row = Row::with_capacity(cells.len());
        for (index, (column, cell)) in columns.iter().zip(cells).enumerate() {
            let value = decode_value_with(column.type_name(), cell.raw_value(), policy)
                .inspect_err(|e| {
                    tracing::debug!("Failed to convert column {}: {}", index, e);
                })?;
            row.push(value);
        }
        Ok(row)
    }

    /// Converts a query result row.
    pub fn convert_row(&self, columns: &[ColumnInfo], datums: &[Datum]) -> Result<Row> {
        self.convert_cells(columns, datums)
    }

    /// Converts a table listing row, where `\N` denotes NULL.
    pub fn convert_row_from_table_info(
        &self,
        columns: &[Column],
        values: &[String],
    ) -> Result<Row> {
        self.convert_cells(columns, values)
    }

    /// Converts a row read from a downloaded CSV result file.
    pub fn convert_row_from_csv(
        &self,
        columns: &[ColumnInfo],
        fields: &[DownloadField],
    ) -> Result<Row> {
        self.convert_cells(columns, fields)
    }

    /// Converts a page of query result rows.
    pub fn convert_rows(&self, columns: &[ColumnInfo], rows: &[ResultRow]) -> Result<Vec<Row>> {
        let converted = rows
            .iter()
            .map(|row| self.convert_row(columns, &row.data))
            .collect::<Result<Vec<_>>>()?;
        tracing::trace!(
            "Converted {} rows of {} columns",
            converted.len(),
            columns.len()
        );
        Ok(converted)
    }
}

/// Converts a query result row with the default configuration.
pub fn convert_row(columns: &[ColumnInfo], datums: &[Datum]) -> Result<Row> {
    RowConverter::default().convert_row(columns, datums)
}

/// Converts a table listing row with the default configuration.
pub fn convert_row_from_table_info(columns: &[Column], values: &[String]) -> Result<Row> {
    RowConverter::default().convert_row_from_table_info(columns, values)
}

/// Converts a CSV result row with the default configuration.
pub fn convert_row_from_csv(columns: &[ColumnInfo], fields: &[DownloadField]) -> Result<Row> {
    RowConverter::default().convert_row_from_csv(columns, fields)
}
