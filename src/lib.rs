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

//! Athena value conversion for the ADBC driver
//!
//! Athena returns every result cell as text. This crate turns that text
//! into typed values, using the declared column type to pick the decoding
//! rule, and assembles the results into Arrow record batches.
//!
//! ## Overview
//!
//! - [`RowConverter`] - converts one row from any of the three row sources
//! - [`decode_value`] - decodes a single cell
//! - [`RowBatchBuilder`] - collects converted rows into a `RecordBatch`
//!
//! ## Row sources
//!
//! | Source | Cell type | NULL encoding |
//! |--------|-----------|---------------|
//! | Query result pages | [`Datum`] | missing `VarCharValue` |
//! | Table listings | `String` | the literal `\N` |
//! | Downloaded CSV results | [`DownloadField`] | `is_null` flag |
//!
//! ## Supported types
//!
//! | Athena type | Value |
//! |-------------|-------|
//! | `smallint`, `integer`/`int`, `bigint` | `SmallInt`, `Integer`, `BigInt` |
//! | `boolean` | `Boolean` |
//! | `float` | `Float` |
//! | `double`, `decimal`, `decimal(p,s)` | `Double` |
//! | `timestamp` | `Timestamp` |
//! | `timestamp with time zone` | `TimestampWithZone` |
//! | `date` | `Date` |
//! | `varchar`, `string`, `char`, `json`, `varbinary`, `binary`, `row`, `struct`, `array`, `map`, `ipaddress`, intervals, `unknown` | `Text` |
//!
//! ## Example
//!
//! ```
//! use athena_adbc::{convert_row, ColumnInfo, Datum, Value};
//!
//! let columns = vec![ColumnInfo::new("id", "bigint"), ColumnInfo::new("ok", "boolean")];
//! let row = convert_row(&columns, &[Datum::value("42"), Datum::null()]).unwrap();
//! assert_eq!(row, vec![Value::BigInt(42), Value::Null]);
//! ```

pub mod batch;
pub mod config;
pub mod conversion;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod types;

pub use batch::RowBatchBuilder;
pub use config::{ConverterConfig, UnknownTypePolicy};
pub use conversion::{
    convert_row, convert_row_from_csv, convert_row_from_table_info, decode_value,
    decode_value_with, normalize_type_name, RowConverter, TypeTag,
};
pub use error::{Error, ParseFailure, Result};
pub use metadata::result_schema;
pub use types::{Column, ColumnInfo, Datum, DownloadField, ResultRow, Row, Value, ZonedTimestamp};
