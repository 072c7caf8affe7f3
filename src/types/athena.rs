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

//! Athena result and catalog shapes consumed by the row converters.
//!
//! These types mirror the JSON structures returned by `GetQueryResults`
//! and `GetTableMetadata`, plus the field type produced by the CSV
//! download path. Only the declared type name and the cell text matter
//! to value conversion; the other descriptor fields are carried for
//! schema construction.

use serde::{Deserialize, Serialize};

/// Literal used by the CSV download mode and catalog listings for NULL.
pub const NULL_SENTINEL: &str = "\\N";

/// Exposes the declared Athena type name of a column descriptor.
pub trait ColumnType {
    fn type_name(&self) -> &str;
}

/// A single raw cell, viewed as an optional string.
///
/// Each row source encodes NULL differently; implementations map their
/// native convention onto `None`.
pub trait RawCell {
    fn raw_value(&self) -> Option<&str>;
}

/// Column descriptor from a query result set (`ResultSetMetadata.ColumnInfo`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<ColumnNullable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl ColumnInfo {
    /// Creates a descriptor with only a name and a declared type.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    /// Whether the column may contain NULLs. Unknown nullability is treated
    /// as nullable.
    pub fn is_nullable(&self) -> bool {
        !matches!(self.nullable, Some(ColumnNullable::NotNull))
    }
}

impl ColumnType for ColumnInfo {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Nullability reported for a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnNullable {
    NotNull,
    Nullable,
    Unknown,
}

/// Column descriptor from a table listing (`TableMetadata.Columns`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            comment: None,
        }
    }
}

impl ColumnType for Column {
    fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Metadata block of a `GetQueryResults` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSetMetadata {
    #[serde(rename = "ColumnInfo", default)]
    pub column_info: Vec<ColumnInfo>,
}

/// A query result cell. A missing `VarCharValue` means NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datum {
    #[serde(
        rename = "VarCharValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub var_char_value: Option<String>,
}

impl Datum {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            var_char_value: Some(value.into()),
        }
    }

    pub fn null() -> Self {
        Self::default()
    }
}

impl RawCell for Datum {
    fn raw_value(&self) -> Option<&str> {
        self.var_char_value.as_deref()
    }
}

/// One row of a `GetQueryResults` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Data", default)]
    pub data: Vec<Datum>,
}

/// Table listings carry every value as text and spell NULL as `\N`.
impl RawCell for String {
    fn raw_value(&self) -> Option<&str> {
        if self == NULL_SENTINEL {
            None
        } else {
            Some(self.as_str())
        }
    }
}

/// A field decoded from a downloaded CSV result file.
///
/// The CSV reader tracks NULL separately from the text, since an empty
/// quoted field and a NULL both decode to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadField {
    pub value: String,
    pub is_null: bool,
}

impl DownloadField {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_null: false,
        }
    }

    pub fn null() -> Self {
        Self {
            value: String::new(),
            is_null: true,
        }
    }
}

impl RawCell for DownloadField {
    fn raw_value(&self) -> Option<&str> {
        if self.is_null {
            None
        } else {
            Some(self.value.as_str())
        }
    }
}
